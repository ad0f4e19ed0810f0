/// Initialize a `tracing_subscriber`
///
/// Reports all the log events sent either with the `log` crate or the
/// `tracing` crate.
///
/// If `verbose` is `false` then only `error!`, `warn!` and `info!` are
/// reported. If `verbose` is `true` then `debug!` is reported as well.
///
/// Everything is written to stderr: when the process moves to the
/// background, the daemon layer points stderr at the requested log sink.
pub fn initialise_tracing_subscriber(verbose: bool) {
    let log_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();
}
