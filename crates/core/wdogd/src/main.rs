use clap::Parser;
use wdogd::WdogdOpt;

fn main() -> Result<(), anyhow::Error> {
    let opt = WdogdOpt::parse();
    wdogd::logging::initialise_tracing_subscriber(opt.verbose);

    if !opt.foreground {
        wdogd::daemon::daemonize(opt.logfile.as_deref())?;
    }

    // Built by hand rather than with #[tokio::main] so that daemonizing
    // forks before any runtime exists.
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(wdogd::run(opt))
}
