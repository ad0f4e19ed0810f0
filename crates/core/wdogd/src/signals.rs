use std::future::Future;
use std::io;

use tokio::signal::unix::signal;
use tokio::signal::unix::SignalKind;

/// A future that resolves once the process receives SIGINT or SIGTERM.
///
/// Both streams are registered before the future is returned, so a signal
/// delivered while the caller is between awaits is not lost.
pub fn shutdown_signal() -> io::Result<impl Future<Output = ()>> {
    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;

    Ok(async move {
        tokio::select! {
            _ = interrupt.recv() => {}
            _ = terminate.recv() => {}
        }
    })
}
