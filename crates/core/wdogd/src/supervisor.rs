use std::future::Future;
use std::time::Duration;

use futures::future;
use tokio::time::sleep;
use tracing::debug;
use wdt_device::Watchdog;

use crate::error::WatchdogdError;
use crate::signals;
use crate::timeout::TimeoutConfig;

/// Owns the armed device and the negotiated cadence.
///
/// Once running, kicking the device is the only thing this process does.
pub struct Supervisor<W> {
    device: W,
    config: TimeoutConfig,
    safe_exit: bool,
}

impl<W: Watchdog> Supervisor<W> {
    pub fn new(device: W, config: TimeoutConfig, safe_exit: bool) -> Self {
        Supervisor {
            device,
            config,
            safe_exit,
        }
    }

    /// Kick the device at the negotiated interval until the process dies.
    ///
    /// With safe exit enabled this returns `Ok(())` once SIGINT or SIGTERM
    /// has been received and the hardware disarmed. Without it no handlers
    /// are installed at all: signals keep their default disposition, the
    /// loop never breaks, and whenever the process dies the armed hardware
    /// reboots the machine once its timeout elapses.
    pub async fn run(mut self) -> Result<(), WatchdogdError> {
        if self.safe_exit {
            let shutdown = signals::shutdown_signal()
                .map_err(|from| WatchdogdError::SignalRegistration { from })?;
            self.supervise_until(shutdown).await
        } else {
            self.kick_until(future::pending::<()>()).await;
            unreachable!("the kick loop only stops on a shutdown request")
        }
    }

    async fn supervise_until(
        &mut self,
        shutdown: impl Future<Output = ()>,
    ) -> Result<(), WatchdogdError> {
        self.kick_until(shutdown).await;

        debug!("Safe exit, disabling HW watchdog");
        self.device.disarm()?;
        Ok(())
    }

    async fn kick_until(&mut self, shutdown: impl Future<Output = ()>) {
        let interval = Duration::from_secs(u64::from(self.config.kick_interval));
        tokio::pin!(shutdown);

        loop {
            // A failed kick is never escalated: the next scheduled kick is
            // the retry, and the hardware reboot is the backstop.
            if let Err(err) = self.device.kick() {
                debug!("{err}");
            }

            tokio::select! {
                _ = sleep(interval) => {}
                _ = &mut shutdown => break,
            }
        }
    }
}
