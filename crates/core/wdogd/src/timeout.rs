use tracing::debug;
use tracing::error;
use tracing::warn;
use wdt_device::Watchdog;

use crate::DEFAULT_KICK_INTERVAL_SECS;

/// Timing parameters negotiated with the hardware at startup, immutable
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// The hardware timeout the operator asked for.
    pub requested_timeout: u32,
    /// The timeout the hardware says it uses, when it could be read back.
    pub actual_timeout: Option<u32>,
    /// Seconds between keep-alive kicks.
    pub kick_interval: u32,
}

/// Configure the hardware timeout and settle on a kick interval.
///
/// The requested timeout is applied and then read back, since the hardware
/// may clamp it to whatever granularity it supports. Neither a rejected
/// timeout nor an unreadable one stops the daemon: supervising with the
/// timeout the hardware already has beats not supervising at all.
///
/// An explicitly requested kick interval is honored as given, even when it
/// is too long to keep the machine alive (the operator gets a warning, not
/// an override). A derived interval is half of what the hardware reported,
/// so it lands safely below the timeout by construction.
pub fn negotiate<W: Watchdog>(
    device: &mut W,
    requested_timeout: u32,
    requested_interval: Option<u32>,
) -> TimeoutConfig {
    if let Err(err) = device.set_timeout(requested_timeout) {
        error!("{err}");
    }

    let actual_timeout = match device.read_timeout() {
        Ok(seconds) => Some(seconds),
        Err(err) => {
            error!("{err}");
            None
        }
    };

    let kick_interval = derive_kick_interval(requested_interval, actual_timeout);

    TimeoutConfig {
        requested_timeout,
        actual_timeout,
        kick_interval,
    }
}

fn derive_kick_interval(requested_interval: Option<u32>, actual_timeout: Option<u32>) -> u32 {
    match requested_interval {
        Some(interval) => {
            if let Some(timeout) = actual_timeout {
                if timeout <= interval {
                    warn!("Watchdog timeout <= kick interval: {timeout} <= {interval}");
                }
            }
            interval
        }
        None => {
            let interval = match actual_timeout {
                Some(timeout) => timeout / 2,
                None => DEFAULT_KICK_INTERVAL_SECS,
            };
            debug!("Watchdog kick interval set to {interval} sec");
            interval
        }
    }
}
