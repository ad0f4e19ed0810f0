pub mod daemon;
mod error;
pub mod logging;
mod signals;
mod supervisor;
mod timeout;

#[cfg(test)]
mod test_helpers;

use std::path::PathBuf;

use tracing::info;
use wdt_device::WdtDevice;
use wdt_device::WATCHDOG_DEVICE_PATH;

use crate::supervisor::Supervisor;

pub use error::WatchdogdError;

/// Hardware timeout requested when the operator does not supply one.
pub const DEFAULT_TIMEOUT_SECS: u32 = 20;

/// Kick cadence used when neither the operator nor the hardware can say
/// better.
pub const DEFAULT_KICK_INTERVAL_SECS: u32 = DEFAULT_TIMEOUT_SECS / 2;

const AFTER_HELP_TEXT: &str = r#"`wdogd` opens /dev/watchdog and kicks it on a fixed cadence so the hardware
watchdog does not reboot the machine. The HW timeout is set to 20 sec by
default and the kick interval to half of whatever timeout the hardware
actually accepted.

Exiting while the watchdog is armed lets the hardware reboot the machine once
its timeout elapses. Start with `--safe-exit` to have SIGINT/SIGTERM disarm
the hardware instead."#;

#[derive(Debug, clap::Parser)]
#[clap(
name = clap::crate_name!(),
version = clap::crate_version!(),
about = clap::crate_description!(),
after_help = AFTER_HELP_TEXT
)]
pub struct WdogdOpt {
    /// Run in the foreground (backgrounding is the default)
    #[clap(long, short = 'f')]
    pub foreground: bool,

    /// Append log messages to <FILE> when backgrounding, otherwise silent
    #[clap(long, short = 'l', value_name = "FILE")]
    pub logfile: Option<PathBuf>,

    /// Set the HW watchdog timeout to <SEC> seconds
    #[clap(
        long = "timeout",
        short = 'w',
        value_name = "SEC",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub timeout: u32,

    /// Kick the watchdog every <SEC> seconds (default: half the HW timeout)
    #[clap(long = "interval", short = 'k', value_name = "SEC")]
    pub interval: Option<u32>,

    /// Disarm the watchdog on exit from SIGINT/SIGTERM
    #[clap(long = "safe-exit", short = 's')]
    pub safe_exit: bool,

    /// Turn-on the debug log level.
    ///
    /// If off only reports ERROR, WARN, and INFO
    /// If on also reports DEBUG
    #[clap(long)]
    pub verbose: bool,
}

/// Open the device, negotiate the timing and kick until told otherwise.
pub async fn run(opt: WdogdOpt) -> Result<(), anyhow::Error> {
    let mut device = WdtDevice::open(WATCHDOG_DEVICE_PATH)?;
    let config = timeout::negotiate(&mut device, opt.timeout, opt.interval);

    info!(
        "Supervising {WATCHDOG_DEVICE_PATH} with a kick every {} sec",
        config.kick_interval
    );
    Supervisor::new(device, config, opt.safe_exit).run().await?;
    Ok(())
}
