use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum WdtDeviceError {
    #[error("Failed opening watchdog device {}: {from}", path.display())]
    DeviceUnavailable { path: PathBuf, from: std::io::Error },

    #[error("Keep-alive kick failed: {from}")]
    KickFailed { from: nix::Error },

    #[error("Failed setting HW watchdog timeout to {seconds} sec: {from}")]
    TimeoutSetRejected { seconds: u32, from: nix::Error },

    #[error("Failed reading current watchdog timeout: {from}")]
    TimeoutReadFailed { from: nix::Error },

    #[error("Hardware reported a nonsensical timeout of {seconds} sec")]
    InvalidTimeout { seconds: i32 },

    #[error("Failed disarming the watchdog: {from}")]
    DisarmFailed { from: std::io::Error },

    #[error("Watchdog device is already disarmed")]
    AlreadyDisarmed,
}
