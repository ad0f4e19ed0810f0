use wdt_device::WdtDeviceError;

#[derive(Debug, thiserror::Error)]
pub enum WatchdogdError {
    #[error(transparent)]
    FromWdtDevice(#[from] WdtDeviceError),

    #[error("Failed installing signal handlers: {from}")]
    SignalRegistration { from: std::io::Error },
}
