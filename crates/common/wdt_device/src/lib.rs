use std::fs::File;
use std::fs::OpenOptions;
use std::io::Write;
use std::os::fd::AsRawFd;
use std::path::Path;
use std::path::PathBuf;

use nix::libc::c_int;
use tracing::debug;

mod error;
pub use error::WdtDeviceError;

/// Well-known device node of the hardware watchdog.
pub const WATCHDOG_DEVICE_PATH: &str = "/dev/watchdog";

/// The byte the driver recognizes as a "magic close": writing it right
/// before closing the device tells the hardware not to reboot the machine.
const MAGIC_CLOSE_BYTE: &[u8] = b"V";

mod ioctl {
    use nix::libc::c_int;

    const WATCHDOG_IOCTL_BASE: u8 = b'W';

    // Control codes of the Linux watchdog driver API (linux/watchdog.h).
    nix::ioctl_read!(wdioc_keepalive, WATCHDOG_IOCTL_BASE, 5, c_int);
    nix::ioctl_readwrite!(wdioc_settimeout, WATCHDOG_IOCTL_BASE, 6, c_int);
    nix::ioctl_read!(wdioc_gettimeout, WATCHDOG_IOCTL_BASE, 7, c_int);
}

/// Operations a hardware watchdog exposes to a supervising process.
///
/// `WdtDevice` is the one real implementation; the trait exists so the
/// negotiation and supervision logic can run against fakes in tests.
pub trait Watchdog {
    /// Reset the hardware's internal countdown.
    fn kick(&mut self) -> Result<(), WdtDeviceError>;

    /// Ask the hardware to use `seconds` as its reboot timeout.
    ///
    /// The hardware is free to clamp or refuse the value; what it actually
    /// uses is only known through [`Watchdog::read_timeout`].
    fn set_timeout(&mut self, seconds: u32) -> Result<(), WdtDeviceError>;

    /// Read back the timeout the hardware currently uses, in seconds.
    fn read_timeout(&mut self) -> Result<u32, WdtDeviceError>;

    /// Write the magic close byte and close the device, so the hardware
    /// does not reboot the machine once the handle is gone.
    ///
    /// After a successful disarm the handle is permanently invalid: every
    /// further operation, including a second disarm, fails with
    /// [`WdtDeviceError::AlreadyDisarmed`].
    fn disarm(&mut self) -> Result<(), WdtDeviceError>;
}

/// The open, armed hardware watchdog.
///
/// Opening the device node arms the hardware: from that point on the
/// machine reboots unless the device is kicked before its timeout elapses,
/// or disarmed. Dropping the handle without disarming leaves the hardware
/// counting down.
#[derive(Debug)]
pub struct WdtDevice {
    handle: Option<File>,
    path: PathBuf,
}

impl WdtDevice {
    /// Open (and thereby arm) the watchdog device node, write-only.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, WdtDeviceError> {
        let path = path.as_ref().to_path_buf();
        let file = match OpenOptions::new().write(true).open(&path) {
            Ok(file) => file,
            Err(from) => return Err(WdtDeviceError::DeviceUnavailable { path, from }),
        };

        Ok(WdtDevice {
            handle: Some(file),
            path,
        })
    }

    /// Whether the device is still open and counting.
    pub fn is_armed(&self) -> bool {
        self.handle.is_some()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn fd(&self) -> Result<c_int, WdtDeviceError> {
        self.handle
            .as_ref()
            .map(|file| file.as_raw_fd())
            .ok_or(WdtDeviceError::AlreadyDisarmed)
    }
}

impl Watchdog for WdtDevice {
    fn kick(&mut self) -> Result<(), WdtDeviceError> {
        let fd = self.fd()?;
        let mut dummy: c_int = 0;

        debug!("Kicking watchdog");
        unsafe { ioctl::wdioc_keepalive(fd, &mut dummy) }
            .map_err(|from| WdtDeviceError::KickFailed { from })?;
        Ok(())
    }

    fn set_timeout(&mut self, seconds: u32) -> Result<(), WdtDeviceError> {
        let fd = self.fd()?;
        let mut arg: c_int = seconds as c_int;

        debug!("Setting watchdog timeout to {seconds} sec");
        unsafe { ioctl::wdioc_settimeout(fd, &mut arg) }
            .map_err(|from| WdtDeviceError::TimeoutSetRejected { seconds, from })?;
        debug!("Hardware applied a timeout of {arg} sec");
        Ok(())
    }

    fn read_timeout(&mut self) -> Result<u32, WdtDeviceError> {
        let fd = self.fd()?;
        let mut seconds: c_int = 0;

        unsafe { ioctl::wdioc_gettimeout(fd, &mut seconds) }
            .map_err(|from| WdtDeviceError::TimeoutReadFailed { from })?;
        debug!("Watchdog timeout is set to {seconds} sec");

        u32::try_from(seconds).map_err(|_| WdtDeviceError::InvalidTimeout { seconds })
    }

    fn disarm(&mut self) -> Result<(), WdtDeviceError> {
        let mut file = self.handle.take().ok_or(WdtDeviceError::AlreadyDisarmed)?;

        debug!("Disarming HW watchdog");
        file.write_all(MAGIC_CLOSE_BYTE)
            .map_err(|from| WdtDeviceError::DisarmFailed { from })?;

        // Closing the descriptor right after the magic byte completes the
        // disarm handshake with the driver.
        drop(file);
        Ok(())
    }
}
