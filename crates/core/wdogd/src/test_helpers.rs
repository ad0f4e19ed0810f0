use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use wdt_device::Watchdog;
use wdt_device::WdtDeviceError;

/// In-memory stand-in for the hardware watchdog.
///
/// Clones share their state, so a test can keep a handle while the
/// supervisor owns another.
#[derive(Clone)]
pub struct FakeWdt {
    hw_timeout: Option<u32>,
    reject_set_timeout: bool,
    fail_kicks: bool,
    kicks: Arc<AtomicUsize>,
    set_timeouts: Arc<Mutex<Vec<u32>>>,
    disarmed: Arc<AtomicBool>,
}

impl FakeWdt {
    /// `hw_timeout` is what `read_timeout` reports; `None` makes it fail.
    pub fn new(hw_timeout: Option<u32>) -> Self {
        FakeWdt {
            hw_timeout,
            reject_set_timeout: false,
            fail_kicks: false,
            kicks: Arc::new(AtomicUsize::new(0)),
            set_timeouts: Arc::new(Mutex::new(Vec::new())),
            disarmed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn rejecting_set_timeout(mut self) -> Self {
        self.reject_set_timeout = true;
        self
    }

    pub fn failing_kicks(mut self) -> Self {
        self.fail_kicks = true;
        self
    }

    /// Number of kicks attempted, successful or not.
    pub fn kicks(&self) -> usize {
        self.kicks.load(Ordering::SeqCst)
    }

    pub fn set_timeouts(&self) -> Vec<u32> {
        self.set_timeouts.lock().unwrap().clone()
    }

    pub fn disarmed(&self) -> bool {
        self.disarmed.load(Ordering::SeqCst)
    }

    fn check_armed(&self) -> Result<(), WdtDeviceError> {
        if self.disarmed() {
            Err(WdtDeviceError::AlreadyDisarmed)
        } else {
            Ok(())
        }
    }
}

impl Watchdog for FakeWdt {
    fn kick(&mut self) -> Result<(), WdtDeviceError> {
        self.check_armed()?;
        self.kicks.fetch_add(1, Ordering::SeqCst);
        if self.fail_kicks {
            return Err(WdtDeviceError::KickFailed {
                from: nix::Error::ENOTTY,
            });
        }
        Ok(())
    }

    fn set_timeout(&mut self, seconds: u32) -> Result<(), WdtDeviceError> {
        self.check_armed()?;
        self.set_timeouts.lock().unwrap().push(seconds);
        if self.reject_set_timeout {
            return Err(WdtDeviceError::TimeoutSetRejected {
                seconds,
                from: nix::Error::EINVAL,
            });
        }
        Ok(())
    }

    fn read_timeout(&mut self) -> Result<u32, WdtDeviceError> {
        self.check_armed()?;
        self.hw_timeout.ok_or(WdtDeviceError::TimeoutReadFailed {
            from: nix::Error::ENOTTY,
        })
    }

    fn disarm(&mut self) -> Result<(), WdtDeviceError> {
        self.check_armed()?;
        self.disarmed.store(true, Ordering::SeqCst);
        Ok(())
    }
}
