//! 看门狗复位重启

use axerrno::{AxError, AxResult};

/// 未指定超时时的复位延时（秒）
pub const DEFAULT_REBOOT_SECS: u32 = 1;

pub trait Watchdog: Send + Sync {
    fn set_timeout(&self, secs: u32);
    fn start(&self);
}

/// 设置超时并启动看门狗，超时后芯片复位
pub fn reboot(wdt: Option<&dyn Watchdog>, timeout_secs: Option<u32>) -> AxResult<()> {
    let wdt = wdt.ok_or_else(|| {
        log::error!(target: "bsp::wdt", "can't find wdt device");
        AxError::NotFound
    })?;
    let secs = timeout_secs.unwrap_or(DEFAULT_REBOOT_SECS);
    log::info!(target: "bsp::wdt", "reboot in {}s", secs);
    wdt.set_timeout(secs);
    wdt.start();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use spin::Mutex;

    #[derive(Default)]
    struct FakeWdt {
        calls: Mutex<Vec<(&'static str, u32)>>,
    }

    impl Watchdog for FakeWdt {
        fn set_timeout(&self, secs: u32) {
            self.calls.lock().push(("timeout", secs));
        }
        fn start(&self) {
            self.calls.lock().push(("start", 0));
        }
    }

    #[test]
    fn reboot_defaults_to_one_second() {
        let wdt = FakeWdt::default();
        reboot(Some(&wdt), None).unwrap();
        assert_eq!(*wdt.calls.lock(), [("timeout", 1), ("start", 0)]);
    }

    #[test]
    fn reboot_with_timeout() {
        let wdt = FakeWdt::default();
        reboot(Some(&wdt), Some(5)).unwrap();
        assert_eq!(wdt.calls.lock()[0], ("timeout", 5));
    }

    #[test]
    fn missing_watchdog() {
        assert_eq!(reboot(None, None), Err(AxError::NotFound));
    }
}
