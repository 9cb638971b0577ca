//! 卡在位跟踪
//!
//! `is_present` 每次都直接读卡检测线，不走缓存；`await_presence_change` 通知总线层重新检测并
//! 有界等待结果，结果记入 `HostState::plug`，驱动热插拔监控的状态转换。

use core::time::Duration;

use mmc::{MmcHost, PresenceStatus};

use super::host::HostState;
use super::ops::SunxiMmc;

impl<C: SunxiMmc> HostState<C> {
    /// 卡检测线实时状态
    pub fn is_present(&self) -> bool {
        self.controller().getcd()
    }

    /// mmcsd_change + mmcsd_wait_cd_changed：最多阻塞 `timeout`
    pub fn await_presence_change(&self, host: &dyn MmcHost, timeout: Duration) -> PresenceStatus {
        host.change();
        let status = host.wait_cd_changed(timeout);
        self.set_plug(status);
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tf::host::tests::FakeMmc;
    use crate::tf::testutil::FakeBus;
    use core::sync::atomic::Ordering;

    #[test]
    fn is_present_reads_detect_line_every_time() {
        let state = HostState::new(FakeMmc::default());
        assert!(!state.is_present());
        state.controller().cd.store(true, Ordering::Release);
        assert!(state.is_present());
        // 实时读不影响缓存的检测结果
        assert_eq!(state.plug(), PresenceStatus::Removed);
    }

    #[test]
    fn await_records_result() {
        let state = HostState::new(FakeMmc::default());
        let bus = FakeBus::new();
        bus.push_wait(PresenceStatus::Inserted);

        let status = state.await_presence_change(&bus, Duration::from_secs(5));
        assert_eq!(status, PresenceStatus::Inserted);
        assert_eq!(state.plug(), PresenceStatus::Inserted);
        assert_eq!(bus.changes(), 1);
        assert_eq!(bus.waits(), [Duration::from_secs(5)]);

        // 超时按 Removed
        assert_eq!(
            state.await_presence_change(&bus, Duration::from_millis(10)),
            PresenceStatus::Removed
        );
        assert_eq!(state.plug(), PresenceStatus::Removed);
    }
}
