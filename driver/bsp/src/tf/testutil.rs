//! 单元测试用的假总线层 / 假文件系统

use alloc::collections::VecDeque;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};
use core::time::Duration;

use dfs::Dfs;
use mmc::{CardType, HostCaps, HostOps, MmcCard, MmcHost, PresenceStatus};
use spin::Mutex;

/// 假总线层：wait_cd_changed 依次弹出预设结果（空时为 Removed），
/// 并按结果建立/拆除卡对象，模拟重新枚举
#[derive(Default)]
pub struct FakeBus {
    completions: AtomicUsize,
    changes: AtomicUsize,
    waits: Mutex<Vec<Duration>>,
    wait_results: Mutex<VecDeque<PresenceStatus>>,
    card: Mutex<Option<MmcCard>>,
    pub caps: Mutex<Option<HostCaps>>,
    pub ops: Mutex<Option<Arc<dyn HostOps>>>,
}

impl FakeBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_wait(&self, status: PresenceStatus) {
        self.wait_results.lock().push_back(status);
    }

    pub fn set_card(&self, present: bool) {
        *self.card.lock() = present.then(|| MmcCard::new(0xAAAA, CardType::Sd));
    }

    pub fn completions(&self) -> usize {
        self.completions.load(Ordering::SeqCst)
    }

    pub fn changes(&self) -> usize {
        self.changes.load(Ordering::SeqCst)
    }

    pub fn waits(&self) -> Vec<Duration> {
        self.waits.lock().clone()
    }
}

impl MmcHost for FakeBus {
    fn register(&self, caps: &HostCaps, ops: Arc<dyn HostOps>) {
        *self.caps.lock() = Some(*caps);
        *self.ops.lock() = Some(ops);
    }

    fn change(&self) {
        self.changes.fetch_add(1, Ordering::SeqCst);
    }

    fn wait_cd_changed(&self, timeout: Duration) -> PresenceStatus {
        self.waits.lock().push(timeout);
        let status = self
            .wait_results
            .lock()
            .pop_front()
            .unwrap_or(PresenceStatus::Removed);
        self.set_card(status == PresenceStatus::Inserted);
        status
    }

    fn req_complete(&self) {
        self.completions.fetch_add(1, Ordering::SeqCst);
    }

    fn card(&self) -> Option<MmcCard> {
        *self.card.lock()
    }
}

/// 文件系统调用记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsCall {
    Mount { device: String, path: String, fs_type: String },
    Unmount { path: String },
}

/// 假文件系统：mount 依次弹出预设结果（空时成功）
pub struct FakeFs {
    calls: Mutex<Vec<FsCall>>,
    mount_results: Mutex<VecDeque<Result<(), i32>>>,
    pub unmount_result: Mutex<Result<(), i32>>,
}

impl FakeFs {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            mount_results: Mutex::new(VecDeque::new()),
            unmount_result: Mutex::new(Ok(())),
        }
    }

    pub fn push_mount_result(&self, r: Result<(), i32>) {
        self.mount_results.lock().push_back(r);
    }

    pub fn calls(&self) -> Vec<FsCall> {
        self.calls.lock().clone()
    }

    pub fn mounts(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| matches!(c, FsCall::Mount { .. }))
            .count()
    }

    pub fn unmounts(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| matches!(c, FsCall::Unmount { .. }))
            .count()
    }
}

impl Dfs for FakeFs {
    fn mount(&self, device: &str, path: &str, fs_type: &str, _rwflag: u32) -> Result<(), i32> {
        self.calls.lock().push(FsCall::Mount {
            device: device.to_string(),
            path: path.to_string(),
            fs_type: fs_type.to_string(),
        });
        self.mount_results.lock().pop_front().unwrap_or(Ok(()))
    }

    fn unmount(&self, path: &str) -> Result<(), i32> {
        self.calls.lock().push(FsCall::Unmount {
            path: path.to_string(),
        });
        *self.unmount_result.lock()
    }
}
