//! TF 卡 host 状态与 HostOps 绑定
//!
//! 每个控制器实例恰有一个 `HostState`：注册时创建，经 `Arc` 同时交给总线层（作为 HostOps）
//! 和热插拔监控线程，进程生命周期内不重建。
//!
//! 并发：请求路径只做错误计数清零/自增，监控线程只读取与清零；计数器、时钟、宽度、在位状态
//! 均为单次原子读写，无需加锁。

use core::sync::atomic::{AtomicU32, AtomicU8, Ordering};

use mmc::{BusWidth, HostOps, IoCfg, MmcHost, MmcReq, PresenceStatus};

use super::ops::SunxiMmc;

/// 单个 TF 控制器的 host 私有状态
pub struct HostState<C: SunxiMmc> {
    ctrl: C,
    /// 上次协商的时钟（Hz），0 表示尚未配置
    clock: AtomicU32,
    /// 上次协商的总线宽度（BusWidth 编号）
    bus_width: AtomicU8,
    /// 连续错误计数：命令成功清零，失败加一
    err: AtomicU32,
    /// 最近一次检测到的在位状态（PresenceStatus 编号）
    plug: AtomicU8,
}

impl<C: SunxiMmc> HostState<C> {
    pub fn new(ctrl: C) -> Self {
        Self {
            ctrl,
            clock: AtomicU32::new(0),
            bus_width: AtomicU8::new(BusWidth::One as u8),
            err: AtomicU32::new(0),
            plug: AtomicU8::new(PresenceStatus::Removed as u8),
        }
    }

    pub fn controller(&self) -> &C {
        &self.ctrl
    }

    pub fn clock(&self) -> u32 {
        self.clock.load(Ordering::Acquire)
    }

    pub fn bus_width(&self) -> BusWidth {
        match self.bus_width.load(Ordering::Acquire) {
            2 => BusWidth::Four,
            3 => BusWidth::Eight,
            _ => BusWidth::One,
        }
    }

    pub(super) fn set_clock(&self, clock: u32) {
        self.clock.store(clock, Ordering::Release);
    }

    pub(super) fn set_bus_width(&self, width: BusWidth) {
        self.bus_width.store(width as u8, Ordering::Release);
    }

    /// 当前连续错误计数
    pub fn err_count(&self) -> u32 {
        self.err.load(Ordering::Acquire)
    }

    pub fn reset_err(&self) {
        self.err.store(0, Ordering::Release);
    }

    /// 按一条命令的返回码记账：0 清零，否则加一
    pub(super) fn account(&self, status: i32) {
        if status == 0 {
            self.err.store(0, Ordering::Release);
        } else {
            self.err.fetch_add(1, Ordering::AcqRel);
        }
    }

    /// 最近一次检测结果（非实时读卡检测线，实时状态见 `is_present`）
    pub fn plug(&self) -> PresenceStatus {
        PresenceStatus::from_u8(self.plug.load(Ordering::Acquire))
    }

    pub(super) fn set_plug(&self, status: PresenceStatus) {
        self.plug.store(status as u8, Ordering::Release);
    }
}

impl<C: SunxiMmc> HostOps for HostState<C> {
    fn request(&self, host: &dyn MmcHost, req: &mut MmcReq<'_>) {
        let _ = self.execute(host, req);
    }

    fn set_iocfg(&self, _host: &dyn MmcHost, io_cfg: &IoCfg) {
        let _ = self.configure(io_cfg);
    }

    fn card_status(&self, _host: &dyn MmcHost) -> bool {
        self.is_present()
    }
}
