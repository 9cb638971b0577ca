//! 热插拔监控
//!
//! 后台低优先级线程，每个轮询周期调用一次 `poll`，在两种状态间转换：
//!
//! | 状态        | 条件                               | 动作 |
//! |-------------|------------------------------------|------|
//! | NoCard      | 总线层已有卡对象                   | 直接挂载（上次挂载失败或强制重插后卡已重新枚举） |
//! | NoCard      | 无卡对象（不看上次的在位状态）     | change + 有界等待，报告 Inserted 则挂载 |
//! | CardMounted | 错误计数 > 阈值 且 卡对象仍在      | 强制重插：change + 等待、卸载、计数清零 → NoCard |
//! | CardMounted | 卡对象消失 且 reclaim_on_removal   | 卸载 → NoCard |
//!
//! 挂载/卸载失败只记日志，状态机保持一致，下个周期再处理。

use alloc::sync::Arc;

use dfs::{Dfs, MountPoint};
use mmc::{MmcHost, PresenceStatus};

use super::config::MonitorConfig;
use super::host::HostState;
use super::ops::SunxiMmc;
use crate::sync::Sleeper;

const TARGET: &str = "bsp::tf::monitor";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    NoCard,
    CardMounted,
}

/// 一次 `poll`（或 `start`）的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorEvent {
    Idle,
    /// 等待结束仍无卡
    NoCard,
    Mounted,
    MountFailed(i32),
    /// 错误计数超限触发的强制重插
    ForcedRemoval {
        err_count: u32,
        status: PresenceStatus,
        unmounted: bool,
    },
    /// 无错误的物理拔卡（仅 reclaim_on_removal）
    CardRemoved { unmounted: bool },
}

pub struct HotplugMonitor<C: SunxiMmc> {
    state: Arc<HostState<C>>,
    host: Arc<dyn MmcHost>,
    fs: Arc<dyn Dfs>,
    mount: MountPoint,
    cfg: MonitorConfig,
    phase: MonitorState,
}

impl<C: SunxiMmc> HotplugMonitor<C> {
    pub fn new(
        state: Arc<HostState<C>>,
        host: Arc<dyn MmcHost>,
        fs: Arc<dyn Dfs>,
        mount: MountPoint,
        cfg: MonitorConfig,
    ) -> Self {
        Self {
            state,
            host,
            fs,
            mount,
            cfg,
            phase: MonitorState::NoCard,
        }
    }

    pub fn phase(&self) -> MonitorState {
        self.phase
    }

    /// 以启动时的检测结果确定初始状态：Inserted 则尝试挂载
    pub fn start(&mut self, initial: PresenceStatus) -> MonitorEvent {
        if initial == PresenceStatus::Inserted {
            log::info!(target: TARGET, "MMC: Card detected!");
            self.try_mount()
        } else {
            log::info!(target: TARGET, "MMC: No card detected!");
            self.phase = MonitorState::NoCard;
            MonitorEvent::NoCard
        }
    }

    /// 执行一次状态转换
    pub fn poll(&mut self) -> MonitorEvent {
        match self.phase {
            MonitorState::NoCard => self.poll_no_card(),
            MonitorState::CardMounted => self.poll_mounted(),
        }
    }

    /// 线程主体：先睡一个周期再轮询，永不返回
    pub fn run(mut self, sleeper: &dyn Sleeper) {
        loop {
            sleeper.sleep(self.cfg.poll_interval);
            let _ = self.poll();
        }
    }

    fn poll_no_card(&mut self) -> MonitorEvent {
        if self.host.card().is_some() {
            return self.try_mount();
        }
        let status = self
            .state
            .await_presence_change(&*self.host, self.cfg.cd_timeout);
        if status == PresenceStatus::Inserted {
            log::info!(target: TARGET, "MMC: Card detected!");
            self.try_mount()
        } else {
            MonitorEvent::NoCard
        }
    }

    fn poll_mounted(&mut self) -> MonitorEvent {
        let err_count = self.state.err_count();
        let has_card = self.host.card().is_some();

        if err_count > self.cfg.fault_threshold && has_card {
            log::warn!(
                target: TARGET,
                "MMC: {} consecutive transfer errors, forcing card replug",
                err_count
            );
            let status = self
                .state
                .await_presence_change(&*self.host, self.cfg.cd_timeout);
            let unmounted = self.unmount();
            self.state.reset_err();
            self.phase = MonitorState::NoCard;
            return MonitorEvent::ForcedRemoval {
                err_count,
                status,
                unmounted,
            };
        }

        if !has_card && self.cfg.reclaim_on_removal {
            log::info!(target: TARGET, "MMC: card removed");
            self.state.set_plug(PresenceStatus::Removed);
            let unmounted = self.unmount();
            self.phase = MonitorState::NoCard;
            return MonitorEvent::CardRemoved { unmounted };
        }

        MonitorEvent::Idle
    }

    fn try_mount(&mut self) -> MonitorEvent {
        match self.fs.mount_at(&self.mount) {
            Ok(()) => {
                log::info!(target: TARGET, "Mount {} ok!", self.mount.path);
                self.phase = MonitorState::CardMounted;
                MonitorEvent::Mounted
            }
            Err(e) => {
                log::warn!(target: TARGET, "Mount {} failed: {}", self.mount.path, e);
                self.phase = MonitorState::NoCard;
                MonitorEvent::MountFailed(e)
            }
        }
    }

    fn unmount(&self) -> bool {
        match self.fs.unmount(self.mount.path) {
            Ok(()) => {
                log::info!(target: TARGET, "Unmount {} ok!", self.mount.path);
                true
            }
            Err(e) => {
                log::warn!(target: TARGET, "Unmount {} failed: {}", self.mount.path, e);
                false
            }
        }
    }
}
