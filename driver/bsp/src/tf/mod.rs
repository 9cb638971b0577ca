//! TF 卡（SD/MMC 控制器）host 驱动
//!
//! 把总线层的通用请求翻译成 sunxi 控制器原生命令，跟踪卡在位状态，并由后台线程在插卡、
//! 连续传输错误时驱动文件系统的挂载与卸载。
//!
//! - `resp`：响应类型 / 数据方向 → 原生位掩码
//! - `request`：MmcReq 执行、错误计数
//! - `iocfg`：时钟 / 总线宽度
//! - `presence`：卡检测
//! - `monitor`：热插拔状态机
//! - `tf_init`：注册与启动

mod config;
mod host;
mod iocfg;
mod monitor;
mod ops;
mod presence;
mod request;
mod resp;

#[cfg(test)]
mod testutil;

use alloc::boxed::Box;
use alloc::sync::Arc;

use axerrno::{AxError, AxResult};
use dfs::Dfs;
use mmc::{HostOps, MmcCore};

use crate::gpio::{self, PinMux};
use crate::sync::{Sleeper, TaskSpawner};

pub use config::{MonitorConfig, TaskConfig, TfConfig};
pub use host::HostState;
pub use iocfg::IoAction;
pub use monitor::{HotplugMonitor, MonitorEvent, MonitorState};
pub use ops::{DataFlags, NativeBuf, NativeCmd, NativeData, RespFlags, SunxiMmc};
pub use request::RequestOutcome;
pub use resp::{data_flags, data_flags_from_bits, resp_flags};

const TARGET: &str = "bsp::tf";

/// 注册 TF 卡驱动所需的外部服务
pub struct TfEnv<'a> {
    pub core: &'a dyn MmcCore,
    pub pinmux: &'a dyn PinMux,
    pub fs: Arc<dyn Dfs>,
    pub sleeper: Arc<dyn Sleeper>,
    pub spawner: &'a dyn TaskSpawner,
}

/// 注册 TF 卡驱动并启动热插拔监控
///
/// 顺序：分配 host → SDC0 引脚复用 → 探测控制器 → 绑定能力与 HostOps → 检测卡并在插卡时挂载
/// → 创建监控线程。
///
/// # 错误
/// - host 分配失败：`NoMemory`
/// - 控制器探测失败：`NotFound`
/// - 监控线程创建失败：透传 spawner 的错误；启动时已挂载的先卸载
///
/// 这些错误都会中止本设备的 bring-up，本层不重试。
pub fn tf_init<C, P>(env: TfEnv<'_>, cfg: &TfConfig, probe: P) -> AxResult<Arc<HostState<C>>>
where
    C: SunxiMmc + 'static,
    P: FnOnce(u32) -> Option<C>,
{
    let host = env.core.alloc_host().ok_or_else(|| {
        log::error!(target: TARGET, "failed to alloc host in tf_init");
        AxError::NoMemory
    })?;

    gpio::sdc0_pinmux(env.pinmux);

    let ctrl = probe(cfg.sdc_no).ok_or_else(|| {
        log::error!(target: TARGET, "failed to probe mmc{} in tf_init", cfg.sdc_no);
        AxError::NotFound
    })?;

    let state = Arc::new(HostState::new(ctrl));
    let ops: Arc<dyn HostOps> = state.clone();
    host.register(&cfg.caps, ops);
    log::info!(
        target: TARGET,
        "mmc{}: host registered, card detect line {}",
        cfg.sdc_no,
        if state.is_present() { "high" } else { "low" }
    );

    let initial = state.await_presence_change(&*host, cfg.monitor.cd_timeout);
    let fs = env.fs.clone();
    let mut monitor = HotplugMonitor::new(state.clone(), host, env.fs, cfg.mount, cfg.monitor);
    monitor.start(initial);
    let mounted = monitor.phase() == MonitorState::CardMounted;

    let task = cfg.monitor.task;
    let sleeper = env.sleeper;
    env.spawner
        .spawn(
            task.name,
            task.stack_size,
            task.priority,
            task.tick,
            Box::new(move || monitor.run(&*sleeper)),
        )
        .map_err(|e| {
            log::error!(target: TARGET, "failed to start {}: {:?}", task.name, e);
            // 没有监控线程就不保留启动时的挂载
            if mounted {
                if let Err(ret) = fs.unmount(cfg.mount.path) {
                    log::warn!(target: TARGET, "Unmount {} failed: {}", cfg.mount.path, ret);
                }
            }
            e
        })?;

    Ok(state)
}
