//! TF 卡驱动配置
//!
//! 注册时一次性给定，之后不变。默认值即板上实际使用的参数。

use core::time::Duration;

use dfs::MountPoint;
use mmc::HostCaps;

/// 监控线程的调度参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskConfig {
    pub name: &'static str,
    pub stack_size: usize,
    /// 数值越大优先级越低
    pub priority: u8,
    /// 时间片（tick）
    pub tick: u32,
}

impl TaskConfig {
    pub const fn default_const() -> Self {
        Self {
            name: "sd_mon",
            stack_size: 2048,
            priority: 30,
            tick: 20,
        }
    }
}

/// 热插拔监控参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorConfig {
    /// 两次轮询之间的间隔
    pub poll_interval: Duration,
    /// 等待卡检测结果的上限
    pub cd_timeout: Duration,
    /// 连续错误计数 **超过** 该值时强制重新插拔
    pub fault_threshold: u32,
    /// 无错误的物理拔卡是否在下次轮询时直接卸载（默认否）
    pub reclaim_on_removal: bool,
    pub task: TaskConfig,
}

impl MonitorConfig {
    pub const fn default_const() -> Self {
        Self {
            poll_interval: Duration::from_secs(10),
            cd_timeout: Duration::from_secs(5),
            fault_threshold: 10,
            reclaim_on_removal: false,
            task: TaskConfig::default_const(),
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self::default_const()
    }
}

/// TF 卡驱动整体配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TfConfig {
    /// SD 控制器编号（SDC0）
    pub sdc_no: u32,
    pub caps: HostCaps,
    pub mount: MountPoint,
    pub monitor: MonitorConfig,
}

impl TfConfig {
    pub const fn default_const() -> Self {
        Self {
            sdc_no: 0,
            caps: HostCaps::default_const(),
            mount: MountPoint::new("sd0", "/mmc", "elm"),
            monitor: MonitorConfig::default_const(),
        }
    }
}

impl Default for TfConfig {
    fn default() -> Self {
        Self::default_const()
    }
}
