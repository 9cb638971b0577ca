//! MMC 主机抽象
//!
//! 总线层的 host 对象与 host->ops：核心层负责卡枚举、热插拔检测与请求调度，
//! host 驱动只实现 `HostOps`（request、set_iocfg、card_status）。

use alloc::sync::Arc;
use core::time::Duration;

use crate::card::MmcCard;
use crate::types::{HostCaps, IoCfg, MmcReq, PresenceStatus};

/// host 驱动向总线层提供的操作表
///
/// 总线层在同一 host 上同一时刻至多下发一个请求。
pub trait HostOps: Send + Sync {
    /// 执行一次请求。无论成功失败，实现方都必须恰好调用一次 `host.req_complete()`。
    fn request(&self, host: &dyn MmcHost, req: &mut MmcReq<'_>);

    /// 配置时钟、总线宽度与电源
    fn set_iocfg(&self, host: &dyn MmcHost, io_cfg: &IoCfg);

    /// 卡检测线的实时状态；默认认为卡始终在位
    fn card_status(&self, _host: &dyn MmcHost) -> bool {
        true
    }
}

/// 总线层 host 对象
pub trait MmcHost: Send + Sync {
    /// 绑定能力与操作表
    fn register(&self, caps: &HostCaps, ops: Arc<dyn HostOps>);

    /// 通知总线层卡状态可能变化，触发重新检测
    fn change(&self);

    /// 阻塞等待最多 `timeout` 直到检测线程报告新状态；
    /// 超时按 `Removed` 返回
    fn wait_cd_changed(&self, timeout: Duration) -> PresenceStatus;

    /// 请求完成，释放等待中的调用方
    fn req_complete(&self);

    /// 总线层当前持有的卡对象（枚举成功后为 Some）
    fn card(&self) -> Option<MmcCard>;
}

/// 总线层入口：分配 host
pub trait MmcCore {
    fn alloc_host(&self) -> Option<Arc<dyn MmcHost>>;
}
