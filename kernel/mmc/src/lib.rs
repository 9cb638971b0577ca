//! # mmc：MMC/SD 总线层抽象
//!
//! host 驱动所依赖的总线层接口：请求描述、I/O 配置、热插拔通知与卡对象。
//!
//! | 模块  | 说明 |
//! |-------|------|
//! | types | MmcCmd、MmcData、MmcReq、RespClass、DataDir、IoCfg、HostCaps、PresenceStatus |
//! | host  | MmcCore（alloc_host）、MmcHost（change、wait_cd_changed、req_complete）、HostOps |
//! | card  | MmcCard（RCA、卡类型） |

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod card;
pub mod host;
pub mod types;

pub use card::{CardType, MmcCard, Rca};
pub use host::{HostOps, MmcCore, MmcHost};
pub use types::{
    BusWidth, DataDir, HostCaps, HostFlags, IoCfg, MmcCmd, MmcData, MmcReq, OcrMask, PowerMode,
    PresenceStatus, RespClass, DATA_DIR_READ, DATA_DIR_WRITE, DATA_STREAM,
};
