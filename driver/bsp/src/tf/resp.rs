//! 响应类型 / 数据方向转换
//!
//! 总线层的响应类型编号与方向 flags 翻译成控制器原生位掩码，纯函数。

use mmc::{DataDir, RespClass};

use super::ops::{DataFlags, RespFlags};

/// 响应类型 → 原生响应位
pub const fn resp_flags(class: RespClass) -> RespFlags {
    match class {
        RespClass::None => RespFlags::NONE,
        RespClass::R1 => RespFlags::R1,
        RespClass::R1b => RespFlags::R1B,
        RespClass::R2 => RespFlags::R2,
        RespClass::R3 => RespFlags::R3,
        RespClass::R4 => RespFlags::R4,
        RespClass::R6 => RespFlags::R6,
        RespClass::R7 => RespFlags::R7,
        RespClass::R5 => RespFlags::R5,
    }
}

/// 数据方向 → 原生方向位
pub const fn data_flags(dir: DataDir) -> DataFlags {
    match dir {
        DataDir::None => DataFlags::empty(),
        DataDir::Write => DataFlags::WRITE,
        DataDir::Read => DataFlags::READ,
        DataDir::Both => DataFlags::READ.union(DataFlags::WRITE),
    }
}

/// 总线层 data flags（bit0 写、bit1 读）→ 原生方向位
pub const fn data_flags_from_bits(flags: u32) -> DataFlags {
    data_flags(DataDir::from_flags(flags))
}
