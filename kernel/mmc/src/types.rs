//! MMC/SD 总线层通用类型
//!
//! 总线层的 cmd/data/req/io_cfg 描述：与控制器无关，由总线层逐次传输构造，
//! 交给 host 驱动（HostOps）消费一次。

use bitflags::bitflags;

/// 命令的响应类型（总线层抽象编号 0..=8）
///
/// 编号顺序：RESP_NONE, R1, R1B, R2, R3, R4, R6, R7, R5。
/// 注意 R5 排在最后（编号 8），R6/R7 在它前面。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RespClass {
    None = 0,
    R1 = 1,
    R1b = 2,
    R2 = 3,
    R3 = 4,
    R4 = 5,
    R6 = 6,
    R7 = 7,
    R5 = 8,
}

impl RespClass {
    /// 所有合法响应类型，按编号排列
    pub const ALL: [RespClass; 9] = [
        RespClass::None,
        RespClass::R1,
        RespClass::R1b,
        RespClass::R2,
        RespClass::R3,
        RespClass::R4,
        RespClass::R6,
        RespClass::R7,
        RespClass::R5,
    ];

    /// 从 cmd flags 的低 4 位编号解析；9..=15 不是合法响应类型，返回 None
    pub const fn from_index(idx: u8) -> Option<Self> {
        match idx & 0x0F {
            0 => Some(RespClass::None),
            1 => Some(RespClass::R1),
            2 => Some(RespClass::R1b),
            3 => Some(RespClass::R2),
            4 => Some(RespClass::R3),
            5 => Some(RespClass::R4),
            6 => Some(RespClass::R6),
            7 => Some(RespClass::R7),
            8 => Some(RespClass::R5),
            _ => None,
        }
    }

    pub const fn index(self) -> u8 {
        self as u8
    }
}

/// 数据 flags：bit0 = 写，bit1 = 读（两位同时置位为双向）
pub const DATA_DIR_WRITE: u32 = 1 << 0;
pub const DATA_DIR_READ: u32 = 1 << 1;
/// 流式传输标志，方向解析时忽略
pub const DATA_STREAM: u32 = 1 << 2;

/// 数据方向（由 data flags 低 2 位得到）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataDir {
    None,
    Write,
    Read,
    Both,
}

impl DataDir {
    /// 只看低 2 位，对任意 flags 都有定义
    pub const fn from_flags(flags: u32) -> Self {
        match flags & (DATA_DIR_WRITE | DATA_DIR_READ) {
            0 => DataDir::None,
            DATA_DIR_WRITE => DataDir::Write,
            DATA_DIR_READ => DataDir::Read,
            _ => DataDir::Both,
        }
    }

    pub const fn reads(self) -> bool {
        matches!(self, DataDir::Read | DataDir::Both)
    }

    pub const fn writes(self) -> bool {
        matches!(self, DataDir::Write | DataDir::Both)
    }
}

/// 单条命令
///
/// `resp` 与 `err` 由 host 驱动在执行后回填。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MmcCmd {
    pub cmd_code: u16,
    pub arg: u32,
    pub resp_type: RespClass,
    pub resp: [u32; 4],
    /// 0 表示成功，否则为控制器返回的错误码
    pub err: i32,
}

impl MmcCmd {
    pub const fn new(cmd_code: u16, arg: u32, resp_type: RespClass) -> Self {
        Self {
            cmd_code,
            arg,
            resp_type,
            resp: [0; 4],
            err: 0,
        }
    }
}

/// 数据阶段描述
#[derive(Debug)]
pub struct MmcData<'a> {
    /// 读时为目的缓冲区，写时为源缓冲区
    pub buf: &'a mut [u8],
    pub flags: u32,
    pub blks: u32,
    pub blksize: u32,
}

impl<'a> MmcData<'a> {
    pub fn new(buf: &'a mut [u8], flags: u32, blks: u32, blksize: u32) -> Self {
        Self {
            buf,
            flags,
            blks,
            blksize,
        }
    }

    pub fn dir(&self) -> DataDir {
        DataDir::from_flags(self.flags)
    }
}

/// 一次总线请求：主命令 + 可选数据阶段 + 可选 stop 命令
#[derive(Debug)]
pub struct MmcReq<'a> {
    pub cmd: MmcCmd,
    pub data: Option<MmcData<'a>>,
    pub stop: Option<MmcCmd>,
}

impl<'a> MmcReq<'a> {
    pub fn new(cmd: MmcCmd) -> Self {
        Self {
            cmd,
            data: None,
            stop: None,
        }
    }

    pub fn with_data(mut self, data: MmcData<'a>) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_stop(mut self, stop: MmcCmd) -> Self {
        self.stop = Some(stop);
        self
    }
}

/// 电源状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PowerMode {
    #[default]
    Off,
    Up,
    On,
}

/// 总线宽度，编号即 log2(线数)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum BusWidth {
    #[default]
    One = 0,
    Four = 2,
    Eight = 3,
}

impl BusWidth {
    /// 数据线数量（1/4/8），即 `1 << 编号`
    pub const fn lanes(self) -> u32 {
        1 << (self as u32)
    }
}

/// Host 接口配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IoCfg {
    /// 时钟频率 Hz
    pub clock: u32,
    /// OCR 电压位
    pub vdd: u16,
    pub power_mode: PowerMode,
    pub bus_width: BusWidth,
}

impl IoCfg {
    pub const fn new(clock: u32, power_mode: PowerMode, bus_width: BusWidth) -> Self {
        Self {
            clock,
            vdd: 0,
            power_mode,
            bus_width,
        }
    }
}

/// 卡在位状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum PresenceStatus {
    #[default]
    Removed = 0,
    Inserted = 1,
}

impl PresenceStatus {
    pub const fn from_u8(v: u8) -> Self {
        if v == PresenceStatus::Inserted as u8 {
            PresenceStatus::Inserted
        } else {
            PresenceStatus::Removed
        }
    }
}

bitflags! {
    /// OCR 电压窗口
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct OcrMask: u32 {
        const VDD_165_195 = 1 << 7;
        const VDD_20_21 = 1 << 8;
        const VDD_29_30 = 1 << 17;
        const VDD_30_31 = 1 << 18;
        const VDD_31_32 = 1 << 19;
        const VDD_32_33 = 1 << 20;
        const VDD_33_34 = 1 << 21;
        const VDD_34_35 = 1 << 22;
        const VDD_35_36 = 1 << 23;
    }
}

bitflags! {
    /// Host 能力位
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct HostFlags: u32 {
        const BUSWIDTH_4 = 1 << 0;
        const BUSWIDTH_8 = 1 << 1;
        const MUTBLKWRITE = 1 << 2;
        const SUP_SDIO_IRQ = 1 << 3;
        const SUP_HIGHSPEED = 1 << 4;
    }
}

/// Host 控制器能力，注册时交给总线层
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostCaps {
    pub freq_min: u32,
    pub freq_max: u32,
    pub valid_ocr: OcrMask,
    pub flags: HostFlags,
    pub max_blk_size: u32,
    pub max_blk_count: u32,
}

impl HostCaps {
    /// 400kHz..50MHz、3.2~3.4V、4 线 + 高速、512 字节块、最多 4096 块
    pub const fn default_const() -> Self {
        Self {
            freq_min: 400_000,
            freq_max: 50_000_000,
            valid_ocr: OcrMask::VDD_32_33.union(OcrMask::VDD_33_34),
            flags: HostFlags::BUSWIDTH_4.union(HostFlags::SUP_HIGHSPEED),
            max_blk_size: 512,
            max_blk_count: 4096,
        }
    }
}

impl Default for HostCaps {
    fn default() -> Self {
        Self::default_const()
    }
}
