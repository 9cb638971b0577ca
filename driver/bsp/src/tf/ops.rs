//! sunxi SD/MMC 控制器原语
//!
//! 控制器命令下发、时钟/总线宽度编程与卡检测由寄存器层实现（`SunxiMmc`），本模块只定义
//! 控制器原生的命令/数据描述与它们使用的位掩码。

use bitflags::bitflags;

bitflags! {
    /// 控制器原生响应类型位：响应是否存在、136 位长响应、CRC、busy、响应含 opcode
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RespFlags: u32 {
        const PRESENT = 1 << 0;
        const LONG_136 = 1 << 1;
        const CRC = 1 << 2;
        const BUSY = 1 << 3;
        const OPCODE = 1 << 4;
    }
}

impl RespFlags {
    pub const NONE: Self = Self::empty();
    pub const R1: Self = Self::PRESENT.union(Self::CRC).union(Self::OPCODE);
    pub const R1B: Self = Self::R1.union(Self::BUSY);
    pub const R2: Self = Self::PRESENT.union(Self::LONG_136).union(Self::CRC);
    pub const R3: Self = Self::PRESENT;
    pub const R4: Self = Self::PRESENT;
    pub const R5: Self = Self::R1;
    pub const R6: Self = Self::R1;
    pub const R7: Self = Self::R1;
}

bitflags! {
    /// 控制器原生数据方向位（注意与总线层编码相反：原生 bit0 = 读）
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DataFlags: u32 {
        const READ = 1 << 0;
        const WRITE = 1 << 1;
    }
}

/// 控制器原生命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeCmd {
    pub cmdidx: u16,
    pub resp_type: RespFlags,
    pub cmdarg: u32,
    /// 完成后由控制器填充
    pub response: [u32; 4],
}

/// 数据缓冲：读目的与写源互斥
#[derive(Debug)]
pub enum NativeBuf<'a> {
    Dest(&'a mut [u8]),
    Src(&'a [u8]),
}

impl NativeBuf<'_> {
    pub fn len(&self) -> usize {
        match self {
            NativeBuf::Dest(b) => b.len(),
            NativeBuf::Src(b) => b.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 控制器原生数据描述
#[derive(Debug)]
pub struct NativeData<'a> {
    pub buf: NativeBuf<'a>,
    pub flags: DataFlags,
    pub blocks: u32,
    pub blocksize: u32,
}

/// sunxi SD/MMC 控制器寄存器层
///
/// 请求路径与热插拔监控线程会并发调用（后者只调 `getcd`），实现方需自行保证寄存器访问安全。
pub trait SunxiMmc: Send + Sync {
    /// 下发命令（可带数据阶段），0 表示成功，否则为错误码；成功时填 `cmd.response`
    fn send_cmd(&self, cmd: &mut NativeCmd, data: Option<&mut NativeData<'_>>) -> i32;

    /// 控制器完整复位与初始化
    fn core_init(&self) -> i32;

    /// 编程时钟与总线宽度；`clock == 0` 表示只改宽度，`bus_width` 为数据线数（1/4/8）
    fn set_ios(&self, clock: u32, bus_width: u32);

    /// 卡检测线当前电平（true = 卡在位）
    fn getcd(&self) -> bool;
}
