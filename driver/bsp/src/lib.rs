//! Allwinner V3s 板级支持包
//!
//! 功能包括:
//! - TF 卡 host 驱动：请求翻译、时钟/总线宽度、卡检测、热插拔挂载监控 (`tf`)
//! - SDC0 引脚复用 (`gpio`)
//! - 中断向量表与 GIC 屏蔽 (`irq`)
//! - 系统 tick (`tick`)
//! - 板级启动顺序 (`board`)
//! - 看门狗重启 (`wdt`)
//!
//! 寄存器级操作（控制器、GIC、定时器、看门狗、pinctrl）都在 trait 后面，由平台实现；
//! 本 crate 只决定调用顺序与状态。

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod board;
pub mod gpio;
pub mod irq;
pub mod sync;
pub mod tf;
pub mod tick;
pub mod wdt;

pub use board::{board_init, BoardOps, CONSOLE_DEVICE_NAME, HEAP_END};
pub use gpio::{sdc0_pinmux, sunxi_pin, Bank, PinMux};
pub use irq::{Gic, IrqInfo, IrqTable, IsrHandler, MAX_HANDLERS};
pub use sync::{delay_spin_ms, Sleeper, SpinSleeper, TaskEntry, TaskSpawner, LOOPS_PER_MS};
pub use tf::{tf_init, HostState, MonitorConfig, SunxiMmc, TaskConfig, TfConfig, TfEnv};
pub use tick::{tick_get, tick_init, TickTimer, TICK_IRQ, TICK_PER_SECOND};
pub use wdt::{reboot, Watchdog};
