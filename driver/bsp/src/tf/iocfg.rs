//! I/O 配置（时钟 / 总线宽度）
//!
//! 时钟变化：控制器完整复位后再编程时钟与宽度。仅宽度变化：`set_ios(0, width)` 只改宽度，
//! 不重新编程时钟（该控制器上重设时钟代价高，且会干扰进行中的传输）。
//! 电源关闭时不做任何事，下电由总线层负责。

use mmc::{IoCfg, PowerMode};

use super::host::HostState;
use super::ops::SunxiMmc;

/// `configure` 实际采取的动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoAction {
    /// 电源关闭，未动控制器
    PowerOff,
    /// 时钟与宽度都未变
    Unchanged,
    /// 完整复位 + 时钟 + 宽度
    Reinit { clock: u32, lanes: u32 },
    /// 只改宽度
    WidthOnly { lanes: u32 },
}

impl<C: SunxiMmc> HostState<C> {
    pub fn configure(&self, cfg: &IoCfg) -> IoAction {
        if cfg.power_mode == PowerMode::Off {
            return IoAction::PowerOff;
        }
        let lanes = cfg.bus_width.lanes();
        if cfg.clock != self.clock() {
            let ret = self.controller().core_init();
            if ret != 0 {
                log::warn!(target: "bsp::tf", "core_init failed: {}", ret);
            }
            self.controller().set_ios(cfg.clock, lanes);
            self.set_clock(cfg.clock);
            self.set_bus_width(cfg.bus_width);
            log::debug!(target: "bsp::tf", "set_iocfg: clock={} width={}", cfg.clock, lanes);
            IoAction::Reinit {
                clock: cfg.clock,
                lanes,
            }
        } else if cfg.bus_width != self.bus_width() {
            self.controller().set_ios(0, lanes);
            self.set_bus_width(cfg.bus_width);
            log::debug!(target: "bsp::tf", "set_iocfg: width={}", lanes);
            IoAction::WidthOnly { lanes }
        } else {
            IoAction::Unchanged
        }
    }
}
