//! 板级启动（V3s，64MiB DRAM）

use axerrno::AxResult;

use crate::irq::{Gic, IrqTable};
use crate::tick::{self, TickTimer};

const TARGET: &str = "bsp::board";

/// 堆结束地址
pub const HEAP_END: usize = 0x4380_0000;
pub const CONSOLE_DEVICE_NAME: &str = "uart0";
pub const DRAM_SIZE_MIB: usize = 64;

/// 平台相关的启动步骤
pub trait BoardOps {
    fn mmu_init(&self);
    fn gic(&self) -> &dyn Gic;
    fn heap_init(&self, begin: usize, end: usize);
    fn tick_timer(&self) -> &'static dyn TickTimer;
    /// 板级组件自动初始化
    fn components_init(&self);
    fn console_set_device(&self, name: &str);
    fn print_cpuinfo(&self);
}

/// 板级初始化
///
/// 顺序：MMU → GIC 与中断向量表 → 堆 → tick → 板级组件 → 控制台 → CPU 信息与 DRAM 大小。
pub fn board_init(ops: &dyn BoardOps, irqs: &IrqTable, heap_begin: usize) -> AxResult<()> {
    ops.mmu_init();
    irqs.init(ops.gic());
    ops.heap_init(heap_begin, HEAP_END);
    tick::tick_init(ops.tick_timer(), irqs, ops.gic())?;
    ops.components_init();
    ops.console_set_device(CONSOLE_DEVICE_NAME);
    ops.print_cpuinfo();
    log::info!(target: TARGET, "DRAM:  {} MiB", DRAM_SIZE_MIB);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::irq::tests::{FakeGic, GicCall};
    use crate::tick::{tests::TIMER, TICK_IRQ};
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;
    use spin::Mutex;

    #[derive(Default)]
    struct FakeBoard {
        gic: FakeGic,
        steps: Mutex<Vec<String>>,
    }

    impl FakeBoard {
        fn step(&self, s: &str) {
            self.steps.lock().push(s.to_string());
        }
    }

    impl BoardOps for FakeBoard {
        fn mmu_init(&self) {
            self.step("mmu");
        }
        fn gic(&self) -> &dyn Gic {
            &self.gic
        }
        fn heap_init(&self, begin: usize, end: usize) {
            self.step(&alloc::format!("heap {:#x}..{:#x}", begin, end));
        }
        fn tick_timer(&self) -> &'static dyn TickTimer {
            self.step("tick");
            &TIMER
        }
        fn components_init(&self) {
            self.step("components");
        }
        fn console_set_device(&self, name: &str) {
            self.step(&alloc::format!("console {}", name));
        }
        fn print_cpuinfo(&self) {
            self.step("cpuinfo");
        }
    }

    #[test]
    fn init_order() {
        let board = FakeBoard::default();
        let irqs = IrqTable::new();
        board_init(&board, &irqs, 0x4100_0000).unwrap();
        assert_eq!(
            *board.steps.lock(),
            [
                "mmu",
                "heap 0x41000000..0x43800000",
                "tick",
                "components",
                "console uart0",
                "cpuinfo",
            ]
        );
        let calls = board.gic.calls.lock();
        assert_eq!(calls[0], GicCall::Init);
        assert!(calls.contains(&GicCall::Enable(TICK_IRQ, true)));

        let mut installed = Vec::new();
        irqs.for_each_installed(|i| installed.push((i.vector, i.name)));
        assert_eq!(installed, [(TICK_IRQ, "tick")]);
    }
}
