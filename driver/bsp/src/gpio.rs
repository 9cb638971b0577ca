//! sunxi 引脚编号与复用
//!
//! 引脚复用寄存器的具体编程由 pinctrl 驱动完成（`PinMux`），本模块只给出编号与模式字的编码，
//! 以及 SD 卡槽（SDC0，PF0..PF5）的复用配置。

/// 每个 GPIO bank 的引脚数
pub const SUNXI_GPIO_BANK_NR: u32 = 32;

/// GPIO bank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Bank {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
    I = 8,
}

/// 全局引脚号：bank 起始 + 序号
pub const fn sunxi_pin(bank: Bank, nr: u32) -> u32 {
    (bank as u32) * SUNXI_GPIO_BANK_NR + nr
}

/// 模式字：bit0 置位时选择复用功能，bit1 置位时设置上下拉
pub mod mode {
    /// PF 口 SDC0 功能号
    pub const GPF_SDC0: u32 = 2;

    /// 选择复用功能
    pub const fn pin_type(func: u32) -> u32 {
        0x1 | (func << 4)
    }

    pub const PULL_UP: u32 = 0x2 | (1 << 8);
}

/// 引脚复用控制（由 pinctrl 驱动实现）
pub trait PinMux {
    fn set_mode(&self, pin: u32, mode: u32) -> Result<(), i32>;
}

/// SDC0 数据/命令/时钟线：PF0..PF5
pub const SDC0_PINS: [u32; 6] = [
    sunxi_pin(Bank::F, 0),
    sunxi_pin(Bank::F, 1),
    sunxi_pin(Bank::F, 2),
    sunxi_pin(Bank::F, 3),
    sunxi_pin(Bank::F, 4),
    sunxi_pin(Bank::F, 5),
];

/// SDC0 引脚模式：SDC0 功能 + 上拉
pub const SDC0_PIN_MODE: u32 = mode::pin_type(mode::GPF_SDC0) | mode::PULL_UP;

/// 把 PF0..PF5 切到 SDC0 并上拉；单个引脚失败只告警，返回失败引脚数
pub fn sdc0_pinmux(pinmux: &dyn PinMux) -> usize {
    let mut failed = 0;
    for pin in SDC0_PINS {
        if let Err(e) = pinmux.set_mode(pin, SDC0_PIN_MODE) {
            log::warn!(target: "bsp::gpio", "set_mode(pin={}) failed: {}", pin, e);
            failed += 1;
        }
    }
    failed
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use spin::Mutex;

    struct RecordingMux {
        set: Mutex<Vec<(u32, u32)>>,
        fail_pin: Option<u32>,
    }

    impl PinMux for RecordingMux {
        fn set_mode(&self, pin: u32, mode: u32) -> Result<(), i32> {
            self.set.lock().push((pin, mode));
            if Some(pin) == self.fail_pin {
                Err(-22)
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn pin_numbering() {
        assert_eq!(sunxi_pin(Bank::A, 0), 0);
        assert_eq!(sunxi_pin(Bank::F, 0), 160);
        assert_eq!(sunxi_pin(Bank::F, 5), 165);
    }

    #[test]
    fn sdc0_mode_word() {
        assert_eq!(SDC0_PIN_MODE, 0x1 | (2 << 4) | 0x2 | (1 << 8));
    }

    #[test]
    fn sdc0_pinmux_continues_after_failure() {
        let mux = RecordingMux {
            set: Mutex::new(Vec::new()),
            fail_pin: Some(162),
        };
        assert_eq!(sdc0_pinmux(&mux), 1);
        let set = mux.set.lock();
        assert_eq!(set.len(), 6);
        assert!(set.iter().all(|&(_, m)| m == SDC0_PIN_MODE));
        assert_eq!(set[0].0, 160);
    }
}
