//! 系统 tick：timer0 周期中断 → tick 计数
//!
//! timer0 以 24MHz 晶振为源、自动重装，每秒 `TICK_PER_SECOND` 次中断（IRQ 50）。

use core::sync::atomic::{AtomicU64, Ordering};
use core::time::Duration;

use spin::Once;

use crate::irq::{Gic, IrqTable};
use axerrno::AxResult;

/// 每秒 tick 数
pub const TICK_PER_SECOND: u32 = 100;
/// timer0 中断号
pub const TICK_IRQ: usize = 50;
/// timer 时钟源频率（OSC24M）
pub const TIMER_CLOCK: u32 = 24_000_000;

/// 定时器寄存器操作
pub trait TickTimer: Send + Sync {
    /// 以 `hz` 频率启动周期中断
    fn init(&self, hz: u32);
    /// 清中断挂起位
    fn ack(&self);
}

static TICKS: AtomicU64 = AtomicU64::new(0);
static TICK_TIMER: Once<&'static dyn TickTimer> = Once::new();

/// 开机以来的 tick 数
pub fn tick_get() -> u64 {
    TICKS.load(Ordering::Acquire)
}

pub fn tick_increase() {
    TICKS.fetch_add(1, Ordering::AcqRel);
}

/// 每 tick 的定时器装载值
pub const fn timer_load_value(hz: u32) -> u32 {
    TIMER_CLOCK / hz
}

pub fn ticks_to_duration(ticks: u64) -> Duration {
    Duration::from_millis(ticks.saturating_mul(1000) / u64::from(TICK_PER_SECOND))
}

/// 向上取整，非零时长至少 1 tick
pub fn duration_to_ticks(dur: Duration) -> u64 {
    let ms = u64::try_from(dur.as_millis()).unwrap_or(u64::MAX);
    ms.saturating_mul(u64::from(TICK_PER_SECOND)).div_ceil(1000)
}

fn clock_irq(_vector: usize, _param: usize) {
    if let Some(timer) = TICK_TIMER.get() {
        timer.ack();
    }
    tick_increase();
}

/// 启动 tick：编程定时器、安装中断处理并使能
pub fn tick_init(timer: &'static dyn TickTimer, irqs: &IrqTable, gic: &dyn Gic) -> AxResult<()> {
    TICK_TIMER.call_once(|| timer);
    timer.init(TICK_PER_SECOND);
    irqs.install(TICK_IRQ, clock_irq, 0, "tick")?;
    irqs.umask(gic, TICK_IRQ);
    log::info!(
        target: "bsp::tick",
        "tick: {}Hz, load={}, irq={}",
        TICK_PER_SECOND,
        timer_load_value(TICK_PER_SECOND),
        TICK_IRQ
    );
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::irq::tests::FakeGic;
    use core::sync::atomic::AtomicU32;

    pub struct FakeTimer {
        pub hz: AtomicU32,
        pub acks: AtomicU32,
    }

    impl TickTimer for FakeTimer {
        fn init(&self, hz: u32) {
            self.hz.store(hz, Ordering::SeqCst);
        }
        fn ack(&self) {
            self.acks.fetch_add(1, Ordering::SeqCst);
        }
    }

    pub static TIMER: FakeTimer = FakeTimer {
        hz: AtomicU32::new(0),
        acks: AtomicU32::new(0),
    };

    #[test]
    fn conversions() {
        assert_eq!(timer_load_value(100), 240_000);
        assert_eq!(ticks_to_duration(250), Duration::from_millis(2500));
        assert_eq!(duration_to_ticks(Duration::from_secs(10)), 1000);
        assert_eq!(duration_to_ticks(Duration::from_millis(1)), 1);
        assert_eq!(duration_to_ticks(Duration::ZERO), 0);
    }

    #[test]
    fn tick_irq_acks_and_counts() {
        let irqs = IrqTable::new();
        let gic = FakeGic::default();
        tick_init(&TIMER, &irqs, &gic).unwrap();
        assert_eq!(TIMER.hz.load(Ordering::SeqCst), TICK_PER_SECOND);

        let before = tick_get();
        let acks = TIMER.acks.load(Ordering::SeqCst);
        assert!(irqs.dispatch(TICK_IRQ));
        assert!(irqs.dispatch(TICK_IRQ));
        assert!(tick_get() >= before + 2);
        assert!(TIMER.acks.load(Ordering::SeqCst) >= acks + 2);
    }
}
