//! BSP 延时、睡眠与线程创建
//!
//! - **忙等延时**：无调度器时的近似 mdelay
//! - **Sleeper**：可被调度的有界睡眠（监控线程轮询间隔用）
//! - **TaskSpawner**：创建后台线程（由 RTOS 提供）

use alloc::boxed::Box;
use core::time::Duration;

use axerrno::AxResult;

/// 忙等延时的每毫秒循环数（无精确时钟时为启发式近似）
pub const LOOPS_PER_MS: u32 = 1000;

/// 忙等约 ms 毫秒，时长与 CPU 频率相关
#[inline]
pub fn delay_spin_ms(ms: u32) {
    let limit = ms.saturating_mul(LOOPS_PER_MS);
    for _ in 0..limit {
        core::hint::spin_loop();
    }
}

/// 让出 CPU 的有界睡眠
pub trait Sleeper: Send + Sync {
    fn sleep(&self, dur: Duration);
}

/// 调度器未就绪时的退化实现：按毫秒忙等
#[derive(Debug, Clone, Copy, Default)]
pub struct SpinSleeper;

impl Sleeper for SpinSleeper {
    fn sleep(&self, dur: Duration) {
        let ms = u32::try_from(dur.as_millis()).unwrap_or(u32::MAX);
        delay_spin_ms(ms);
    }
}

/// 后台线程入口
pub type TaskEntry = Box<dyn FnOnce() + Send + 'static>;

/// 创建并启动后台线程
pub trait TaskSpawner {
    /// `priority` 数值越大优先级越低；`tick` 为时间片
    fn spawn(
        &self,
        name: &'static str,
        stack_size: usize,
        priority: u8,
        tick: u32,
        entry: TaskEntry,
    ) -> AxResult<()>;
}
