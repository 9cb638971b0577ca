//! 中断向量表与 GIC 屏蔽控制
//!
//! 向量表由 `IrqTable` 维护（160 项），GIC 分发器的寄存器编程在 `Gic` 后面。

use axerrno::{AxError, AxResult};
use spin::Mutex;

/// 向量表大小
pub const MAX_HANDLERS: usize = 160;

/// 中断处理函数：`(vector, param)`
pub type IsrHandler = fn(usize, usize);

/// GIC 分发器操作
pub trait Gic: Send + Sync {
    fn init(&self);
    fn set_priority(&self, irq: usize, priority: u8);
    /// false = 非安全中断
    fn set_security(&self, irq: usize, secure: bool);
    fn set_cpu_target(&self, irq: usize, cpu: usize, enable: bool);
    fn enable_irq(&self, irq: usize, enable: bool);
}

#[derive(Debug, Clone, Copy)]
struct IrqDesc {
    handler: IsrHandler,
    param: usize,
    name: &'static str,
    counter: u32,
}

/// 已安装中断的快照
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IrqInfo {
    pub vector: usize,
    pub name: &'static str,
    pub param: usize,
    pub counter: u32,
}

pub struct IrqTable {
    descs: Mutex<[Option<IrqDesc>; MAX_HANDLERS]>,
}

impl IrqTable {
    pub const fn new() -> Self {
        Self {
            descs: Mutex::new([None; MAX_HANDLERS]),
        }
    }

    /// 初始化 GIC 并清空向量表
    pub fn init(&self, gic: &dyn Gic) {
        gic.init();
        *self.descs.lock() = [None; MAX_HANDLERS];
    }

    /// 安装处理函数，返回被替换的旧处理函数
    pub fn install(
        &self,
        vector: usize,
        handler: IsrHandler,
        param: usize,
        name: &'static str,
    ) -> AxResult<Option<IsrHandler>> {
        let mut descs = self.descs.lock();
        let slot = descs.get_mut(vector).ok_or_else(|| {
            log::warn!(target: "bsp::irq", "install {}: vector {} out of range", name, vector);
            AxError::InvalidInput
        })?;
        let old = slot.map(|d| d.handler);
        *slot = Some(IrqDesc {
            handler,
            param,
            name,
            counter: 0,
        });
        Ok(old)
    }

    /// 使能：优先级 0、非安全、路由到 CPU0
    pub fn umask(&self, gic: &dyn Gic, vector: usize) {
        gic.set_priority(vector, 0);
        gic.set_security(vector, false);
        gic.set_cpu_target(vector, 0, true);
        gic.enable_irq(vector, true);
    }

    pub fn mask(&self, gic: &dyn Gic, vector: usize) {
        gic.enable_irq(vector, false);
        gic.set_cpu_target(vector, 0, false);
    }

    /// 在中断入口调用；未安装处理函数时返回 false
    pub fn dispatch(&self, vector: usize) -> bool {
        // 调用处理函数前释放锁，处理函数内可再安装
        let desc = {
            let mut descs = self.descs.lock();
            match descs.get_mut(vector).and_then(|d| d.as_mut()) {
                Some(d) => {
                    d.counter = d.counter.wrapping_add(1);
                    *d
                }
                None => return false,
            }
        };
        (desc.handler)(vector, desc.param);
        true
    }

    /// 列出已安装的中断
    pub fn for_each_installed<F: FnMut(IrqInfo)>(&self, mut f: F) {
        let descs = self.descs.lock();
        for (vector, d) in descs.iter().enumerate() {
            if let Some(d) = d {
                f(IrqInfo {
                    vector,
                    name: d.name,
                    param: d.param,
                    counter: d.counter,
                });
            }
        }
    }
}

impl Default for IrqTable {
    fn default() -> Self {
        Self::new()
    }
}
