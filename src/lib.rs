//! V3s board crate
//!
//! 整合板级支持与 TF 卡驱动：
//! - bsp: 板级启动、中断、tick、看门狗、TF 卡 host 驱动与热插拔监控
//! - mmc: 总线层类型与 host 接口
//! - dfs: 挂载接口

#![cfg_attr(not(test), no_std)]

extern crate alloc;

use alloc::sync::Arc;

use axerrno::AxResult;
use bsp::{BoardOps, HostState, IrqTable, SunxiMmc, TfConfig, TfEnv};

pub use bsp;
pub use dfs;
pub use mmc;

/// 全局中断向量表，中断入口经此分发
pub static IRQ_TABLE: IrqTable = IrqTable::new();

/// 启动完成后的板级上下文
pub struct V3sBoard<C: SunxiMmc> {
    /// SDC0 host 状态（错误计数、在位、时钟）
    pub tf: Arc<HostState<C>>,
}

impl<C: SunxiMmc> V3sBoard<C> {
    pub fn tf(&self) -> &HostState<C> {
        &self.tf
    }
}

/// 板级启动后注册 TF 卡驱动
///
/// `board_init` 失败时不注册 TF 卡；TF 卡注册失败时板级部分已完成，错误原样返回。
pub fn bring_up<C, P>(
    board: &dyn BoardOps,
    irqs: &IrqTable,
    heap_begin: usize,
    env: TfEnv<'_>,
    cfg: &TfConfig,
    probe: P,
) -> AxResult<V3sBoard<C>>
where
    C: SunxiMmc + 'static,
    P: FnOnce(u32) -> Option<C>,
{
    bsp::board_init(board, irqs, heap_begin)?;
    let tf = bsp::tf_init(env, cfg, probe).map_err(|e| {
        log::error!(target: "v3s_board", "tf init failed: {:?}", e);
        e
    })?;
    log::info!(
        target: "v3s_board",
        "bring-up done, sd{} {}",
        cfg.sdc_no,
        if tf.is_present() { "present" } else { "absent" }
    );
    Ok(V3sBoard { tf })
}
