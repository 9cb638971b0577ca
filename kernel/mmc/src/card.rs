//! MMC 卡抽象
//!
//! 枚举完成后总线层持有 card；host 驱动只关心“卡对象是否存在”与 RCA。

/// 相对卡地址（SD 规范 CMD3 返回）
pub type Rca = u16;

/// 卡类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardType {
    Mmc,
    Sd,
    Sdio,
    SdCombo,
}

/// MMC/SD 卡信息（枚举结果）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MmcCard {
    pub rca: Rca,
    pub card_type: CardType,
}

impl MmcCard {
    pub const fn new(rca: Rca, card_type: CardType) -> Self {
        Self { rca, card_type }
    }
}
