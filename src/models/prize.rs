use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 库存无限的哨兵值
pub const UNLIMITED_QUANTITY: i64 = -1;

/// 奖品
/// - quantity: 剩余库存，-1 表示无限，其它值不可为负
/// - probability: 权重，无需归一化，抽奖时按当前可用奖品的权重和归一
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Prize {
    /// 创建时生成，之后不可变；旧数据可能缺失，加载时补齐
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[schema(example = 10)]
    pub quantity: i64,
    #[schema(example = 0.25)]
    pub probability: f64,
}

impl Prize {
    pub fn is_unlimited(&self) -> bool {
        self.quantity == UNLIMITED_QUANTITY
    }

    /// 是否可参与抽奖 (无限库存或剩余 > 0)
    pub fn is_available(&self) -> bool {
        self.is_unlimited() || self.quantity > 0
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreatePrizeRequest {
    pub name: Option<String>,
    pub quantity: Option<i64>,
    pub probability: Option<f64>,
}

/// 部分更新，未提供的字段保持不变
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdatePrizeRequest {
    pub name: Option<String>,
    pub quantity: Option<i64>,
    pub probability: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PrizeListResponse {
    pub success: bool,
    pub prizes: Vec<Prize>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PrizeMutationResponse {
    pub success: bool,
    pub message: String,
    pub prize: Prize,
}
