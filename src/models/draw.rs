use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 抽奖请求，参与者标识沿用前端的 phone 字段
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct DrawRequest {
    #[schema(example = "13800138000")]
    #[serde(default, deserialize_with = "super::lenient_string")]
    pub phone: Option<String>,
}

/// 一次成功抽奖的结果
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DrawOutcome {
    pub prize_id: String,
    pub prize_name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DrawResponse {
    pub success: bool,
    /// 奖品显示名称
    pub prize: String,
}

impl From<DrawOutcome> for DrawResponse {
    fn from(outcome: DrawOutcome) -> Self {
        DrawResponse {
            success: true,
            prize: outcome.prize_name,
        }
    }
}
