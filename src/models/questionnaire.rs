use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// 问卷提交内容，缺失字段按空字符串写入
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct QuestionnaireEntry {
    #[serde(default, deserialize_with = "super::lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "super::lenient_string")]
    pub department: Option<String>,
    #[serde(default, deserialize_with = "super::lenient_string")]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "super::lenient_string")]
    pub organization: Option<String>,
    #[serde(default, deserialize_with = "super::lenient_string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "super::lenient_string")]
    pub email: Option<String>,
}

impl QuestionnaireEntry {
    /// 与表头顺序一致的字段
    pub fn fields(&self) -> [&str; 6] {
        [
            self.name.as_deref().unwrap_or_default(),
            self.department.as_deref().unwrap_or_default(),
            self.position.as_deref().unwrap_or_default(),
            self.organization.as_deref().unwrap_or_default(),
            self.phone.as_deref().unwrap_or_default(),
            self.email.as_deref().unwrap_or_default(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct QuestionnaireTable {
    pub headers: Vec<String>,
    pub data: Vec<BTreeMap<String, String>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionnaireResponse {
    pub success: bool,
    #[serde(flatten)]
    pub table: QuestionnaireTable,
}
