use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct DeleteRecordRequest {
    #[serde(default, deserialize_with = "super::lenient_string")]
    pub phone: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecordListResponse {
    pub success: bool,
    pub records: Vec<String>,
}
