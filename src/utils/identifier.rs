use crate::error::{AppError, AppResult};

/// 规范化参与者标识（通常为手机号）：去除首尾空白，空值视为缺失
pub fn normalize_identifier(identifier: Option<&str>) -> AppResult<String> {
    match identifier.map(str::trim) {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(AppError::ValidationError(
            "Missing participant identifier (phone)".to_string(),
        )),
    }
}
