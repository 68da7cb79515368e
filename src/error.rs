use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Identifier has already participated")]
    AlreadyParticipated,

    #[error("All prizes have been drawn")]
    PrizesExhausted,

    /// 抽中的奖品在提交前被删除，不能发放未扣减库存的奖品
    #[error("Prize vanished before commit: {0}")]
    PrizeVanished(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Out of stock: {0}")]
    OutOfStock(String),

    /// 内存状态已变更，但写盘失败（内存可能领先于磁盘）
    #[error("Persistence error: {0}")]
    PersistenceError(String),

    #[error("Auth error: {0}")]
    AuthError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::AlreadyParticipated => "ALREADY_PARTICIPATED",
            AppError::PrizesExhausted => "PRIZES_EXHAUSTED",
            AppError::PrizeVanished(_) => "PRIZE_VANISHED",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::OutOfStock(_) => "OUT_OF_STOCK",
            AppError::PersistenceError(_) => "PERSISTENCE_ERROR",
            AppError::AuthError(_) => "AUTH_ERROR",
            _ => "INTERNAL_ERROR",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::AlreadyParticipated => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::OutOfStock(_) => StatusCode::CONFLICT,
            AppError::AuthError(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::ValidationError(msg) => {
                log::warn!("Validation error: {msg}");
                msg.clone()
            }
            AppError::AlreadyParticipated => {
                log::warn!("Rejected draw: identifier already participated");
                "You have already taken part in the draw".to_string()
            }
            AppError::PrizesExhausted => {
                log::warn!("Rejected draw: prize pool exhausted");
                "All prizes have been drawn".to_string()
            }
            AppError::PrizeVanished(msg) => {
                log::error!("Prize vanished during draw: {msg}");
                format!("Selected prize no longer exists, nothing was granted: {msg}")
            }
            AppError::NotFound(msg) => msg.clone(),
            AppError::OutOfStock(msg) => msg.clone(),
            AppError::PersistenceError(msg) => {
                log::error!("Persistence error: {msg}");
                format!("State changed in memory but may not be durable: {msg}")
            }
            AppError::AuthError(msg) => {
                log::warn!("Authentication error: {msg}");
                msg.clone()
            }
            _ => {
                log::error!("Internal error: {self}");
                "Internal server error".to_string()
            }
        };

        HttpResponse::build(self.status_code()).json(json!({
            "success": false,
            "error": {
                "code": self.code(),
                "message": message
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_are_distinct_per_outcome() {
        assert_eq!(
            AppError::ValidationError("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::AlreadyParticipated.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::PrizesExhausted.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(AppError::PrizesExhausted.code(), "PRIZES_EXHAUSTED");
        assert_eq!(
            AppError::PersistenceError("disk".into()).code(),
            "PERSISTENCE_ERROR"
        );
        assert_eq!(
            AppError::NotFound("p".into()).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_internal_variants_share_code() {
        let err = AppError::Io(std::io::Error::other("boom"));
        assert_eq!(err.code(), "INTERNAL_ERROR");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
