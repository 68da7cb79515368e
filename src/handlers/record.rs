use crate::models::*;
use crate::services::AdminService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/api/records",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "获取抽奖记录", body = RecordListResponse)
    )
)]
pub async fn list_records(service: web::Data<AdminService>) -> Result<HttpResponse> {
    let records = service.list_records().await;
    Ok(HttpResponse::Ok().json(RecordListResponse {
        success: true,
        records,
    }))
}

#[utoipa::path(
    post,
    path = "/api/records/delete",
    tag = "admin",
    request_body = DeleteRecordRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "记录已删除，该手机号可再次抽奖", body = MessageResponse),
        (status = 400, description = "未提供手机号", body = ApiErrorResponse),
        (status = 404, description = "未找到该手机号的抽奖记录", body = ApiErrorResponse)
    )
)]
pub async fn delete_record(
    service: web::Data<AdminService>,
    body: web::Json<DeleteRecordRequest>,
) -> Result<HttpResponse> {
    match service.delete_record(body.phone.as_deref()).await {
        Ok(identifier) => Ok(HttpResponse::Ok().json(MessageResponse::new(format!(
            "Lottery record for {identifier} deleted"
        )))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn record_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/records", web::get().to(list_records))
        .route("/records/delete", web::post().to(delete_record));
}
