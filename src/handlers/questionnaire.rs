use crate::models::*;
use crate::services::QuestionnaireService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    post,
    path = "/submit",
    tag = "questionnaire",
    request_body = QuestionnaireEntry,
    responses(
        (status = 200, description = "信息提交成功", body = MessageResponse),
        (status = 500, description = "数据保存失败", body = ApiErrorResponse)
    )
)]
pub async fn submit(
    service: web::Data<QuestionnaireService>,
    body: web::Json<QuestionnaireEntry>,
) -> Result<HttpResponse> {
    match service.submit(&body).await {
        Ok(()) => Ok(HttpResponse::Ok().json(MessageResponse::new(
            "Submitted, proceeding to the draw",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/questionnaire",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "获取问卷数据", body = QuestionnaireResponse),
        (status = 500, description = "无法读取问卷数据文件", body = ApiErrorResponse)
    )
)]
pub async fn list_entries(service: web::Data<QuestionnaireService>) -> Result<HttpResponse> {
    match service.read_all().await {
        Ok(table) => Ok(HttpResponse::Ok().json(QuestionnaireResponse {
            success: true,
            table,
        })),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn questionnaire_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/submit", web::post().to(submit));
}

pub fn questionnaire_admin_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/questionnaire", web::get().to(list_entries));
}
