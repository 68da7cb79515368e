use crate::models::*;
use crate::services::DrawService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    post,
    path = "/draw",
    tag = "draw",
    request_body = DrawRequest,
    responses(
        (status = 200, description = "抽奖成功", body = DrawResponse),
        (status = 400, description = "未提供手机号", body = ApiErrorResponse),
        (status = 403, description = "已参与过抽奖", body = ApiErrorResponse),
        (status = 500, description = "奖品已抽完、奖品已被删除或保存失败", body = ApiErrorResponse)
    )
)]
/// 每个手机号只能抽一次
pub async fn draw(
    service: web::Data<DrawService>,
    body: web::Json<DrawRequest>,
) -> Result<HttpResponse> {
    match service.draw(body.phone.as_deref()).await {
        Ok(outcome) => Ok(HttpResponse::Ok().json(DrawResponse::from(outcome))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn draw_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/draw", web::post().to(draw));
}
