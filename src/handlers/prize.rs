use crate::models::*;
use crate::services::AdminService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/api/prizes",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "获取全部奖品", body = PrizeListResponse),
        (status = 401, description = "未授权", body = ApiErrorResponse)
    )
)]
pub async fn list_prizes(service: web::Data<AdminService>) -> Result<HttpResponse> {
    let prizes = service.list_prizes().await;
    Ok(HttpResponse::Ok().json(PrizeListResponse {
        success: true,
        prizes,
    }))
}

#[utoipa::path(
    post,
    path = "/api/prizes",
    tag = "admin",
    request_body = CreatePrizeRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "奖品添加成功", body = PrizeMutationResponse),
        (status = 400, description = "缺少必要的奖品信息", body = ApiErrorResponse)
    )
)]
pub async fn create_prize(
    service: web::Data<AdminService>,
    body: web::Json<CreatePrizeRequest>,
) -> Result<HttpResponse> {
    match service.add_prize(body.into_inner()).await {
        Ok(prize) => Ok(HttpResponse::Created().json(PrizeMutationResponse {
            success: true,
            message: "Prize added".to_string(),
            prize,
        })),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/api/prizes/{id}",
    tag = "admin",
    params(("id" = String, Path, description = "奖品ID")),
    request_body = UpdatePrizeRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "奖品更新成功", body = PrizeMutationResponse),
        (status = 400, description = "字段非法", body = ApiErrorResponse),
        (status = 404, description = "未找到指定ID的奖品", body = ApiErrorResponse)
    )
)]
pub async fn update_prize(
    service: web::Data<AdminService>,
    path: web::Path<String>,
    body: web::Json<UpdatePrizeRequest>,
) -> Result<HttpResponse> {
    match service.update_prize(&path, body.into_inner()).await {
        Ok(prize) => Ok(HttpResponse::Ok().json(PrizeMutationResponse {
            success: true,
            message: "Prize updated".to_string(),
            prize,
        })),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/api/prizes/{id}",
    tag = "admin",
    params(("id" = String, Path, description = "奖品ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "奖品删除成功", body = MessageResponse),
        (status = 404, description = "未找到指定ID的奖品", body = ApiErrorResponse)
    )
)]
pub async fn delete_prize(
    service: web::Data<AdminService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match service.delete_prize(&path).await {
        Ok(prize) => Ok(HttpResponse::Ok().json(MessageResponse::new(format!(
            "Prize {} deleted",
            prize.name
        )))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn prize_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/prizes")
            .route(web::get().to(list_prizes))
            .route(web::post().to(create_prize)),
    )
    .service(
        web::resource("/prizes/{id}")
            .route(web::put().to(update_prize))
            .route(web::delete().to(delete_prize)),
    );
}
