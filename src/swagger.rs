use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::draw::draw,
        handlers::questionnaire::submit,
        handlers::questionnaire::list_entries,
        handlers::prize::list_prizes,
        handlers::prize::create_prize,
        handlers::prize::update_prize,
        handlers::prize::delete_prize,
        handlers::record::list_records,
        handlers::record::delete_record,
    ),
    components(
        schemas(
            Prize,
            CreatePrizeRequest,
            UpdatePrizeRequest,
            PrizeListResponse,
            PrizeMutationResponse,
            DrawRequest,
            DrawResponse,
            DeleteRecordRequest,
            RecordListResponse,
            QuestionnaireEntry,
            QuestionnaireTable,
            QuestionnaireResponse,
            MessageResponse,
            ApiError,
            ApiErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "draw", description = "Lottery draw API"),
        (name = "questionnaire", description = "Questionnaire submission API"),
        (name = "admin", description = "Prize and lottery record management API"),
    ),
    info(
        title = "Lottery Backend API",
        version = "0.1.0",
        description = "One draw per participant from a weighted prize pool"
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
