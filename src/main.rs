use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::Context;
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use lottery_backend::{
    config::Config,
    handlers,
    middlewares::{AdminAuthMiddleware, create_cors},
    services::*,
    storage::{InventoryStore, LedgerStore, QuestionnaireLog},
    swagger::swagger_config,
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // 加载配置
    let config = Config::from_toml().context("Failed to load configuration")?;

    // 奖品库存是必需配置，加载失败直接退出
    let inventory = match InventoryStore::load(&config.storage.prizes_file).await {
        Ok(inventory) => inventory,
        Err(e) => {
            log::error!("Failed to load prize inventory: {e}");
            return Err(e).context("Prize inventory is required to serve draws");
        }
    };
    let ledger = LedgerStore::load(&config.storage.records_file)
        .await
        .context("Failed to load lottery records")?;
    let questionnaire = QuestionnaireLog::init(&config.storage.questionnaire_file)
        .await
        .context("Failed to initialize questionnaire file")?;

    let state = LotteryState::new(inventory, ledger).into_shared();
    let draw_service = DrawService::new(state.clone());
    let admin_service = AdminService::new(state);
    let questionnaire_service = QuestionnaireService::new(questionnaire);

    if config.admin.token.is_none() {
        log::warn!("No admin token configured, admin API under /api is unauthenticated");
    }
    let admin_token = config.admin.token.clone();

    // 启动HTTP服务器
    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .app_data(web::Data::new(draw_service.clone()))
            .app_data(web::Data::new(admin_service.clone()))
            .app_data(web::Data::new(questionnaire_service.clone()))
            .configure(swagger_config)
            .configure(handlers::draw_config)
            .configure(handlers::questionnaire_config)
            .service(
                web::scope("/api")
                    .configure(handlers::prize_config)
                    .configure(handlers::record_config)
                    .configure(handlers::questionnaire_admin_config)
                    .wrap(AdminAuthMiddleware::new(admin_token.clone())),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await?;

    Ok(())
}
