mod cors;

use actix_web::{
    App, HttpServer,
    web::{self},
};
use api_chat::services::llm::OpenAiClient;
use common::env_config::Config;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // get env vars
    let config = Config::from_env();
    let config_data = config.clone();

    // get info
    let is_production = config.is_production();
    let origin = config.cors_allowed_origin.clone();
    let cookie_secure = !origin.contains("localhost");

    // init logger
    if config.console_logging_enabled {
        logger::setup().expect("Failed to set up logger");
    }

    // init db connection
    let pool = db::setup(&config.database_url, is_production)
        .await
        .expect("Failed to set up database");

    // one HTTP client for every chat request
    let llm_client =
        web::Data::new(OpenAiClient::new(&config.llm).expect("Failed to build LLM client"));
    if config.llm.api_key.is_empty() {
        log::warn!("LLM_API_KEY is not set, chat replies will fail");
    }
    if config.stripe_secret_key.is_empty() {
        log::warn!("STRIPE_SECRET_KEY is not set, checkout and portal will fail");
    }

    log::info!(
        "Kitchen Spark listening on {}:{}",
        config.server_host,
        config.server_port
    );

    HttpServer::new(move || {
        let secret = config_data.jwt_config.secret.as_bytes();
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(config_data.clone()))
            .app_data(llm_client.clone())
            .wrap(limiter::global_middleware(config_data.rate_limit_per_second)) // 5th
            .wrap(logger::middleware(config_data.console_logging_enabled)) // 4th
            .wrap(extractor::middleware(config_data.jwt_config.secret.clone())) // 3rd
            .wrap(cors::middleware(&origin)) // 2nd
            .wrap(api_auth::session_middleware(
                cookie_secure,
                is_production,
                secret,
            )) // 1st
            .service(
                web::scope("/api")
                    .service(api_auth::mount_auth())
                    .service(api_recipes::mount_recipes())
                    .service(api_market::mount_supermarket())
                    .service(api_subs::mount_plans())
                    .service(api_subs::mount_webhook())
                    .service(
                        web::scope("/account")
                            .wrap(api_auth::auth_middleware())
                            .service(api_auth::mount_account())
                            .service(api_recipes::mount_saved())
                            .service(api_shopping::mount_shopping())
                            .service(api_chat::mount_chat())
                            .service(api_subs::mount_subs())
                            .service(api_planner::mount_alerts())
                            .service(api_planner::mount_meals())
                            .service(api_admin::mount_admin()),
                    ),
            )
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .workers(config.num_workers)
    .run()
    .await
}
