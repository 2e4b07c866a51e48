mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod routes;
mod state;
mod structs;
mod utils;

use crate::config::AppConfig;
use crate::state::app_state::AppState;
use actix_cors::Cors;
use actix_web::{App, HttpServer, http, middleware::Logger, web};
use anyhow::Context;
use dotenv::dotenv;
use env_logger::Env;
use routes::init_routes;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().context("Invalid configuration")?;
    log::info!(
        "QR API at {}, generation mode {:?}",
        config.api_base,
        config.generation_mode
    );

    // Create shared state
    let app_state = web::Data::new(AppState::from_config(&config));
    let origins = config.cors_origins.clone();

    // Start the Actix Web server
    HttpServer::new(move || {
        let logger = Logger::new("%a \"%r\" %s %b \"%{Referer}i\" \"%{User-Agent}i\" %D ms");
        let cors = origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "DELETE"])
            .allowed_headers(vec![http::header::ACCEPT])
            .allowed_header(http::header::CONTENT_TYPE)
            .max_age(3600);
        App::new()
            .wrap(logger)
            .wrap(cors)
            .app_data(app_state.clone())
            .configure(init_routes)
    })
    .bind((config.bind_addr.as_str(), config.port))
    .with_context(|| format!("Failed to bind {}:{}", config.bind_addr, config.port))?
    .run()
    .await
    .context("Server error")
}
