mod api;
mod config;
mod error;
mod handlers;
mod prompts;
mod provider;
mod services;

use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;

use config::Config;
use provider::{InferenceProvider, WorkersAiProvider};

/// Request bodies up to this size are accepted; `analyze` drafts may embed
/// base64 images.
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/* ---------- Shared State ---------- */
pub struct AppState {
    pub provider: Arc<dyn InferenceProvider>,
}

/// Permissive CORS headers attached to every response, errors included.
pub fn cors_headers() -> middleware::DefaultHeaders {
    middleware::DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Access-Control-Allow-Methods", "POST, OPTIONS"))
        .add(("Access-Control-Allow-Headers", "Content-Type"))
}

/* ---------- main ---------- */
#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;
    let provider: Arc<dyn InferenceProvider> = Arc::new(WorkersAiProvider::new(&config));
    let app_state = web::Data::new(AppState { provider });

    log::info!(
        "Relay starting at http://{}:{} (provider {})",
        config.bind_addr,
        config.port,
        config.api_base_url
    );

    HttpServer::new(move || {
        App::new()
            .wrap(cors_headers())
            .wrap(middleware::Logger::default())
            .app_data(app_state.clone())
            .app_data(web::PayloadConfig::new(MAX_BODY_BYTES))
            .default_service(web::to(handlers::dispatch))
    })
    .bind((config.bind_addr.as_str(), config.port))?
    .run()
    .await?;
    Ok(())
}
