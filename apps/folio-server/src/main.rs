//! # Folio Server
//!
//! The main entry point for the Actix-web HTTP server.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use folio_infra::{Argon2PasswordService, LocalObjectStorage};

mod cli;
mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;

use cli::Command;
use config::AppConfig;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Operator commands print to stdout, so they run before logging starts.
    let command = Command::from_args(std::env::args())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    if command == Command::HashPassword {
        let hash = cli::hash_password(std::io::stdin().lock(), &Argon2PasswordService::new())
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
        println!("{hash}");
        return Ok(());
    }

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!("Starting Folio server on {}:{}", config.host, config.port);

    let storage = Arc::new(LocalObjectStorage::new(
        &config.uploads.dir,
        config.uploads.public_url.clone(),
    ));
    let state = AppState::new(&config, storage).await;

    // Uploads addressed by a path are served from disk by this process.
    let media_path = config
        .uploads
        .public_url
        .starts_with('/')
        .then(|| config.uploads.public_url.clone());
    if media_path.is_none() {
        tracing::info!(url = %config.uploads.public_url, "Uploads are served externally");
    }

    let upload_dir = config.uploads.dir.clone();

    HttpServer::new(move || {
        let mut app = App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes(&state));
        if let Some(path) = &media_path {
            app = app.configure(handlers::configure_media(path.clone(), upload_dir.clone()));
        }
        app.default_service(handlers::page_shell())
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
