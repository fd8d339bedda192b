mod config;
mod db;
mod error;
mod models;
mod routes;
mod services;
mod utils;

use actix_web::{App, HttpServer, middleware::Logger, web};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::AppConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    if let Err(e) = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init()
    {
        eprintln!("tracing init failed: {e}");
    }

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;

    info!("connecting to database");
    let db = db::establish_connection(&config)
        .await
        .map_err(std::io::Error::other)?;
    db::ensure_schema(&db).await.map_err(std::io::Error::other)?;
    info!(save_mode = ?config.save_mode, "database connected");

    let db_data = web::Data::new(db.clone());
    let mode_data = web::Data::new(config.save_mode);
    let cors_origin = config.cors_origin.clone();
    let json_limit = config.json_limit;

    info!(host = %config.host, port = config.port, origin = %cors_origin, "starting server");

    HttpServer::new(move || {
        App::new()
            .wrap(routes::cors(&cors_origin))
            .wrap(Logger::default())
            .app_data(db_data.clone())
            .app_data(mode_data.clone())
            .app_data(routes::json_config(json_limit))
            .configure(routes::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    info!("server stopped, closing database pool");
    if let Err(e) = db.close().await {
        warn!(error = %e, "failed to close database pool");
    }

    Ok(())
}
