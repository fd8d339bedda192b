pub mod auth;
pub mod data;
pub mod health;

use actix_cors::Cors;
use actix_web::{http::header, web};

use crate::error::AppError;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(health::health_check)
            .service(auth::register)
            .service(auth::login)
            .service(data::save_data)
            .service(data::load_data)
    );
}

/// Extracteur JSON: taille max configurable, erreurs au format {"error": ...}
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            AppError::Validation(format!("Invalid JSON body: {err}")).into()
        })
}

/// CORS: une seule origine autorisée, GET/POST avec Content-Type
pub fn cors(origin: &str) -> Cors {
    Cors::default()
        .allowed_origin(origin)
        .allowed_methods(vec!["GET", "POST"])
        .allowed_header(header::CONTENT_TYPE)
        .max_age(3600)
}

#[cfg(test)]
pub(crate) async fn test_app_with_mode(
    mode: crate::config::SaveMode,
) -> actix_web::App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let db = crate::db::connect_in_memory().await;

    actix_web::App::new()
        .app_data(web::Data::new(db))
        .app_data(web::Data::new(mode))
        .app_data(json_config(1024 * 1024))
        .configure(configure_routes)
}

#[cfg(test)]
pub(crate) async fn test_app() -> actix_web::App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    test_app_with_mode(crate::config::SaveMode::AutoAccount).await
}
