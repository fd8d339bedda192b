use actix_web::{post, web, HttpResponse};
use sea_orm::DatabaseConnection;
use tracing::warn;

use crate::error::AppError;
use crate::models::dto::{CredentialsRequest, LoginResponse, MessageResponse};
use crate::services::account_store::{AccountStore, Verification};

/// POST /api/register - Créer un compte
#[post("/register")]
pub async fn register(
    body: web::Json<CredentialsRequest>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    let credentials = body.into_inner().into_credentials()?;

    AccountStore::register(db.get_ref(), credentials).await?;

    Ok(HttpResponse::Created().json(MessageResponse::new("User registered successfully")))
}

/// POST /api/login - Vérifier username + mot de passe
/// Pas de session ni de token: la réponse dit seulement si c'est valide
#[post("/login")]
pub async fn login(
    body: web::Json<CredentialsRequest>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    let credentials = body.into_inner().into_credentials()?;
    let username = credentials.username.clone();

    match AccountStore::verify(db.get_ref(), credentials).await? {
        Verification::Authenticated => Ok(HttpResponse::Ok().json(LoginResponse {
            message: "Login successful".to_string(),
            username,
        })),
        Verification::Rejected => {
            warn!(%username, "login rejected");
            Err(AppError::invalid_credentials())
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::routes::test_app;
    use actix_web::{http::StatusCode, test};
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn register_then_login() {
        let app = test::init_service(test_app().await).await;

        let request = test::TestRequest::post()
            .uri("/api/register")
            .set_json(json!({ "username": "alice", "password": "pw" }))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let request = test::TestRequest::post()
            .uri("/api/login")
            .set_json(json!({ "username": "alice", "password": "pw" }))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["username"], "alice");
    }

    #[actix_web::test]
    async fn duplicate_register_is_conflict() {
        let app = test::init_service(test_app().await).await;

        for (password, expected) in [("one", StatusCode::CREATED), ("two", StatusCode::CONFLICT)] {
            let request = test::TestRequest::post()
                .uri("/api/register")
                .set_json(json!({ "username": "alice", "password": password }))
                .to_request();
            let response = test::call_service(&app, request).await;
            assert_eq!(response.status(), expected);
        }
    }

    #[actix_web::test]
    async fn unknown_user_and_wrong_password_look_the_same() {
        let app = test::init_service(test_app().await).await;

        let request = test::TestRequest::post()
            .uri("/api/register")
            .set_json(json!({ "username": "alice", "password": "right" }))
            .to_request();
        test::call_service(&app, request).await;

        let mut bodies = Vec::new();
        for body in [
            json!({ "username": "alice", "password": "wrong" }),
            json!({ "username": "nobody", "password": "right" }),
        ] {
            let request = test::TestRequest::post().uri("/api/login").set_json(body).to_request();
            let response = test::call_service(&app, request).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            bodies.push(test::read_body_json::<Value, _>(response).await);
        }

        assert_eq!(bodies[0], bodies[1]);
    }

    #[actix_web::test]
    async fn missing_fields_are_bad_requests() {
        let app = test::init_service(test_app().await).await;

        for (uri, body) in [
            ("/api/register", json!({ "username": "alice" })),
            ("/api/register", json!({ "password": "pw" })),
            ("/api/login", json!({ "username": "", "password": "pw" })),
            ("/api/login", json!({})),
        ] {
            let request = test::TestRequest::post().uri(uri).set_json(body).to_request();
            let response = test::call_service(&app, request).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        }
    }

    #[actix_web::test]
    async fn malformed_json_is_a_bad_request() {
        let app = test::init_service(test_app().await).await;

        let request = test::TestRequest::post()
            .uri("/api/register")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(response).await;
        assert!(body["error"].is_string());
    }
}
