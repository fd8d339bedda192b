use actix_web::{get, post, web, HttpResponse};
use sea_orm::DatabaseConnection;

use crate::config::SaveMode;
use crate::error::AppError;
use crate::models::dto::{MessageResponse, SaveDataRequest};
use crate::services::document_store::DocumentStore;

/// POST /api/saveData - Remplacer personnes + equipes d'un utilisateur
#[post("/saveData")]
pub async fn save_data(
    body: web::Json<SaveDataRequest>,
    db: web::Data<DatabaseConnection>,
    mode: web::Data<SaveMode>,
) -> Result<HttpResponse, AppError> {
    let (username, data) = body.into_inner().into_parts()?;

    DocumentStore::save(db.get_ref(), *mode.get_ref(), &username, data).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Data saved successfully")))
}

/// GET /api/loadData/{username} - Récupérer personnes + equipes ([] par défaut)
#[get("/loadData/{username}")]
pub async fn load_data(
    path: web::Path<String>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    let username = path.into_inner();
    if username.is_empty() {
        return Err(AppError::missing_fields(["username"]));
    }

    let data = DocumentStore::load(db.get_ref(), &username).await?;

    Ok(HttpResponse::Ok().json(data))
}

#[cfg(test)]
mod tests {
    use crate::config::SaveMode;
    use crate::routes::{test_app, test_app_with_mode};
    use actix_web::{http::StatusCode, test};
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn save_then_load_example() {
        let app = test::init_service(test_app().await).await;

        let request = test::TestRequest::post()
            .uri("/api/saveData")
            .set_json(json!({
                "username": "alice",
                "personnes": [{ "id": 1, "name": "A" }],
                "equipes": []
            }))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let request = test::TestRequest::get().uri("/api/loadData/alice").to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;

        assert_eq!(body, json!({ "personnes": [{ "id": 1, "name": "A" }], "equipes": [] }));
    }

    #[actix_web::test]
    async fn load_unknown_user_returns_defaults() {
        let app = test::init_service(test_app().await).await;

        let request = test::TestRequest::get().uri("/api/loadData/nobody").to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;

        assert_eq!(body, json!({ "personnes": [], "equipes": [] }));
    }

    #[actix_web::test]
    async fn second_save_wins() {
        let app = test::init_service(test_app().await).await;

        for personnes in [json!([{ "id": 1 }, { "id": 2 }]), json!([{ "id": 3 }])] {
            let request = test::TestRequest::post()
                .uri("/api/saveData")
                .set_json(json!({
                    "username": "bob",
                    "personnes": personnes,
                    "equipes": [{ "nom": "E" }]
                }))
                .to_request();
            assert_eq!(test::call_service(&app, request).await.status(), StatusCode::OK);
        }

        let request = test::TestRequest::get().uri("/api/loadData/bob").to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;

        assert_eq!(body, json!({ "personnes": [{ "id": 3 }], "equipes": [{ "nom": "E" }] }));
    }

    #[actix_web::test]
    async fn omitted_collections_are_bad_requests() {
        let app = test::init_service(test_app().await).await;

        for body in [
            json!({ "username": "alice", "equipes": [] }),
            json!({ "username": "alice", "personnes": [] }),
            json!({ "personnes": [], "equipes": [] }),
            json!({ "username": "alice", "personnes": null, "equipes": [] }),
        ] {
            let request =
                test::TestRequest::post().uri("/api/saveData").set_json(body).to_request();
            let response = test::call_service(&app, request).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }

        // rien n'a été écrit
        let request = test::TestRequest::get().uri("/api/loadData/alice").to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;
        assert_eq!(body, json!({ "personnes": [], "equipes": [] }));
    }

    #[actix_web::test]
    async fn auto_created_account_blocks_register() {
        let app = test::init_service(test_app().await).await;

        let request = test::TestRequest::post()
            .uri("/api/saveData")
            .set_json(json!({ "username": "carol", "personnes": [], "equipes": [] }))
            .to_request();
        assert_eq!(test::call_service(&app, request).await.status(), StatusCode::OK);

        let request = test::TestRequest::post()
            .uri("/api/register")
            .set_json(json!({ "username": "carol", "password": "pw" }))
            .to_request();
        assert_eq!(test::call_service(&app, request).await.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn registered_mode_requires_an_account() {
        let app = test::init_service(test_app_with_mode(SaveMode::Registered).await).await;

        let save = |username: &str| {
            test::TestRequest::post()
                .uri("/api/saveData")
                .set_json(json!({ "username": username, "personnes": [1], "equipes": [] }))
                .to_request()
        };

        let response = test::call_service(&app, save("dave")).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let request = test::TestRequest::post()
            .uri("/api/register")
            .set_json(json!({ "username": "dave", "password": "pw" }))
            .to_request();
        assert_eq!(test::call_service(&app, request).await.status(), StatusCode::CREATED);

        let response = test::call_service(&app, save("dave")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
