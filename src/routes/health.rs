use actix_web::{get, HttpResponse};
use crate::models::health::HealthResponse;

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::ok())
}

#[cfg(test)]
mod tests {
    use crate::models::health::HealthResponse;
    use crate::routes::test_app;
    use actix_web::test;

    #[actix_web::test]
    async fn health_reports_ok() {
        let app = test::init_service(test_app().await).await;

        let request = test::TestRequest::get().uri("/api/health").to_request();
        let body: HealthResponse = test::call_and_read_body_json(&app, request).await;

        assert_eq!(body.status, "ok");
    }
}
