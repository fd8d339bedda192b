// ============================================================================
// ERREURS DE L'API
// ============================================================================
//
// Taxonomie:
//   - Validation   : champ(s) requis manquant(s), JSON invalide      -> 400
//   - Conflict     : username déjà pris                             -> 409
//   - Unauthorized : mauvais mot de passe OU utilisateur inconnu    -> 401
//   - Store        : toute erreur SeaORM (connexion, contrainte...) -> 500
//   - Internal     : hash du mot de passe, tâche bloquante          -> 500
//
// Points d'attention:
//   - Les erreurs 500 sont loggées mais jamais détaillées au client
//   - Corps de réponse: {"error": "<message>"}
//
// ============================================================================

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use sea_orm::DbErr;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("database error: {0}")]
    Store(#[from] DbErr),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn missing_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names: Vec<String> = fields.into_iter().map(|f| f.as_ref().to_string()).collect();
        names.sort();

        if names.is_empty() {
            AppError::Validation("Missing required fields".to_string())
        } else {
            AppError::Validation(format!("Missing required fields: {}", names.join(", ")))
        }
    }

    /// Même message pour "utilisateur inconnu" et "mauvais mot de passe"
    pub fn invalid_credentials() -> Self {
        AppError::Unauthorized("Invalid username or password".to_string())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::missing_fields(errors.field_errors().into_keys())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Store(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Store(_) | AppError::Internal(_) => {
                error!(error = %self, "request failed");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": message
        }))
    }
}
