// Corps des requêtes / réponses de l'API
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::error::AppError;

// DTO pour l'inscription et la connexion
// Les champs sont optionnels pour distinguer "absent" (400) d'une erreur de désérialisation
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsRequest {
    #[validate(required, length(min = 1))]
    pub username: Option<String>,
    #[serde(alias = "credential")]
    #[validate(required, length(min = 1))]
    pub password: Option<String>,
}

/// Couple username / mot de passe validé
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl CredentialsRequest {
    pub fn into_credentials(self) -> Result<Credentials, AppError> {
        self.validate()?;

        match (self.username, self.password) {
            (Some(username), Some(password)) => Ok(Credentials { username, password }),
            _ => Err(AppError::missing_fields(["username", "password"])),
        }
    }
}

// DTO pour /api/saveData
// `null` est traité comme absent: un tableau vide est valide, un champ manquant non
#[derive(Debug, Deserialize, Validate)]
pub struct SaveDataRequest {
    #[validate(required, length(min = 1))]
    pub username: Option<String>,
    #[validate(required)]
    pub personnes: Option<Value>,
    #[validate(required)]
    pub equipes: Option<Value>,
}

/// Document complet d'un utilisateur
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    pub personnes: Value,
    pub equipes: Value,
}

impl Default for UserData {
    fn default() -> Self {
        Self {
            personnes: Value::Array(Vec::new()),
            equipes: Value::Array(Vec::new()),
        }
    }
}

impl SaveDataRequest {
    pub fn into_parts(self) -> Result<(String, UserData), AppError> {
        self.validate()?;

        match (self.username, self.personnes, self.equipes) {
            (Some(username), Some(personnes), Some(equipes)) => {
                Ok((username, UserData { personnes, equipes }))
            }
            _ => Err(AppError::missing_fields(["username", "personnes", "equipes"])),
        }
    }
}

// Réponse simple {"message": ...}
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

// Réponse après login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub username: String,
}
