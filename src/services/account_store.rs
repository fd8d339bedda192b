use sea_orm::sea_query::OnConflict;
use sea_orm::{ConnectionTrait, EntityTrait, Set};
use tracing::{info, warn};

use crate::error::AppError;
use crate::models::accounts::{self, ActiveModel as AccountActiveModel, Entity as Accounts};
use crate::models::dto::Credentials;
use crate::utils::password::{self, PasswordError, DUMMY_HASH, SENTINEL_CREDENTIAL};

pub struct AccountStore;

/// Résultat de la vérification d'un mot de passe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    Authenticated,
    /// Utilisateur inconnu OU mauvais mot de passe (volontairement indistinguables)
    Rejected,
}

impl AccountStore {
    /// Crée un compte. Conflict si le username existe déjà.
    /// Vérification + insertion en une seule requête (ON CONFLICT DO NOTHING)
    pub async fn register<C>(db: &C, credentials: Credentials) -> Result<(), AppError>
    where
        C: ConnectionTrait,
    {
        let Credentials { username, password } = credentials;
        let password_hash = hash_blocking(password).await?;

        let inserted = Self::insert_if_absent(db, &username, password_hash).await?;
        if !inserted {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }

        info!(%username, "account registered");
        Ok(())
    }

    /// Vérifie username + mot de passe. Aucune écriture.
    pub async fn verify<C>(db: &C, credentials: Credentials) -> Result<Verification, AppError>
    where
        C: ConnectionTrait,
    {
        let Credentials { username, password } = credentials;

        let account = Accounts::find_by_id(username.clone()).one(db).await?;

        // Utilisateur inconnu ou compte sentinelle: on calcule quand même un PBKDF2
        // sur DUMMY_HASH pour que le temps de réponse soit le même
        let (stored_hash, usable) = match account {
            Some(account) if account.password_hash != SENTINEL_CREDENTIAL => {
                (account.password_hash, true)
            }
            _ => (DUMMY_HASH.to_string(), false),
        };

        let outcome = verify_blocking(password, stored_hash).await?;
        if !usable {
            return Ok(Verification::Rejected);
        }

        match outcome {
            Ok(true) => Ok(Verification::Authenticated),
            Ok(false) => Ok(Verification::Rejected),
            Err(e) => {
                warn!(%username, error = %e, "stored password hash is unreadable");
                Ok(Verification::Rejected)
            }
        }
    }

    /// Garantit qu'un compte existe pour ce username (idempotent).
    /// Crée un compte avec la sentinelle si besoin; retourne true si créé.
    /// Utilisable dans une transaction.
    pub async fn ensure_account<C>(db: &C, username: &str) -> Result<bool, AppError>
    where
        C: ConnectionTrait,
    {
        let created =
            Self::insert_if_absent(db, username, SENTINEL_CREDENTIAL.to_string()).await?;
        if created {
            info!(%username, "account auto-created");
        }
        Ok(created)
    }

    pub async fn exists<C>(db: &C, username: &str) -> Result<bool, AppError>
    where
        C: ConnectionTrait,
    {
        let account = Accounts::find_by_id(username.to_string()).one(db).await?;
        Ok(account.is_some())
    }

    async fn insert_if_absent<C>(
        db: &C,
        username: &str,
        password_hash: String,
    ) -> Result<bool, AppError>
    where
        C: ConnectionTrait,
    {
        let account = AccountActiveModel {
            username: Set(username.to_string()),
            password_hash: Set(password_hash),
        };

        let rows = Accounts::insert(account)
            .on_conflict(
                OnConflict::column(accounts::Column::Username)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;

        Ok(rows > 0)
    }
}

// PBKDF2 est coûteux: on le sort des workers async
async fn hash_blocking(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || password::hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(format!("password hashing task failed: {e}")))?
        .map_err(|e| AppError::Internal(format!("failed to hash password: {e}")))
}

async fn verify_blocking(
    password: String,
    stored_hash: String,
) -> Result<Result<bool, PasswordError>, AppError> {
    tokio::task::spawn_blocking(move || password::verify_password(&password, &stored_hash))
        .await
        .map_err(|e| AppError::Internal(format!("password verification task failed: {e}")))
}
