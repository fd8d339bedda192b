use sea_orm::sea_query::OnConflict;
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, Set, TransactionTrait};
use tracing::info;

use crate::config::SaveMode;
use crate::error::AppError;
use crate::models::dto::UserData;
use crate::models::user_documents::{
    self, ActiveModel as UserDocumentActiveModel, Entity as UserDocuments,
};
use crate::services::account_store::AccountStore;

pub struct DocumentStore;

impl DocumentStore {
    /// Enregistre (ou remplace) les données d'un utilisateur.
    ///
    /// Les deux champs sont toujours écrits ensemble: jamais de fusion.
    /// En mode `AutoAccount`, le compte est créé si besoin dans la même
    /// transaction que l'upsert. En mode `Registered`, un username inconnu
    /// est refusé sans rien écrire.
    pub async fn save(
        db: &DatabaseConnection,
        mode: SaveMode,
        username: &str,
        data: UserData,
    ) -> Result<(), AppError> {
        let txn = db.begin().await?;

        match mode {
            SaveMode::AutoAccount => {
                AccountStore::ensure_account(&txn, username).await?;
            }
            SaveMode::Registered => {
                if !AccountStore::exists(&txn, username).await? {
                    return Err(AppError::Unauthorized(
                        "Unknown user, register first".to_string(),
                    ));
                }
            }
        }

        Self::upsert(&txn, username, data).await?;
        txn.commit().await?;

        info!(%username, "user data saved");
        Ok(())
    }

    /// Retourne les données stockées, ou deux tableaux vides si rien n'a été sauvegardé
    pub async fn load<C>(db: &C, username: &str) -> Result<UserData, AppError>
    where
        C: ConnectionTrait,
    {
        let document = UserDocuments::find_by_id(username.to_string()).one(db).await?;

        Ok(match document {
            Some(document) => UserData {
                personnes: document.personnes,
                equipes: document.equipes,
            },
            None => UserData::default(),
        })
    }

    // INSERT ... ON CONFLICT (username) DO UPDATE SET personnes, equipes
    async fn upsert<C>(db: &C, username: &str, data: UserData) -> Result<(), AppError>
    where
        C: ConnectionTrait,
    {
        let document = UserDocumentActiveModel {
            username: Set(username.to_string()),
            personnes: Set(data.personnes),
            equipes: Set(data.equipes),
        };

        UserDocuments::insert(document)
            .on_conflict(
                OnConflict::column(user_documents::Column::Username)
                    .update_columns([
                        user_documents::Column::Personnes,
                        user_documents::Column::Equipes,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;

        Ok(())
    }
}
