// connexion BD + création des tables

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, Schema,
};
use tracing::info;

use crate::config::AppConfig;
use crate::models::{accounts, user_documents};

pub async fn establish_connection(config: &AppConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.database_url.clone());
    options
        .max_connections(config.max_connections)
        .sqlx_logging(false);

    Database::connect(options).await
}

/// Crée les tables si elles n'existent pas (idempotent, pas de migrations)
/// `users` doit exister avant `user_data` à cause de la FK
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    create_table_if_missing(db, accounts::Entity).await?;
    create_table_if_missing(db, user_documents::Entity).await?;

    info!("database schema ready");
    Ok(())
}

async fn create_table_if_missing<E>(db: &DatabaseConnection, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();

    db.execute(backend.build(&statement)).await?;
    Ok(())
}

/// Base SQLite en mémoire avec le schéma complet.
/// Une seule connexion: chaque connexion `sqlite::memory:` ouvre une base différente.
#[cfg(test)]
pub async fn connect_in_memory() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(options).await.expect("in-memory sqlite");
    ensure_schema(&db).await.expect("schema");
    db
}
