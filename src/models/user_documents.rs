// ============================================================================
// MODÈLE : USER DATA
// ============================================================================
//
// Colonnes de la table user_data:
//   - username (VARCHAR, PRIMARY KEY, FK vers users)
//   - personnes (JSON) - stocké tel quel, normalement un tableau
//   - equipes (JSON) - stocké tel quel, normalement un tableau
//
// Points d'attention:
//   - Une seule ligne par username (clé primaire)
//   - Les deux champs sont toujours remplacés ensemble (upsert)
//   - ON DELETE CASCADE: si le compte est supprimé, les données aussi
//
// ============================================================================

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user_data")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub username: String,
    pub personnes: Json,
    pub equipes: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::Username",
        to = "super::accounts::Column::Username",
        on_delete = "Cascade"
    )]
    Account,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
