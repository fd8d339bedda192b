use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub username: String,
    pub password_hash: String, // Format: pbkdf2:sha256:iterations$salt$hash (ou la sentinelle)
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::user_documents::Entity")]
    UserDocument,
}

impl Related<super::user_documents::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserDocument.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
