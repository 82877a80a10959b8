use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "character_access_token")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub character_id: i64,
    #[sea_orm(column_type = "Text")]
    pub access_token: String,
    pub refresh_token: String,
    pub issued_at: DateTime,
    pub expires_at: DateTime,
    /// Space separated list of granted ESI scopes.
    #[sea_orm(column_type = "Text")]
    pub scopes: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::eve_character::Entity",
        from = "Column::CharacterId",
        to = "super::eve_character::Column::CharacterId",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    EveCharacter,
}

impl Related<super::eve_character::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EveCharacter.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
