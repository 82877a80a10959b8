use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "character_api")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub character_id: i64,
    pub api_id: i32,
    pub last_execution: Option<DateTime>,
    #[sea_orm(column_type = "Text", nullable)]
    pub last_result: Option<String>,
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
    #[sea_orm(
        belongs_to = "super::esi_api::Entity",
        from = "Column::ApiId",
        to = "super::esi_api::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    EsiApi,
}

impl Related<super::eve_character::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EveCharacter.def()
    }
}

impl Related<super::esi_api::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EsiApi.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
