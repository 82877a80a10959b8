use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "eve_character")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub character_id: i64,
    pub name: String,
    pub corporation_id: Option<i64>,
    pub alliance_id: Option<i64>,
    pub birthday: Option<DateTime>,
    pub bloodline_id: Option<i64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub faction_id: Option<i64>,
    pub gender: Option<String>,
    pub race_id: Option<i64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub security_status: Option<f64>,
    pub title: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::character_access_token::Entity")]
    CharacterAccessToken,
    #[sea_orm(has_many = "super::character_api::Entity")]
    CharacterApi,
}

impl Related<super::character_access_token::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CharacterAccessToken.def()
    }
}

impl Related<super::character_api::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CharacterApi.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
