use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "esi_api")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    /// ESI route with `{character_id}`, `{corporation_id}` or `{division}` placeholders.
    pub path: String,
    /// Seconds a successful call stays fresh.
    pub cache_duration: i32,
    pub scope: Option<String>,
    pub group_id: i32,
    pub handler: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::esi_api_group::Entity",
        from = "Column::GroupId",
        to = "super::esi_api_group::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    EsiApiGroup,
    #[sea_orm(has_many = "super::character_api::Entity")]
    CharacterApi,
}

impl Related<super::esi_api_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EsiApiGroup.def()
    }
}

impl Related<super::character_api::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CharacterApi.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
