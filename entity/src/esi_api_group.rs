use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "esi_api_group")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::esi_api::Entity")]
    EsiApi,
}

impl Related<super::esi_api::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EsiApi.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
