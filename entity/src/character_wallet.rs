use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "character_wallet")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub character_id: i64,
    #[sea_orm(column_type = "Double")]
    pub balance: f64,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
