use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "corporation_wallet_transaction")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique_key = "owner_transaction")]
    pub corporation_id: i64,
    #[sea_orm(unique_key = "owner_transaction")]
    pub division: i32,
    #[sea_orm(unique_key = "owner_transaction")]
    pub transaction_id: i64,
    pub client_id: i64,
    pub date: DateTime,
    pub is_buy: bool,
    pub journal_ref_id: i64,
    pub location_id: i64,
    pub quantity: i64,
    pub type_id: i64,
    #[sea_orm(column_type = "Double")]
    pub unit_price: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
