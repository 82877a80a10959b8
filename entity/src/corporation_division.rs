use sea_orm::entity::prelude::*;

/// Kind of named corporation slot returned by the divisions endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum DivisionKind {
    #[sea_orm(string_value = "hangar")]
    Hangar,
    #[sea_orm(string_value = "wallet")]
    Wallet,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "corporation_division")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique_key = "corporation_division")]
    pub corporation_id: i64,
    #[sea_orm(unique_key = "corporation_division")]
    pub kind: DivisionKind,
    #[sea_orm(unique_key = "corporation_division")]
    pub division: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
