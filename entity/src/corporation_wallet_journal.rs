use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "corporation_wallet_journal")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique_key = "owner_entry")]
    pub corporation_id: i64,
    #[sea_orm(unique_key = "owner_entry")]
    pub division: i32,
    /// ESI journal entry `id`, unique per corporation wallet division.
    #[sea_orm(unique_key = "owner_entry")]
    pub ref_id: i64,
    #[sea_orm(column_type = "Double", nullable)]
    pub amount: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub balance: Option<f64>,
    pub context_id: Option<i64>,
    pub context_id_type: Option<String>,
    pub date: DateTime,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub first_party_id: Option<i64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub reason: Option<String>,
    pub ref_type: String,
    pub second_party_id: Option<i64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub tax: Option<f64>,
    pub tax_receiver_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
