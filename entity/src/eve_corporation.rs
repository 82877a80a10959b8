use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "eve_corporation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub corporation_id: i64,
    pub name: String,
    pub ticker: String,
    pub alliance_id: Option<i64>,
    pub ceo_id: i64,
    pub creator_id: i64,
    pub date_founded: Option<DateTime>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub faction_id: Option<i64>,
    pub home_station_id: Option<i64>,
    pub member_count: i64,
    pub shares: Option<i64>,
    #[sea_orm(column_type = "Double")]
    pub tax_rate: f64,
    pub url: Option<String>,
    pub war_eligible: Option<bool>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
