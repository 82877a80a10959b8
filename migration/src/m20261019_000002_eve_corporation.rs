use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EveCorporation::Table)
                    .if_not_exists()
                    .col(pk_auto(EveCorporation::Id))
                    .col(big_integer_uniq(EveCorporation::CorporationId))
                    .col(string(EveCorporation::Name))
                    .col(string(EveCorporation::Ticker))
                    .col(big_integer_null(EveCorporation::AllianceId))
                    .col(big_integer(EveCorporation::CeoId))
                    .col(big_integer(EveCorporation::CreatorId))
                    .col(date_time_null(EveCorporation::DateFounded))
                    .col(text_null(EveCorporation::Description))
                    .col(big_integer_null(EveCorporation::FactionId))
                    .col(big_integer_null(EveCorporation::HomeStationId))
                    .col(big_integer(EveCorporation::MemberCount))
                    .col(big_integer_null(EveCorporation::Shares))
                    .col(double(EveCorporation::TaxRate))
                    .col(string_null(EveCorporation::Url))
                    .col(boolean_null(EveCorporation::WarEligible))
                    .col(timestamp(EveCorporation::CreatedAt))
                    .col(timestamp(EveCorporation::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EveCorporation::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum EveCorporation {
    Table,
    Id,
    CorporationId,
    Name,
    Ticker,
    AllianceId,
    CeoId,
    CreatorId,
    DateFounded,
    Description,
    FactionId,
    HomeStationId,
    MemberCount,
    Shares,
    TaxRate,
    Url,
    WarEligible,
    CreatedAt,
    UpdatedAt,
}
