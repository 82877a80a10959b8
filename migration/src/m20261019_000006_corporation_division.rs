use sea_orm_migration::{prelude::*, schema::*};

static IDX_CORPORATION_DIVISION_IDENTITY: &str = "idx_corporation_division_identity";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CorporationDivision::Table)
                    .if_not_exists()
                    .col(pk_auto(CorporationDivision::Id))
                    .col(big_integer(CorporationDivision::CorporationId))
                    .col(text(CorporationDivision::Kind))
                    .col(integer(CorporationDivision::Division))
                    .col(string(CorporationDivision::Name))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CORPORATION_DIVISION_IDENTITY)
                    .table(CorporationDivision::Table)
                    .col(CorporationDivision::CorporationId)
                    .col(CorporationDivision::Kind)
                    .col(CorporationDivision::Division)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_CORPORATION_DIVISION_IDENTITY)
                    .table(CorporationDivision::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CorporationDivision::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum CorporationDivision {
    Table,
    Id,
    CorporationId,
    Kind,
    Division,
    Name,
}
