use sea_orm_migration::{prelude::*, schema::*};

static IDX_CORPORATION_WALLET_DIVISION: &str = "idx_corporation_wallet_corporation_id_division";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CharacterWallet::Table)
                    .if_not_exists()
                    .col(big_integer(CharacterWallet::CharacterId).primary_key())
                    .col(double(CharacterWallet::Balance))
                    .col(timestamp(CharacterWallet::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CorporationWallet::Table)
                    .if_not_exists()
                    .col(pk_auto(CorporationWallet::Id))
                    .col(big_integer(CorporationWallet::CorporationId))
                    .col(integer(CorporationWallet::Division))
                    .col(double(CorporationWallet::Balance))
                    .col(timestamp(CorporationWallet::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CORPORATION_WALLET_DIVISION)
                    .table(CorporationWallet::Table)
                    .col(CorporationWallet::CorporationId)
                    .col(CorporationWallet::Division)
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
                    .name(IDX_CORPORATION_WALLET_DIVISION)
                    .table(CorporationWallet::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CorporationWallet::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CharacterWallet::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum CharacterWallet {
    Table,
    CharacterId,
    Balance,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CorporationWallet {
    Table,
    Id,
    CorporationId,
    Division,
    Balance,
    UpdatedAt,
}
