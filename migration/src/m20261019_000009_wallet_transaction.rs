use sea_orm_migration::{prelude::*, schema::*};

static IDX_CHARACTER_WALLET_TRANSACTION_ID: &str =
    "idx_character_wallet_transaction_character_id_transaction_id";
static IDX_CORPORATION_WALLET_TRANSACTION_ID: &str =
    "idx_corporation_wallet_transaction_corporation_id_division_transaction_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CharacterWalletTransaction::Table)
                    .if_not_exists()
                    .col(pk_auto(CharacterWalletTransaction::Id))
                    .col(big_integer(CharacterWalletTransaction::CharacterId))
                    .col(big_integer(CharacterWalletTransaction::TransactionId))
                    .col(big_integer(CharacterWalletTransaction::ClientId))
                    .col(timestamp(CharacterWalletTransaction::Date))
                    .col(boolean(CharacterWalletTransaction::IsBuy))
                    .col(boolean(CharacterWalletTransaction::IsPersonal))
                    .col(big_integer(CharacterWalletTransaction::JournalRefId))
                    .col(big_integer(CharacterWalletTransaction::LocationId))
                    .col(big_integer(CharacterWalletTransaction::Quantity))
                    .col(big_integer(CharacterWalletTransaction::TypeId))
                    .col(double(CharacterWalletTransaction::UnitPrice))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CHARACTER_WALLET_TRANSACTION_ID)
                    .table(CharacterWalletTransaction::Table)
                    .col(CharacterWalletTransaction::CharacterId)
                    .col(CharacterWalletTransaction::TransactionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CorporationWalletTransaction::Table)
                    .if_not_exists()
                    .col(pk_auto(CorporationWalletTransaction::Id))
                    .col(big_integer(CorporationWalletTransaction::CorporationId))
                    .col(integer(CorporationWalletTransaction::Division))
                    .col(big_integer(CorporationWalletTransaction::TransactionId))
                    .col(big_integer(CorporationWalletTransaction::ClientId))
                    .col(timestamp(CorporationWalletTransaction::Date))
                    .col(boolean(CorporationWalletTransaction::IsBuy))
                    .col(big_integer(CorporationWalletTransaction::JournalRefId))
                    .col(big_integer(CorporationWalletTransaction::LocationId))
                    .col(big_integer(CorporationWalletTransaction::Quantity))
                    .col(big_integer(CorporationWalletTransaction::TypeId))
                    .col(double(CorporationWalletTransaction::UnitPrice))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CORPORATION_WALLET_TRANSACTION_ID)
                    .table(CorporationWalletTransaction::Table)
                    .col(CorporationWalletTransaction::CorporationId)
                    .col(CorporationWalletTransaction::Division)
                    .col(CorporationWalletTransaction::TransactionId)
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
                    .name(IDX_CORPORATION_WALLET_TRANSACTION_ID)
                    .table(CorporationWalletTransaction::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .table(CorporationWalletTransaction::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_CHARACTER_WALLET_TRANSACTION_ID)
                    .table(CharacterWalletTransaction::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CharacterWalletTransaction::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum CharacterWalletTransaction {
    Table,
    Id,
    CharacterId,
    TransactionId,
    ClientId,
    Date,
    IsBuy,
    IsPersonal,
    JournalRefId,
    LocationId,
    Quantity,
    TypeId,
    UnitPrice,
}

#[derive(DeriveIden)]
enum CorporationWalletTransaction {
    Table,
    Id,
    CorporationId,
    Division,
    TransactionId,
    ClientId,
    Date,
    IsBuy,
    JournalRefId,
    LocationId,
    Quantity,
    TypeId,
    UnitPrice,
}
