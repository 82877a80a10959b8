use sea_orm_migration::{prelude::*, schema::*};

static IDX_CHARACTER_WALLET_JOURNAL_REF_ID: &str = "idx_character_wallet_journal_character_id_ref_id";
static IDX_CORPORATION_WALLET_JOURNAL_REF_ID: &str =
    "idx_corporation_wallet_journal_corporation_id_division_ref_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CharacterWalletJournal::Table)
                    .if_not_exists()
                    .col(pk_auto(CharacterWalletJournal::Id))
                    .col(big_integer(CharacterWalletJournal::CharacterId))
                    .col(big_integer(CharacterWalletJournal::RefId))
                    .col(double_null(CharacterWalletJournal::Amount))
                    .col(double_null(CharacterWalletJournal::Balance))
                    .col(big_integer_null(CharacterWalletJournal::ContextId))
                    .col(string_null(CharacterWalletJournal::ContextIdType))
                    .col(timestamp(CharacterWalletJournal::Date))
                    .col(text(CharacterWalletJournal::Description))
                    .col(big_integer_null(CharacterWalletJournal::FirstPartyId))
                    .col(text_null(CharacterWalletJournal::Reason))
                    .col(string(CharacterWalletJournal::RefType))
                    .col(big_integer_null(CharacterWalletJournal::SecondPartyId))
                    .col(double_null(CharacterWalletJournal::Tax))
                    .col(big_integer_null(CharacterWalletJournal::TaxReceiverId))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CHARACTER_WALLET_JOURNAL_REF_ID)
                    .table(CharacterWalletJournal::Table)
                    .col(CharacterWalletJournal::CharacterId)
                    .col(CharacterWalletJournal::RefId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CorporationWalletJournal::Table)
                    .if_not_exists()
                    .col(pk_auto(CorporationWalletJournal::Id))
                    .col(big_integer(CorporationWalletJournal::CorporationId))
                    .col(integer(CorporationWalletJournal::Division))
                    .col(big_integer(CorporationWalletJournal::RefId))
                    .col(double_null(CorporationWalletJournal::Amount))
                    .col(double_null(CorporationWalletJournal::Balance))
                    .col(big_integer_null(CorporationWalletJournal::ContextId))
                    .col(string_null(CorporationWalletJournal::ContextIdType))
                    .col(timestamp(CorporationWalletJournal::Date))
                    .col(text(CorporationWalletJournal::Description))
                    .col(big_integer_null(CorporationWalletJournal::FirstPartyId))
                    .col(text_null(CorporationWalletJournal::Reason))
                    .col(string(CorporationWalletJournal::RefType))
                    .col(big_integer_null(CorporationWalletJournal::SecondPartyId))
                    .col(double_null(CorporationWalletJournal::Tax))
                    .col(big_integer_null(CorporationWalletJournal::TaxReceiverId))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CORPORATION_WALLET_JOURNAL_REF_ID)
                    .table(CorporationWalletJournal::Table)
                    .col(CorporationWalletJournal::CorporationId)
                    .col(CorporationWalletJournal::Division)
                    .col(CorporationWalletJournal::RefId)
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
                    .name(IDX_CORPORATION_WALLET_JOURNAL_REF_ID)
                    .table(CorporationWalletJournal::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CorporationWalletJournal::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_CHARACTER_WALLET_JOURNAL_REF_ID)
                    .table(CharacterWalletJournal::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CharacterWalletJournal::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum CharacterWalletJournal {
    Table,
    Id,
    CharacterId,
    RefId,
    Amount,
    Balance,
    ContextId,
    ContextIdType,
    Date,
    Description,
    FirstPartyId,
    Reason,
    RefType,
    SecondPartyId,
    Tax,
    TaxReceiverId,
}

#[derive(DeriveIden)]
enum CorporationWalletJournal {
    Table,
    Id,
    CorporationId,
    Division,
    RefId,
    Amount,
    Balance,
    ContextId,
    ContextIdType,
    Date,
    Description,
    FirstPartyId,
    Reason,
    RefType,
    SecondPartyId,
    Tax,
    TaxReceiverId,
}
