use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20261019_000001_eve_character::EveCharacter, m20261019_000004_esi_api::EsiApi};

static IDX_CHARACTER_API_CHARACTER_ID_API_ID: &str = "idx_character_api_character_id_api_id";
static FK_CHARACTER_API_CHARACTER_ID: &str = "fk_character_api_character_id";
static FK_CHARACTER_API_API_ID: &str = "fk_character_api_api_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CharacterApi::Table)
                    .if_not_exists()
                    .col(pk_auto(CharacterApi::Id))
                    .col(big_integer(CharacterApi::CharacterId))
                    .col(integer(CharacterApi::ApiId))
                    .col(timestamp_null(CharacterApi::LastExecution))
                    .col(text_null(CharacterApi::LastResult))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_CHARACTER_API_CHARACTER_ID)
                            .from(CharacterApi::Table, CharacterApi::CharacterId)
                            .to(EveCharacter::Table, EveCharacter::CharacterId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_CHARACTER_API_API_ID)
                            .from(CharacterApi::Table, CharacterApi::ApiId)
                            .to(EsiApi::Table, EsiApi::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CHARACTER_API_CHARACTER_ID_API_ID)
                    .table(CharacterApi::Table)
                    .col(CharacterApi::CharacterId)
                    .col(CharacterApi::ApiId)
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
                    .name(IDX_CHARACTER_API_CHARACTER_ID_API_ID)
                    .table(CharacterApi::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CharacterApi::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum CharacterApi {
    Table,
    Id,
    CharacterId,
    ApiId,
    LastExecution,
    LastResult,
}
