use sea_orm_migration::{prelude::*, schema::*};

use crate::m20261019_000001_eve_character::EveCharacter;

static FK_CHARACTER_ACCESS_TOKEN_CHARACTER_ID: &str = "fk_character_access_token_character_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CharacterAccessToken::Table)
                    .if_not_exists()
                    .col(pk_auto(CharacterAccessToken::Id))
                    .col(big_integer_uniq(CharacterAccessToken::CharacterId))
                    .col(text(CharacterAccessToken::AccessToken))
                    .col(string(CharacterAccessToken::RefreshToken))
                    .col(timestamp(CharacterAccessToken::IssuedAt))
                    .col(timestamp(CharacterAccessToken::ExpiresAt))
                    .col(text(CharacterAccessToken::Scopes))
                    .col(timestamp(CharacterAccessToken::CreatedAt))
                    .col(timestamp(CharacterAccessToken::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_CHARACTER_ACCESS_TOKEN_CHARACTER_ID)
                            .from(CharacterAccessToken::Table, CharacterAccessToken::CharacterId)
                            .to(EveCharacter::Table, EveCharacter::CharacterId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CharacterAccessToken::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum CharacterAccessToken {
    Table,
    Id,
    CharacterId,
    AccessToken,
    RefreshToken,
    IssuedAt,
    ExpiresAt,
    Scopes,
    CreatedAt,
    UpdatedAt,
}
