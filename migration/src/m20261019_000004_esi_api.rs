use sea_orm_migration::{prelude::*, schema::*};

static FK_ESI_API_GROUP_ID: &str = "fk_esi_api_group_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EsiApiGroup::Table)
                    .if_not_exists()
                    .col(integer(EsiApiGroup::Id).primary_key())
                    .col(string(EsiApiGroup::Name))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EsiApi::Table)
                    .if_not_exists()
                    .col(integer(EsiApi::Id).primary_key())
                    .col(string_uniq(EsiApi::Name))
                    .col(string(EsiApi::Path))
                    .col(integer(EsiApi::CacheDuration))
                    .col(string_null(EsiApi::Scope))
                    .col(integer(EsiApi::GroupId))
                    .col(string_len(EsiApi::Handler, 100))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_ESI_API_GROUP_ID)
                            .from(EsiApi::Table, EsiApi::GroupId)
                            .to(EsiApiGroup::Table, EsiApiGroup::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EsiApi::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(EsiApiGroup::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum EsiApiGroup {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
pub enum EsiApi {
    Table,
    Id,
    Name,
    Path,
    CacheDuration,
    Scope,
    GroupId,
    Handler,
}
