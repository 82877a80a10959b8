use sea_orm_migration::prelude::*;

use crate::m20261019_000004_esi_api::{EsiApi, EsiApiGroup};

const GROUPS: &[(i32, &str)] = &[(1, "Character"), (2, "Wallet"), (3, "Corporation")];

const CHARACTER_WALLET_SCOPE: &str = "esi-wallet.read_character_wallet.v1";
const CORPORATION_WALLET_SCOPE: &str = "esi-wallet.read_corporation_wallets.v1";
const CORPORATION_DIVISIONS_SCOPE: &str = "esi-corporations.read_divisions.v1";

/// (id, name, path, cache seconds, scope, group, handler)
type ApiRow = (
    i32,
    &'static str,
    &'static str,
    i32,
    Option<&'static str>,
    i32,
    &'static str,
);

const APIS: &[ApiRow] = &[
    (
        1,
        "Character Profile",
        "/characters/{character_id}/",
        86400,
        None,
        1,
        "character_profile",
    ),
    (
        2,
        "Corporation Profile",
        "/corporations/{corporation_id}/",
        3600,
        None,
        3,
        "corporation_profile",
    ),
    (
        3,
        "Character Wallet",
        "/characters/{character_id}/wallet/",
        120,
        Some(CHARACTER_WALLET_SCOPE),
        2,
        "character_wallet",
    ),
    (
        4,
        "Character Wallet Journal",
        "/characters/{character_id}/wallet/journal/",
        3600,
        Some(CHARACTER_WALLET_SCOPE),
        2,
        "character_wallet_journal",
    ),
    (
        5,
        "Character Wallet Transactions",
        "/characters/{character_id}/wallet/transactions/",
        3600,
        Some(CHARACTER_WALLET_SCOPE),
        2,
        "character_wallet_transactions",
    ),
    (
        6,
        "Corporation Divisions",
        "/corporations/{corporation_id}/divisions/",
        3600,
        Some(CORPORATION_DIVISIONS_SCOPE),
        3,
        "corporation_divisions",
    ),
    (
        7,
        "Corporation Wallets",
        "/corporations/{corporation_id}/wallets/",
        300,
        Some(CORPORATION_WALLET_SCOPE),
        3,
        "corporation_wallets",
    ),
    (
        8,
        "Corporation Wallet Journal",
        "/corporations/{corporation_id}/wallets/{division}/journal/",
        3600,
        Some(CORPORATION_WALLET_SCOPE),
        3,
        "corporation_wallet_journal",
    ),
    (
        9,
        "Corporation Wallet Transactions",
        "/corporations/{corporation_id}/wallets/{division}/transactions/",
        3600,
        Some(CORPORATION_WALLET_SCOPE),
        3,
        "corporation_wallet_transactions",
    ),
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut groups = Query::insert()
            .into_table(EsiApiGroup::Table)
            .columns([EsiApiGroup::Id, EsiApiGroup::Name])
            .to_owned();
        for (id, name) in GROUPS {
            groups.values_panic([(*id).into(), (*name).into()]);
        }
        manager.exec_stmt(groups).await?;

        let mut apis = Query::insert()
            .into_table(EsiApi::Table)
            .columns([
                EsiApi::Id,
                EsiApi::Name,
                EsiApi::Path,
                EsiApi::CacheDuration,
                EsiApi::Scope,
                EsiApi::GroupId,
                EsiApi::Handler,
            ])
            .to_owned();
        for (id, name, path, cache_duration, scope, group_id, handler) in APIS {
            apis.values_panic([
                (*id).into(),
                (*name).into(),
                (*path).into(),
                (*cache_duration).into(),
                (*scope).into(),
                (*group_id).into(),
                (*handler).into(),
            ]);
        }
        manager.exec_stmt(apis).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .exec_stmt(Query::delete().from_table(EsiApi::Table).to_owned())
            .await?;

        manager
            .exec_stmt(Query::delete().from_table(EsiApiGroup::Table).to_owned())
            .await?;

        Ok(())
    }
}
