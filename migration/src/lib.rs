pub use sea_orm_migration::prelude::*;

mod m20261019_000001_eve_character;
mod m20261019_000002_eve_corporation;
mod m20261019_000003_character_access_token;
mod m20261019_000004_esi_api;
mod m20261019_000005_character_api;
mod m20261019_000006_corporation_division;
mod m20261019_000007_wallet;
mod m20261019_000008_wallet_journal;
mod m20261019_000009_wallet_transaction;
mod m20261019_000010_seed_esi_api;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261019_000001_eve_character::Migration),
            Box::new(m20261019_000002_eve_corporation::Migration),
            Box::new(m20261019_000003_character_access_token::Migration),
            Box::new(m20261019_000004_esi_api::Migration),
            Box::new(m20261019_000005_character_api::Migration),
            Box::new(m20261019_000006_corporation_division::Migration),
            Box::new(m20261019_000007_wallet::Migration),
            Box::new(m20261019_000008_wallet_journal::Migration),
            Box::new(m20261019_000009_wallet_transaction::Migration),
            Box::new(m20261019_000010_seed_esi_api::Migration),
        ]
    }
}
