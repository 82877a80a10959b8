//! SeaORM entities for the ESI sync database.

pub mod prelude;

pub mod character_access_token;
pub mod character_api;
pub mod character_wallet;
pub mod character_wallet_journal;
pub mod character_wallet_transaction;
pub mod corporation_division;
pub mod corporation_wallet;
pub mod corporation_wallet_journal;
pub mod corporation_wallet_transaction;
pub mod esi_api;
pub mod esi_api_group;
pub mod eve_character;
pub mod eve_corporation;
