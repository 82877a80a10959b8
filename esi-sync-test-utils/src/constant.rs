//! Test configuration constants.
//!
//! None of these are real credentials or real EVE entities.

pub static TEST_USER_AGENT: &str = "esi-sync-tests/1.0 (contact@example.com)";

pub static TEST_ESI_CLIENT_ID: &str = "esi_client_id";

pub static TEST_ESI_CLIENT_SECRET: &str = "esi_client_secret";

/// HMAC key used to sign minted access tokens. The sync engine never verifies signatures.
pub static TEST_JWT_SECRET: &[u8] = b"esi-sync-test-signing-key";

pub const TEST_CHARACTER_ID: i64 = 2114794365;

pub const TEST_CORPORATION_ID: i64 = 98000001;

pub static CHARACTER_WALLET_SCOPE: &str = "esi-wallet.read_character_wallet.v1";

pub static CORPORATION_WALLET_SCOPE: &str = "esi-wallet.read_corporation_wallets.v1";

pub static CORPORATION_DIVISIONS_SCOPE: &str = "esi-corporations.read_divisions.v1";

/// Endpoint catalog ids, matching the rows seeded by the migrations.
pub mod api {
    pub const CHARACTER_PROFILE: i32 = 1;
    pub const CORPORATION_PROFILE: i32 = 2;
    pub const CHARACTER_WALLET: i32 = 3;
    pub const CHARACTER_WALLET_JOURNAL: i32 = 4;
    pub const CHARACTER_WALLET_TRANSACTIONS: i32 = 5;
    pub const CORPORATION_DIVISIONS: i32 = 6;
    pub const CORPORATION_WALLETS: i32 = 7;
    pub const CORPORATION_WALLET_JOURNAL: i32 = 8;
    pub const CORPORATION_WALLET_TRANSACTIONS: i32 = 9;
}

/// Endpoint groups, matching the rows seeded by the migrations.
pub mod group {
    pub const CHARACTER: i32 = 1;
    pub const WALLET: i32 = 2;
    pub const CORPORATION: i32 = 3;
}
