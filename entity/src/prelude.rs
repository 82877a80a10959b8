pub use super::character_access_token::Entity as CharacterAccessToken;
pub use super::character_api::Entity as CharacterApi;
pub use super::character_wallet::Entity as CharacterWallet;
pub use super::character_wallet_journal::Entity as CharacterWalletJournal;
pub use super::character_wallet_transaction::Entity as CharacterWalletTransaction;
pub use super::corporation_division::Entity as CorporationDivision;
pub use super::corporation_wallet::Entity as CorporationWallet;
pub use super::corporation_wallet_journal::Entity as CorporationWalletJournal;
pub use super::corporation_wallet_transaction::Entity as CorporationWalletTransaction;
pub use super::esi_api::Entity as EsiApi;
pub use super::esi_api_group::Entity as EsiApiGroup;
pub use super::eve_character::Entity as EveCharacter;
pub use super::eve_corporation::Entity as EveCorporation;
