//! Aliases for the entity models fixtures return.

pub type EveCharacterModel = entity::eve_character::Model;
pub type EveCorporationModel = entity::eve_corporation::Model;
pub type CharacterAccessTokenModel = entity::character_access_token::Model;
pub type EsiApiModel = entity::esi_api::Model;
pub type CharacterApiModel = entity::character_api::Model;
pub type CorporationDivisionModel = entity::corporation_division::Model;
