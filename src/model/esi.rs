//! ESI response payloads.
//!
//! Fields ESI documents as optional, or has been seen to omit, are `Option` so a partial
//! payload still deserializes. Timestamps are RFC 3339 strings in UTC.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `GET /characters/{character_id}/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterProfile {
    pub name: String,
    #[serde(default)]
    pub corporation_id: Option<i64>,
    #[serde(default)]
    pub alliance_id: Option<i64>,
    #[serde(default)]
    pub birthday: Option<DateTime<Utc>>,
    #[serde(default)]
    pub bloodline_id: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub faction_id: Option<i64>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub race_id: Option<i64>,
    #[serde(default)]
    pub security_status: Option<f64>,
    #[serde(default)]
    pub title: Option<String>,
}

/// `GET /corporations/{corporation_id}/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorporationProfile {
    pub name: String,
    pub ticker: String,
    pub ceo_id: i64,
    pub creator_id: i64,
    pub member_count: i64,
    pub tax_rate: f64,
    #[serde(default)]
    pub alliance_id: Option<i64>,
    #[serde(default)]
    pub date_founded: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub faction_id: Option<i64>,
    #[serde(default)]
    pub home_station_id: Option<i64>,
    #[serde(default)]
    pub shares: Option<i64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub war_eligible: Option<bool>,
}

/// One entry of a character or corporation wallet journal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Natural identity of the entry.
    pub id: i64,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
    pub ref_type: String,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub balance: Option<f64>,
    #[serde(default)]
    pub context_id: Option<i64>,
    #[serde(default)]
    pub context_id_type: Option<String>,
    #[serde(default)]
    pub first_party_id: Option<i64>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub second_party_id: Option<i64>,
    #[serde(default)]
    pub tax: Option<f64>,
    #[serde(default)]
    pub tax_receiver_id: Option<i64>,
}

/// One market transaction of a character or corporation wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletTransaction {
    /// Natural identity of the transaction.
    pub transaction_id: i64,
    pub client_id: i64,
    pub date: DateTime<Utc>,
    pub is_buy: bool,
    /// Absent on corporation transactions.
    #[serde(default)]
    pub is_personal: bool,
    pub journal_ref_id: i64,
    pub location_id: i64,
    pub quantity: i64,
    pub type_id: i64,
    pub unit_price: f64,
}

/// `GET /corporations/{corporation_id}/divisions/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorporationDivisions {
    #[serde(default)]
    pub hangar: Vec<DivisionEntry>,
    #[serde(default)]
    pub wallet: Vec<DivisionEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivisionEntry {
    pub division: i32,
    /// Unnamed divisions are omitted by ESI.
    #[serde(default)]
    pub name: Option<String>,
}

/// One element of `GET /corporations/{corporation_id}/wallets/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorporationWalletBalance {
    pub division: i32,
    pub balance: f64,
}
