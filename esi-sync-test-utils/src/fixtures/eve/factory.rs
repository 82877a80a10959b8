//! ESI payload factories.
//!
//! Pure functions returning JSON bodies shaped like ESI's responses, with standard test
//! values.

use serde_json::{json, Value};

/// `GET /characters/{character_id}/` body.
pub fn mock_character_profile(name: &str, corporation_id: i64) -> Value {
    json!({
        "birthday": "2015-03-24T11:37:00Z",
        "bloodline_id": 3,
        "corporation_id": corporation_id,
        "description": "",
        "gender": "male",
        "name": name,
        "race_id": 2,
        "security_status": -0.25,
    })
}

/// `GET /corporations/{corporation_id}/` body.
pub fn mock_corporation_profile(name: &str, ticker: &str) -> Value {
    json!({
        "ceo_id": 180548812,
        "creator_id": 180548812,
        "date_founded": "2014-01-01T00:00:00Z",
        "description": "Test corporation",
        "home_station_id": 60003760,
        "member_count": 42,
        "name": name,
        "shares": 1000,
        "tax_rate": 0.1,
        "ticker": ticker,
        "url": "",
        "war_eligible": true,
    })
}

/// One wallet journal entry with natural identity `id`.
pub fn mock_journal_entry(id: i64, amount: f64) -> Value {
    json!({
        "amount": amount,
        "balance": 1_000_000.0 + amount,
        "context_id": 60003760,
        "context_id_type": "station_id",
        "date": "2024-05-01T12:00:00Z",
        "description": "Market transaction",
        "first_party_id": 2114794365,
        "id": id,
        "ref_type": "market_transaction",
        "second_party_id": 1000132,
    })
}

/// One wallet transaction with natural identity `transaction_id`.
pub fn mock_wallet_transaction(transaction_id: i64, unit_price: f64) -> Value {
    json!({
        "client_id": 1000132,
        "date": "2024-05-01T12:00:00Z",
        "is_buy": true,
        "is_personal": true,
        "journal_ref_id": transaction_id + 100,
        "location_id": 60003760,
        "quantity": 10,
        "transaction_id": transaction_id,
        "type_id": 34,
        "unit_price": unit_price,
    })
}

/// `GET /corporations/{corporation_id}/divisions/` body from `(division, name)` pairs.
pub fn mock_divisions(hangar: &[(i32, &str)], wallet: &[(i32, &str)]) -> Value {
    let entries = |divisions: &[(i32, &str)]| -> Vec<Value> {
        divisions
            .iter()
            .map(|(division, name)| json!({ "division": division, "name": name }))
            .collect()
    };

    json!({
        "hangar": entries(hangar),
        "wallet": entries(wallet),
    })
}
