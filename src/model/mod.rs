//! Wire models for ESI response payloads.

pub mod esi;
