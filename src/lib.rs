//! Scheduled synchronization of EVE Online ESI data into a relational store.
//!
//! The sync engine walks each character's endpoint subscriptions, decides which are due
//! according to their cache duration and the scopes granted to the character's token,
//! fetches the (possibly paginated) ESI resource and reconciles it into the database.

pub mod config;
pub mod data;
pub mod error;
pub mod esi;
pub mod model;
pub mod reconciler;
pub mod registry;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod util;
