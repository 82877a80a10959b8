//! Test fixtures for database rows and mock HTTP endpoints.
//!
//! - `auth` - Access tokens (minted JWTs, stored token rows) and SSO token endpoints
//! - `eve` - Characters, corporations, the endpoint catalog, subscriptions and ESI endpoints

pub mod auth;
pub mod eve;
