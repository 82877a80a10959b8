//! Upstream ESI and EVE SSO access.
//!
//! - [`client`]: GET requests against ESI with `X-Pages` pagination assembly
//! - [`oauth`]: token endpoint grants (refresh token, authorization code)
//! - [`claims`]: unverified decoding of access-token claims

pub mod claims;
pub mod client;
pub mod oauth;

pub use claims::{EsiClaims, Scopes};
pub use client::{EsiClient, EsiClientConfig};
pub use oauth::{EsiOAuthClient, TokenGrant};
