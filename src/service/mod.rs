//! Service layer coordinating repositories and upstream clients.
//!
//! Services own the multi-step operations that span the database and the SSO, such as
//! refreshing and persisting a character's access token.

pub mod retry;
pub mod token;
