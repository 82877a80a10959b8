use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Character {0} is not stored")]
    CharacterNotFound(i64),
    #[error("Path template {template:?} has no value for placeholder {{{placeholder}}}")]
    UnresolvedPlaceholder { template: String, placeholder: String },
    #[error("Unknown reconciler handler {0:?}")]
    UnknownHandler(String),
    #[error("Sync pass for character {character_id} exceeded {timeout_secs}s")]
    PassTimedOut { character_id: i64, timeout_secs: u64 },
}
