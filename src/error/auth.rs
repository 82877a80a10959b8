use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("No access token is stored for character {0}")]
    TokenNotFound(i64),
    #[error("Failed to refresh access token: {0}")]
    Refresh(String),
    #[error("Failed to exchange authorization code: {0}")]
    CodeExchange(String),
    #[error("Access token claims could not be decoded: {0}")]
    InvalidToken(String),
    #[error("Access token subject {0:?} does not identify a character")]
    InvalidSubject(String),
    #[error("Token endpoint did not return a refresh token")]
    MissingRefreshToken,
}
