use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EsiError {
    /// ESI answered with a non-2xx status.
    #[error("ESI request to {path} failed with status {status}: {body}")]
    Http {
        path: String,
        status: StatusCode,
        body: String,
    },
    /// A paginated response page was not a JSON array.
    #[error("ESI returned a non-array body for page {page} of paginated {path}")]
    UnexpectedBody { path: String, page: u32 },
}
