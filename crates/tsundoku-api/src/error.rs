use thiserror::Error;
use tsundoku_core::CollectionKind;

/// Errors from the MyAnimeList list client.
///
/// Every variant is recoverable at the page level: the fetch operations
/// fold these into the uniform `CollectionFetchResult` shape, where the
/// `Display` string becomes the inline error message.
#[derive(Debug, Error)]
pub enum MalError {
    #[error("MAL_CLIENT_ID is missing.")]
    MissingClientId,

    #[error("MAL_USERNAME is missing.")]
    MissingUsername,

    #[error("MyAnimeList {kind}list responded with {status}.")]
    Status { kind: CollectionKind, status: u16 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("parse error: {0}")]
    Parse(String),
}
