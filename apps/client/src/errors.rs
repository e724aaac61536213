use thiserror::Error;

/// Why a selected file was refused before any network call.
/// Produced synchronously by the validator; recoverable by picking
/// a different file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unsupported file type '{mime}': expected PDF, JPG, or PNG")]
    UnsupportedType { mime: String },

    #[error("file is {size} bytes, limit is {limit} bytes")]
    TooLarge { size: u64, limit: u64 },
}

/// Client-side error taxonomy.
///
/// `Transport`/`Http` are fatal to the current submission only.
/// `AnalysisUnavailable` and `CatalogLoad` are non-fatal degradations:
/// data a prior successful step produced stays intact.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("no file staged for submission")]
    NothingStaged,

    #[error("a submission is already in flight")]
    SubmissionInFlight,

    #[error("upload failed (status {status}): {body}")]
    Transport { status: u16, body: String },

    #[error("analyzer unavailable: {body}")]
    AnalysisUnavailable { body: String },

    #[error("could not fetch roles: {0}")]
    CatalogLoad(String),

    #[error("role '{0}' is not in the loaded catalog")]
    UnknownRole(String),

    #[error("could not write preview file: {0}")]
    Preview(#[from] std::io::Error),

    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ClientError {
    /// True for failures that leave previously extracted data usable.
    pub fn is_non_fatal(&self) -> bool {
        matches!(
            self,
            ClientError::AnalysisUnavailable { .. } | ClientError::CatalogLoad(_)
        )
    }
}
