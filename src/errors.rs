use thiserror::Error;

/// Error type covering the catalog, submission, and configuration boundaries.
///
/// Field-level validation is deliberately absent here: an invalid answer is a
/// disabled affordance surfaced through [`crate::engine::session::FormSession`]
/// predicates, never an error value.
#[derive(Debug, Error)]
pub enum InquiryError {
    #[error("Failed to load the inquiry form catalog: {0}")]
    CatalogLoad(String),
    #[error("Submission failed: {0}")]
    Submission(String),
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}
