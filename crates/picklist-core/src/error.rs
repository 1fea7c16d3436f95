//! Error types for the picklist dropdown engine.
//!
//! Selection and filtering transitions never fail; out-of-range or missing
//! input resolves to empty states instead. Errors exist only at the edges:
//! parsing host-supplied props and fetching from a remote filter source.

use thiserror::Error;

/// Errors from parsing host-supplied widget props.
#[derive(Debug, Error)]
pub enum PropsError {
    /// The props JSON could not be deserialized.
    #[error("Invalid props: {0}")]
    Invalid(String),
}

impl From<serde_json::Error> for PropsError {
    fn from(err: serde_json::Error) -> Self {
        PropsError::Invalid(err.to_string())
    }
}

/// Errors surfaced by a remote filter source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source could not be reached or failed mid-request.
    #[error("Filter source error: {0}")]
    Fetch(String),

    /// The source returned a payload the host could not decode.
    #[error("Filter source returned invalid options: {0}")]
    Decode(String),
}
