//! Workspace-wide error type.
//!
//! Sub-crates convert their own errors into `HkError` via `From`, or keep
//! them separate and wrap `HkError` as one variant — whichever keeps error
//! sites clean at the call site. Fatal invariant breaks (a bin missing an
//! agent that bookkeeping says should be there, a connect() call with an
//! out-of-range id) are not represented here: they are bugs, not recoverable
//! conditions, and surface as panics at the point of detection.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HkError {
    #[error("missing required configuration key: {0}")]
    ConfigMissing(String),

    #[error("configuration key {key} has the wrong type: expected {expected}")]
    ConfigTypeMismatch { key: String, expected: &'static str },

    #[error("configuration parse error: {0}")]
    ConfigParse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type HkResult<T> = Result<T, HkError>;
