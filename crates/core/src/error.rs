//! Errors raised while preparing an envelope or building its configuration.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvelopeError {
    /// The response content could not be turned into JSON.
    #[error("Content encoding failed: {0}")]
    ContentEncoding(String),

    #[error("Invalid service prefix: {0:?} (expected at most 8 ASCII digits)")]
    InvalidServicePrefix(String),
}
