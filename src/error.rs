use thiserror::Error;

/// Unified error type for the mediation layer.
///
/// The first three variants are produced at the dispatcher/capability
/// boundary, the next two at the structured decoder. None of them cross the
/// `Mediator` boundary; see [`crate::mediator`].
#[derive(Debug, Error)]
pub enum Error {
    /// Connection-level failure reaching the model capability.
    #[error("transport error: {0}")]
    Transport(String),

    /// The capability did not answer within the configured deadline.
    #[error("model capability timed out")]
    Timeout,

    /// The capability answered with a non-success status.
    #[error("upstream rejected request: HTTP {status}: {message}")]
    UpstreamRejected { status: u16, message: String },

    /// Response text could not be parsed as the expected serialized form.
    #[error("malformed payload: {detail}")]
    MalformedPayload { detail: String },

    /// Parsed payload does not conform to the schema contract.
    #[error("schema violation at {path}: expected {expected}, got {actual}")]
    SchemaViolation {
        path: String,
        expected: String,
        actual: String,
    },

    /// Request rejected before any outbound call was made.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl Error {
    pub fn malformed(detail: impl Into<String>) -> Self {
        Error::MalformedPayload {
            detail: detail.into(),
        }
    }

    pub fn violation(
        path: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Error::SchemaViolation {
            path: path.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// True for failures raised before or during the outbound call, as
    /// opposed to failures understanding the reply.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Error::Transport(_) | Error::Timeout | Error::UpstreamRejected { .. }
        )
    }
}
