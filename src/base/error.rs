use http::StatusCode;
use thiserror::Error;

/// Errors produced by the HTTP support module.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HttpError {
    /// A requested parameter key was not present in the bag.
    ///
    /// Recoverable: numeric and boolean getters also yield a zero-equivalent
    /// default, so callers that are happy with a default can use
    /// `unwrap_or_default()`.
    #[error("No matches for {name}")]
    NoMatch { name: String },

    /// An operation was invoked against an object whose lifecycle no longer
    /// permits it, e.g. `add` on a registry after `cancel_all`.
    ///
    /// This is a caller contract violation, not a runtime condition to retry.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// The transport reported a non-success HTTP status.
    ///
    /// Carries the numeric status code and the transport's reason text.
    /// Retry policy belongs to the protocol client, not this module.
    #[error("HTTP {code}: {reason}")]
    Transport { code: u16, reason: String },
}

impl HttpError {
    pub fn no_match(name: impl Into<String>) -> Self {
        HttpError::NoMatch { name: name.into() }
    }

    /// Check a response status, turning any non-2xx code into a
    /// [`HttpError::Transport`].
    ///
    /// `reason` is the transport's reason phrase when it supplied one;
    /// otherwise the canonical phrase for the code is used.
    pub fn check_status(status: StatusCode, reason: Option<&str>) -> Result<(), HttpError> {
        if status.is_success() {
            return Ok(());
        }

        let reason = reason
            .or_else(|| status.canonical_reason())
            .unwrap_or("unknown")
            .to_string();
        tracing::debug!(code = status.as_u16(), reason = %reason, "non-success HTTP status");

        Err(HttpError::Transport {
            code: status.as_u16(),
            reason,
        })
    }
}
