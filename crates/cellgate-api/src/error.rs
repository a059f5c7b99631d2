use thiserror::Error;

/// Top-level error type for the `cellgate-api` crate.
///
/// Covers every way an actuation request can fail: the client could not be
/// built, the request never completed, or the vendor answered with a
/// non-success status. `cellgate-core` wraps these for its own callers.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(String),

    // ── Vendor API ──────────────────────────────────────────────────
    /// The actuation endpoint answered with a non-2xx status.
    #[error("Actuation endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    ///
    /// Nothing in this workspace retries; the classification is surfaced in
    /// logs so operators can tell a flaky network from a rejected payload.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Status { status, .. } => *status >= 500,
            Self::InvalidUrl(_) | Self::Build(_) => false,
        }
    }

    /// The HTTP status the vendor answered with, if a response arrived.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::InvalidUrl(_) | Self::Build(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_transient() {
        let err = Error::Status {
            status: 503,
            body: String::new(),
        };
        assert!(err.is_transient());
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn client_errors_are_not_transient() {
        let err = Error::Status {
            status: 400,
            body: "bad payload".into(),
        };
        assert!(!err.is_transient());
        assert_eq!(
            err.to_string(),
            "Actuation endpoint returned HTTP 400: bad payload"
        );
    }

    #[test]
    fn build_errors_have_no_status() {
        let err = Error::Build("no TLS backend".into());
        assert!(!err.is_transient());
        assert_eq!(err.status(), None);
    }
}
