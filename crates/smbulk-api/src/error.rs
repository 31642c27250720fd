use thiserror::Error;

/// Top-level error type for the `smbulk-api` crate.
///
/// Covers authentication, transport, HTTP status and payload failures.
/// `smbulk-core` maps these into domain-level errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The validate endpoint rejected the request (non-200).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── HTTP ────────────────────────────────────────────────────────
    /// The server answered with an unexpected status code.
    #[error("Unexpected HTTP status {status}")]
    Status { status: u16, body: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the request never produced an HTTP response
    /// (DNS, refused connection, TLS handshake, timeout).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Tls(_))
    }

    /// The HTTP status code carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The response body attached to a status error, if non-empty.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } | Self::Deserialization { body, .. } if !body.is_empty() => {
                Some(body)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_exposes_code_and_body() {
        let err = Error::Status {
            status: 409,
            body: "conflict".into(),
        };
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.body(), Some("conflict"));
        assert!(!err.is_transport());
    }

    #[test]
    fn empty_body_is_reported_as_absent() {
        let err = Error::Status {
            status: 500,
            body: String::new(),
        };
        assert_eq!(err.body(), None);
    }

    #[test]
    fn tls_errors_count_as_transport() {
        assert!(Error::Tls("bad cert".into()).is_transport());
    }
}
