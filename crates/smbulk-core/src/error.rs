// ── Core error types ──
//
// Fatal workflow errors. Recoverable problems (a bad menu index, a device
// that fails to update) never surface here; the stage that hits them
// reports to the console and moves on.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach Security Manager at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    // ── Session errors ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Authorization failed (authStatus: {status})")]
    AuthorizationDenied { status: String },

    // ── Selection errors ─────────────────────────────────────────────
    #[error("Failed to retrieve {what}: {message}")]
    ListingFailed {
        what: String,
        status: Option<u16>,
        message: String,
    },

    #[error("No {what} found")]
    NothingToSelect { what: String },

    #[error("Invalid choice '{input}'")]
    InvalidChoice { input: String },

    // ── Console ──────────────────────────────────────────────────────
    #[error("Console I/O failed: {0}")]
    Console(#[from] std::io::Error),

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Wrap a failed listing call, keeping transport failures distinct.
    pub(crate) fn listing(what: &str, url: &str, err: smbulk_api::Error) -> Self {
        if err.is_transport() {
            return Self::ConnectionFailed {
                url: url.to_owned(),
                reason: err.to_string(),
            };
        }
        Self::ListingFailed {
            what: what.to_owned(),
            status: err.status(),
            message: err.to_string(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<smbulk_api::Error> for CoreError {
    fn from(err: smbulk_api::Error) -> Self {
        match err {
            smbulk_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            smbulk_api::Error::Transport(ref e) => CoreError::ConnectionFailed {
                url: e
                    .url()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "<unknown>".into()),
                reason: e.to_string(),
            },
            smbulk_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            smbulk_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            smbulk_api::Error::Status { status, body } => CoreError::Api {
                message: if body.is_empty() {
                    format!("HTTP {status}")
                } else {
                    format!("HTTP {status}: {body}")
                },
                status: Some(status),
            },
            smbulk_api::Error::Deserialization { message, body: _ } => CoreError::Api {
                message: format!("unexpected response: {message}"),
                status: None,
            },
        }
    }
}
