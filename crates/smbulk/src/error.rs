//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into operator-facing errors with
//! actionable help text and a process exit code.

use std::time::Duration;

use miette::Diagnostic;
use thiserror::Error;

use smbulk_config::ConfigError;
use smbulk_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONNECTION: i32 = 7;
}

/// Pause before exiting after an authorization failure.
pub const AUTHORIZATION_EXIT_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to Security Manager at {url}")]
    #[diagnostic(
        code(smbulk::connection_failed),
        help(
            "Check that the server is running and reachable.\n\
             Reason: {reason}\n\
             Certificates are not verified unless --verify-tls or --ca-cert is given."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed. Please check your username and/or password and try again.")]
    #[diagnostic(code(smbulk::auth_failed), help("{message}"))]
    AuthFailed { message: String },

    #[error("Authorization failed. Please check your credentials.")]
    #[diagnostic(
        code(smbulk::authorization_denied),
        help("The server reported authStatus '{status}' for this account.")
    )]
    AuthorizationDenied { status: String },

    // ── Selection ────────────────────────────────────────────────────
    #[error("Failed to retrieve {what}. Please check the API call or your permissions.")]
    #[diagnostic(code(smbulk::listing_failed), help("{message}"))]
    ListingFailed { what: String, message: String },

    #[error("No {what} found.")]
    #[diagnostic(code(smbulk::nothing_to_select))]
    NothingToSelect { what: String },

    #[error("Invalid choice '{input}'.")]
    #[diagnostic(
        code(smbulk::invalid_choice),
        help("Run smbulk again and select 1 or 2.")
    )]
    InvalidChoice { input: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error: {message}")]
    #[diagnostic(code(smbulk::api_error))]
    Api { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(smbulk::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: smbulk config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(smbulk::validation))]
    Validation { field: String, reason: String },

    #[error("Could not load configuration: {message}")]
    #[diagnostic(
        code(smbulk::config),
        help("Check the file printed by: smbulk config path")
    )]
    Config { message: String },

    // ── IO / Serialization ────────────────────────────────────────────
    #[error("Console input failed: {0}")]
    #[diagnostic(
        code(smbulk::console),
        help("Input ended before the workflow finished.")
    )]
    Console(#[source] std::io::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(smbulk::render))]
    Render(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// How long to wait after reporting this error before exiting.
    pub fn exit_delay(&self) -> Option<Duration> {
        matches!(self, Self::AuthorizationDenied { .. }).then_some(AUTHORIZATION_EXIT_DELAY)
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => {
                CliError::ConnectionFailed { url, reason }
            }
            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },
            CoreError::AuthorizationDenied { status } => CliError::AuthorizationDenied { status },
            CoreError::ListingFailed { what, message, .. } => {
                CliError::ListingFailed { what, message }
            }
            CoreError::NothingToSelect { what } => CliError::NothingToSelect { what },
            CoreError::InvalidChoice { input } => CliError::InvalidChoice { input },
            CoreError::Console(err) => CliError::Console(err),
            CoreError::Api { message, .. } => CliError::Api { message },
            CoreError::Config { message } => CliError::Config { message },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::UnknownProfile { profile } => CliError::ProfileNotFound {
                name: profile,
                available: String::new(),
            },
            ConfigError::Io(err) => CliError::Io(err),
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}
