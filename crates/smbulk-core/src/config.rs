// ── Runtime connection configuration ──
//
// These types describe *how* to reach a Security Manager server. They
// carry connection tuning and optional pre-filled answers, never secrets
// and never touch disk. The CLI builds a `SessionConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use smbulk_api::client::DEFAULT_DOMAIN_ID;
use smbulk_api::{TlsMode, TransportConfig};

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification. Default: appliances use self-signed certificates.
    #[default]
    DangerAcceptInvalid,
}

impl From<&TlsVerification> for TlsMode {
    fn from(tls: &TlsVerification) -> Self {
        match tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        }
    }
}

/// Everything the session bootstrap needs besides the password.
///
/// `host` and `username` are answers supplied up front (profile or flag);
/// when `None` the operator is prompted.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub host: Option<String>,
    pub username: Option<String>,
    pub tls: TlsVerification,
    /// Request timeout; `None` keeps the HTTP client's default.
    pub timeout: Option<Duration>,
    /// Domain all device endpoints are scoped to.
    pub domain_id: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            host: None,
            username: None,
            tls: TlsVerification::default(),
            timeout: None,
            domain_id: DEFAULT_DOMAIN_ID,
        }
    }
}

impl SessionConfig {
    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: TlsMode::from(&self.tls),
            timeout: self.timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_skips_certificate_checks() {
        let config = SessionConfig::default();
        assert_eq!(config.domain_id, 1);
        assert_eq!(config.transport().tls, TlsMode::DangerAcceptInvalid);
    }

    #[test]
    fn custom_ca_carries_path() {
        let config = SessionConfig {
            tls: TlsVerification::CustomCa("/etc/ssl/fm.pem".into()),
            ..SessionConfig::default()
        };
        assert_eq!(
            config.transport().tls,
            TlsMode::CustomCa(PathBuf::from("/etc/ssl/fm.pem"))
        );
    }
}
