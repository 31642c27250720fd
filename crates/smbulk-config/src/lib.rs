//! Connection profiles for smbulk.
//!
//! TOML profiles layered with `SMBULK_` environment variables, and
//! translation to `smbulk_core::SessionConfig`. Profiles only hold
//! connection defaults; passwords are never written to disk.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use smbulk_core::{SessionConfig, TlsVerification};

/// Profile used when neither the flag nor the file names one.
pub const DEFAULT_PROFILE: &str = "default";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{profile}' not found in config")]
    UnknownProfile { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named server profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some(DEFAULT_PROFILE.into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

/// Settings every profile inherits unless it overrides them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default)]
    pub verify_tls: bool,

    /// Request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

/// A named Security Manager server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// Server host, optionally with scheme and port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verify_tls: Option<bool>,

    /// CA certificate to verify the server against. Implies verification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<u32>,
}

impl Config {
    /// Name of the profile to use: explicit, then configured default.
    pub fn profile_name<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested
            .or(self.default_profile.as_deref())
            .unwrap_or(DEFAULT_PROFILE)
    }

    /// Look up a profile.
    ///
    /// An explicitly requested profile must exist; a missing default
    /// profile just means "nothing pre-filled".
    pub fn profile(&self, requested: Option<&str>) -> Result<Option<&Profile>, ConfigError> {
        let name = self.profile_name(requested);
        match (self.profiles.get(name), requested) {
            (Some(profile), _) => Ok(Some(profile)),
            (None, Some(_)) => Err(ConfigError::UnknownProfile {
                profile: name.to_owned(),
            }),
            (None, None) => Ok(None),
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "smbulk", "smbulk").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("smbulk");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load config from `path` layered under `SMBULK_` environment variables.
///
/// Nested keys use a double underscore (`SMBULK_DEFAULTS__TIMEOUT`). A
/// missing file yields the defaults.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("SMBULK_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation to session settings ─────────────────────────────────

/// Build a `SessionConfig` from an optional profile and the global defaults.
///
/// TLS: a CA certificate wins, then `verify_tls`, otherwise certificate
/// checks are skipped.
pub fn to_session_config(
    profile: Option<&Profile>,
    defaults: &Defaults,
) -> Result<SessionConfig, ConfigError> {
    let empty = Profile::default();
    let profile = profile.unwrap_or(&empty);

    let host = profile
        .host
        .as_deref()
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(ToOwned::to_owned);

    let username = profile
        .username
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(ToOwned::to_owned);

    let tls = if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else if profile.verify_tls.unwrap_or(defaults.verify_tls) {
        TlsVerification::SystemDefaults
    } else {
        TlsVerification::DangerAcceptInvalid
    };

    let timeout = match profile.timeout.or(defaults.timeout) {
        Some(0) => {
            return Err(ConfigError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        other => other.map(Duration::from_secs),
    };

    let domain_id = match profile.domain_id {
        Some(0) => {
            return Err(ConfigError::Validation {
                field: "domain_id".into(),
                reason: "must be a positive integer".into(),
            });
        }
        Some(id) => id,
        None => SessionConfig::default().domain_id,
    };

    Ok(SessionConfig {
        host,
        username,
        tls,
        timeout,
        domain_id,
    })
}
