//! Profile resolution with CLI flag overrides.
//!
//! Precedence: flag (or its `SMBULK_*` env var) > profile > defaults.

use std::path::PathBuf;
use std::time::Duration;

use smbulk_config::{Config, ConfigError};
use smbulk_core::{SessionConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Config file selected by `--config`, else the platform default.
pub fn config_file(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(smbulk_config::config_path)
}

pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    Ok(smbulk_config::load_config_from(&config_file(global))?)
}

/// Resolve the session settings for this invocation.
pub fn resolve_session_config(
    global: &GlobalOpts,
    cfg: &Config,
) -> Result<SessionConfig, CliError> {
    let profile = cfg
        .profile(global.profile.as_deref())
        .map_err(|err| match err {
            ConfigError::UnknownProfile { profile } => CliError::ProfileNotFound {
                name: profile,
                available: available_profiles(cfg),
            },
            other => other.into(),
        })?;

    let mut session = smbulk_config::to_session_config(profile, &cfg.defaults)?;
    apply_overrides(&mut session, global)?;
    Ok(session)
}

fn available_profiles(cfg: &Config) -> String {
    if cfg.profiles.is_empty() {
        "(none)".into()
    } else {
        cfg.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToOwned::to_owned)
}

fn apply_overrides(session: &mut SessionConfig, global: &GlobalOpts) -> Result<(), CliError> {
    if let Some(host) = non_blank(global.host.as_deref()) {
        session.host = Some(host);
    }
    if let Some(username) = non_blank(global.username.as_deref()) {
        session.username = Some(username);
    }

    if let Some(ref ca) = global.ca_cert {
        session.tls = TlsVerification::CustomCa(ca.clone());
    } else if global.verify_tls && !matches!(session.tls, TlsVerification::CustomCa(_)) {
        session.tls = TlsVerification::SystemDefaults;
    }

    match global.timeout {
        Some(0) => {
            return Err(CliError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        Some(secs) => session.timeout = Some(Duration::from_secs(secs)),
        None => {}
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;

    use smbulk_config::Profile;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["smbulk"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().global
    }

    fn config_with_default_profile() -> Config {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                host: Some("fm.example.com".into()),
                username: Some("analyst".into()),
                ca_cert: Some("/etc/ssl/fm.pem".into()),
                timeout: Some(20),
                ..Profile::default()
            },
        );
        cfg
    }

    #[test]
    fn flags_override_profile() {
        let cfg = config_with_default_profile();
        let opts = global(&["--host", "http://lab:8080", "-u", "admin", "--timeout", "5"]);

        let session = resolve_session_config(&opts, &cfg).unwrap();
        assert_eq!(session.host.as_deref(), Some("http://lab:8080"));
        assert_eq!(session.username.as_deref(), Some("admin"));
        assert_eq!(session.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn verify_flag_keeps_profile_ca() {
        let cfg = config_with_default_profile();
        let session = resolve_session_config(&global(&["--verify-tls"]), &cfg).unwrap();
        assert_eq!(
            session.tls,
            TlsVerification::CustomCa(PathBuf::from("/etc/ssl/fm.pem"))
        );
    }

    #[test]
    fn verify_flag_without_profile_uses_system_roots() {
        let session =
            resolve_session_config(&global(&["--verify-tls"]), &Config::default()).unwrap();
        assert_eq!(session.tls, TlsVerification::SystemDefaults);
        assert!(session.host.is_none());
    }

    #[test]
    fn no_flags_skips_certificate_checks() {
        let session = resolve_session_config(&global(&[]), &Config::default()).unwrap();
        assert_eq!(session.tls, TlsVerification::DangerAcceptInvalid);
    }

    #[test]
    fn zero_timeout_flag_is_rejected() {
        let err = resolve_session_config(&global(&["--timeout", "0"]), &Config::default())
            .unwrap_err();
        assert!(matches!(err, CliError::Validation { .. }));
    }

    #[test]
    fn unknown_profile_lists_available() {
        let cfg = config_with_default_profile();
        let err = resolve_session_config(&global(&["--profile", "prod"]), &cfg).unwrap_err();
        match err {
            CliError::ProfileNotFound { name, available } => {
                assert_eq!(name, "prod");
                assert_eq!(available, "default");
            }
            other => panic!("expected ProfileNotFound, got {other:?}"),
        }
    }
}
