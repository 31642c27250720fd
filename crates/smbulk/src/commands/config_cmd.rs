//! Config subcommand handlers.

use dialoguer::{Confirm, Input};

use smbulk_config::{DEFAULT_PROFILE, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

/// Map a dialoguer failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let path = config::config_file(global);

    match args.command {
        ConfigCommand::Path => output::print_output(&path.display().to_string()),

        ConfigCommand::Show => {
            let cfg = config::load(global)?;
            let rendered =
                toml::to_string_pretty(&cfg).map_err(|e| CliError::Render(e.to_string()))?;
            output::print_output(rendered.trim_end())
        }

        // Passwords are always prompted at run time and never stored.
        ConfigCommand::Init => {
            let mut cfg = config::load(global)?;
            eprintln!("smbulk configuration");
            eprintln!("   Config path: {}\n", path.display());

            let name: String = Input::new()
                .with_prompt("Profile name")
                .default(
                    global
                        .profile
                        .clone()
                        .unwrap_or_else(|| DEFAULT_PROFILE.into()),
                )
                .interact_text()
                .map_err(prompt_err)?;

            let existing = cfg.profiles.get(&name).cloned().unwrap_or_default();

            let host: String = Input::new()
                .with_prompt("Security Manager host")
                .default(existing.host.clone().unwrap_or_else(|| "localhost".into()))
                .interact_text()
                .map_err(prompt_err)?;

            let username: String = Input::new()
                .with_prompt("Username (leave empty to be prompted)")
                .default(existing.username.clone().unwrap_or_default())
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_err)?;

            let verify_tls = Confirm::new()
                .with_prompt("Verify the server's TLS certificate?")
                .default(existing.verify_tls.unwrap_or(false))
                .interact()
                .map_err(prompt_err)?;

            let profile = Profile {
                host: optional(&host),
                username: optional(&username),
                verify_tls: Some(verify_tls),
                ..existing
            };
            cfg.profiles.insert(name.clone(), profile);
            if cfg.default_profile.is_none() || cfg.profiles.len() == 1 {
                cfg.default_profile = Some(name.clone());
            }

            smbulk_config::save_config_to(&cfg, &path)?;
            eprintln!("\n✓ Configuration written to {}", path.display());
            eprintln!("  Profile: {name}");
            Ok(())
        }
    }
}
