//! Clap derive structures for the `smbulk` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// smbulk -- bulk device-settings updates for Security Manager
#[derive(Debug, Parser)]
#[command(
    name = "smbulk",
    version,
    about = "Bulk-update device settings on a Security Manager server",
    long_about = "Interactively select a device pack or device group on a Security Manager\n\
        server, choose extended settings to change, and apply them to every\n\
        matching device.\n\n\
        Running without a subcommand starts the interactive update.",
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Option<Command>,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Connection profile to use
    #[arg(long, short = 'p', env = "SMBULK_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Server host or URL (skips the host prompt)
    #[arg(long, short = 'H', env = "SMBULK_HOST", global = true)]
    pub host: Option<String>,

    /// Username (skips the username prompt)
    #[arg(long, short = 'u', env = "SMBULK_USERNAME", global = true)]
    pub username: Option<String>,

    /// Verify the server's TLS certificate
    #[arg(long, env = "SMBULK_VERIFY_TLS", global = true)]
    pub verify_tls: bool,

    /// CA certificate to verify the server against (implies --verify-tls)
    #[arg(long, value_name = "PATH", global = true)]
    pub ca_cert: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, env = "SMBULK_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Config file to use instead of the platform default
    #[arg(long, value_name = "PATH", env = "SMBULK_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table
    Table,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
    /// Field names, one per line
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Color when stdout is a terminal and NO_COLOR is unset
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the interactive bulk update (default)
    Run,

    /// List the device settings that can be changed
    Fields(FieldsArgs),

    /// Manage connection profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct FieldsArgs {
    /// Output format
    #[arg(long, short = 'o', default_value = "table")]
    pub output: OutputFormat,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or update a profile with guided prompts
    Init,

    /// Print the loaded configuration
    Show,

    /// Print the config file location
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
