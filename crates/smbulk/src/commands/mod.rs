//! Subcommand handlers.

pub mod config_cmd;
pub mod fields;
pub mod run;
