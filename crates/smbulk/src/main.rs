mod cli;
mod commands;
mod config;
mod console;
mod error;
mod output;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        let delay = err.exit_delay();
        eprintln!("{:?}", miette::Report::new(err));
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        None | Some(Command::Run) => commands::run::handle(&cli.global).await,

        Some(Command::Fields(ref args)) => commands::fields::handle(args),

        Some(Command::Config(ref args)) => commands::config_cmd::handle(args, &cli.global),

        Some(Command::Completions(ref args)) => {
            let mut cmd = Cli::command();
            clap_complete::generate(args.shell, &mut cmd, "smbulk", &mut std::io::stdout());
            Ok(())
        }
    }
}
