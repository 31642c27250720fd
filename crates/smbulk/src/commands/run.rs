//! The interactive bulk update.

use tracing::{debug, info};

use smbulk_core::{RunOutcome, Workflow};

use crate::cli::GlobalOpts;
use crate::config;
use crate::console::TerminalConsole;
use crate::error::CliError;
use crate::output;

pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load(global)?;
    let session_config = config::resolve_session_config(global, &cfg)?;
    debug!(
        host = ?session_config.host,
        tls = ?session_config.tls,
        domain = session_config.domain_id,
        "resolved session settings"
    );

    let mut console = TerminalConsole::new(output::should_color(global.color));
    let mut workflow = Workflow::bootstrap(&session_config, &mut console).await?;

    match workflow.run(&mut console).await? {
        RunOutcome::Cancelled => info!("nothing sent"),
        RunOutcome::Completed(report) => info!(
            updated = report.updated,
            failed = report.failed,
            skipped = report.skipped,
            "run complete"
        ),
    }
    Ok(())
}
