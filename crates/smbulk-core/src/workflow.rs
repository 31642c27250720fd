//! The four-stage interactive run.
//!
//! [`Workflow`] carries what each stage produced into the next one:
//! the authenticated [`Session`], the chosen [`Target`] and the
//! [`PatchMap`]. Stages run strictly in order; [`Workflow::run`] drives
//! them all.

use tracing::info;

use crate::bulk::{self, BulkReport};
use crate::config::SessionConfig;
use crate::console::Console;
use crate::editor;
use crate::error::CoreError;
use crate::patch::PatchMap;
use crate::session::Session;
use crate::target::{self, Target};

/// How a run ended without a fatal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The operator declined the confirmation; nothing was sent.
    Cancelled,
    Completed(BulkReport),
}

/// Workflow context threaded through the stages.
pub struct Workflow {
    session: Session,
    target: Option<Target>,
    patch: PatchMap,
}

impl Workflow {
    /// Stage 1: authenticate and start a workflow.
    pub async fn bootstrap<C: Console>(
        config: &SessionConfig,
        console: &mut C,
    ) -> Result<Self, CoreError> {
        let session = Session::open(config, console).await?;
        Ok(Self::new(session))
    }

    pub fn new(session: Session) -> Self {
        Self {
            session,
            target: None,
            patch: PatchMap::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn target(&self) -> Option<&Target> {
        self.target.as_ref()
    }

    pub fn patch(&self) -> &PatchMap {
        &self.patch
    }

    /// Stage 2: pick the target kind, then a pack or group.
    pub async fn select_target<C: Console>(
        &mut self,
        console: &mut C,
    ) -> Result<&Target, CoreError> {
        let kind = target::choose_kind(console)?;
        let selected = target::select_target(self.session.client(), console, kind).await?;
        let selected: &Target = self.target.insert(selected);
        Ok(selected)
    }

    /// Stage 3: build the patch and print what will be applied.
    pub fn edit_fields<C: Console>(&mut self, console: &mut C) -> Result<&PatchMap, CoreError> {
        self.patch = editor::edit_fields(console)?;
        for line in editor::render_summary(&self.patch) {
            console.say(&line);
        }
        info!(fields = self.patch.len(), "patch assembled");
        Ok(&self.patch)
    }

    /// Stage 4: count, confirm and apply the patch to every device.
    pub async fn apply<C: Console>(&mut self, console: &mut C) -> Result<RunOutcome, CoreError> {
        let target = self.target.as_ref().ok_or_else(|| CoreError::NothingToSelect {
            what: "target".to_owned(),
        })?;
        let client = self.session.client();

        let total = bulk::count(client, target).await?;
        if !bulk::confirm(console, total)? {
            console.say("Operation cancelled.");
            info!("bulk update cancelled by operator");
            return Ok(RunOutcome::Cancelled);
        }

        let report = bulk::apply(client, console, target, &self.patch, total).await;
        console.say("");
        console.say(&report.to_string());
        Ok(RunOutcome::Completed(report))
    }

    /// Run every stage after bootstrap.
    pub async fn run<C: Console>(&mut self, console: &mut C) -> Result<RunOutcome, CoreError> {
        self.select_target(console).await?;
        self.edit_fields(console)?;
        self.apply(console).await
    }
}
