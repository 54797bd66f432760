use anyhow::{bail, Result};
use log::{info, warn};
use rusqlite::Connection;
use serde::Serialize;

use crate::config::Config;
use crate::db::job::state::JobState;
use crate::db::job::update::update;
use crate::db::open::release_or_rollback;
use crate::sushi::dispatch::dispatch;
use crate::sushi::job::StagedJob;
use crate::sushi::job_request::JobRequest;

/// Which of the success and failure alerts to open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubmitStatus {
    pub success: bool,
    pub failure: bool,
}

impl SubmitStatus {
    fn succeeded() -> SubmitStatus {
        SubmitStatus { success: true, failure: false }
    }

    pub fn failed() -> SubmitStatus {
        SubmitStatus { success: false, failure: true }
    }
}

/// Stage, record and run a job. Errors never escape, they become a failure status
pub fn submit(request: &JobRequest, config: &Config, conn: &Connection) -> SubmitStatus {
    match try_submit(request, config, conn) {
        Ok(staged) => {
            info!("Submitted job {}", staged.name);
            SubmitStatus::succeeded()
        }
        Err(err) => {
            warn!("[SUSHI ERROR]: {err:#}");
            SubmitStatus::failed()
        }
    }
}

fn try_submit(request: &JobRequest, config: &Config, conn: &Connection) -> Result<StagedJob> {
    if !request.app.is_runnable() {
        bail!("No Sushi application to submit");
    }

    let warnings = request.app.warnings(&request.form);
    for warning in &warnings {
        warn!("{warning}");
    }
    if config.strict && !warnings.is_empty() {
        bail!("{} warnings and --strict is set", warnings.len());
    }

    let staged = request.create(config)?;
    info!("[SUSHI BASH COMMAND]: {}", staged.command);
    let id = request.stage(conn, &staged)?;

    if config.dry_run {
        info!("--dry-run set, not running sushi_fabric");
        return Ok(staged);
    }
    // commit the staged row so the ledger isn't locked while sushi_fabric runs
    release_or_rollback(conn, false)?;

    match dispatch(&staged, config.app_dir.as_deref(), request.charge.as_deref()) {
        Ok(output) => {
            if !output.is_empty() {
                info!("{output}");
            }
            update(conn, id, JobState::Submitted)?;
            Ok(staged)
        }
        Err(err) => {
            update(conn, id, JobState::Failed)?;
            Err(err)
        }
    }
}
