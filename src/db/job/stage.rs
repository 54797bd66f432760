use chrono::Utc;
use log::info;
use rusqlite::{params, Connection};

use crate::db::job::state::JobState;
use crate::sushi::job::StagedJob;
use crate::sushi::job_request::JobRequest;

impl JobRequest {
    /// Record a staged job, returning its row id
    pub fn stage(&self, conn: &Connection, job: &StagedJob) -> rusqlite::Result<i64> {
        let now = Utc::now().to_rfc3339();
        info!("Recording job {} as {}", job.name, JobState::Staged);
        conn.execute(
            "INSERT INTO job (name, class, environment, app_id, project_id, charge_project, job_dir, command, state, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)",
            params![
                job.name,
                self.app.class_name(),
                self.environment.to_string(),
                self.app_id,
                self.project_id,
                self.charge,
                job.dir.to_string_lossy().into_owned(),
                job.command,
                JobState::Staged.as_str(),
                now,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }
}
