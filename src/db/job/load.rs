use log::info;
use rusqlite::Connection;
use serde::Serialize;

/// A row of the job ledger
#[derive(Debug, Serialize)]
pub struct JobRecord {
    pub id: i64,
    pub name: String,
    pub class: String,
    pub environment: String,
    pub app_id: String,
    pub project_id: String,
    pub charge_project: Option<String>,
    pub job_dir: String,
    pub command: String,
    pub state: String,
    pub created_at: String,
    pub updated_at: String,
}

/// All recorded jobs, oldest first
pub fn list_jobs(conn: &Connection) -> rusqlite::Result<Vec<JobRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, class, environment, app_id, project_id, charge_project, job_dir, command, state, created_at, updated_at
         FROM job ORDER BY id",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(JobRecord {
            id: row.get(0)?,
            name: row.get(1)?,
            class: row.get(2)?,
            environment: row.get(3)?,
            app_id: row.get(4)?,
            project_id: row.get(5)?,
            charge_project: row.get(6)?,
            job_dir: row.get(7)?,
            command: row.get(8)?,
            state: row.get(9)?,
            created_at: row.get(10)?,
            updated_at: row.get(11)?,
        })
    })?;

    let jobs = rows.collect::<rusqlite::Result<Vec<JobRecord>>>()?;
    info!("Loaded {} jobs from db", jobs.len());
    Ok(jobs)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::tempdir;

    use super::*;
    use crate::app::star::Star;
    use crate::app::SushiApp;
    use crate::db::job::state::JobState;
    use crate::db::job::update::update;
    use crate::db::open::open_db;
    use crate::namespace::Environment;
    use crate::request::dataset::Dataset;
    use crate::request::session::EntityData;
    use crate::sushi::job::StagedJob;
    use crate::sushi::job_request::JobRequest;
    use crate::WorkingDirectory;

    #[test]
    fn staged_jobs_move_through_states() {
        let wd = tempdir().unwrap();
        let conn = open_db(&WorkingDirectory { path: wd.path().to_path_buf() }).unwrap();
        let request = JobRequest {
            app: &Star,
            form: Star.defaults(&EntityData::named("reads")),
            dataset: Dataset::default(),
            environment: Environment::Test,
            app_id: "444".to_string(),
            project_id: "2220".to_string(),
            dataset_name: "reads".to_string(),
            charge: None,
        };
        let job = StagedJob {
            name: "reads_STAR".to_string(),
            dir: PathBuf::from("/scratch/reads_STAR"),
            dataset_path: PathBuf::from("/scratch/reads_STAR/dataset.tsv"),
            parameters_path: PathBuf::from("/scratch/reads_STAR/parameters.tsv"),
            command: "bundle exec sushi_fabric --class STAR".to_string(),
        };

        let first = request.stage(&conn, &job).unwrap();
        let second = request.stage(&conn, &job).unwrap();
        update(&conn, first, JobState::Submitted).unwrap();
        update(&conn, second, JobState::Failed).unwrap();

        let jobs = list_jobs(&conn).unwrap();
        let states: Vec<&str> = jobs.iter().map(|j| j.state.as_str()).collect();
        assert_eq!(states, vec!["submitted", "failed"]);
        assert_eq!(jobs[0].class, "STAR");
        assert_eq!(jobs[0].environment, "test");
        assert_eq!(jobs[0].charge_project, None);
        assert_eq!(jobs[0].job_dir, "/scratch/reads_STAR");
    }
}
