use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{info, warn};
use serde_json::{Map, Value};

use crate::app::form::FormState;
use crate::app::{describe, SushiApp};
use crate::config::Config;
use crate::db::job::load::list_jobs;
use crate::db::open::{open_db, release_or_rollback};
use crate::directory::{by_class, entries, lookup};
use crate::namespace::Environment;
use crate::request::dataset::Dataset;
use crate::request::message::Message;
use crate::request::schema::load_schema;
use crate::request::session::Session;
use crate::sushi::job_request::JobRequest;
use crate::sushi::submit::{submit, SubmitStatus};
use crate::WorkingDirectory;

#[derive(Debug, Parser)]
#[command(
    name = "sushi-runner",
    version,
    about = "Fill in Sushi application sidebars and submit them to sushi_fabric"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the applications registered for an environment
    Apps {
        #[arg(long, value_enum, default_value_t = Environment::Test)]
        environment: Environment,
    },
    /// Show an application's layout and parameter sidebar
    Sidebar(AppArgs),
    /// Print the sidebar defaults for a session as JSON
    Defaults(SessionArgs),
    /// Print the warnings of a filled-in sidebar
    Check(FormArgs),
    /// Print one page of the session's dataset
    Dataset {
        #[command(flatten)]
        session: SessionArgs,
        /// Zero-based page, 15 rows each
        #[arg(long, default_value_t = 0)]
        page: usize,
    },
    /// Write the job files and run sushi_fabric
    Submit(SubmitArgs),
    /// List jobs recorded in the ledger
    Jobs {
        #[arg(long, env = "SUSHI_WORK_DIR", default_value = ".")]
        work_dir: PathBuf,
    },
}

#[derive(Debug, Args)]
pub struct AppArgs {
    /// sushi_fabric class name, e.g. STAR
    #[arg(long, conflicts_with = "app_id")]
    pub class: Option<String>,

    #[arg(long, value_enum, default_value_t = Environment::Test)]
    pub environment: Environment,

    /// B-Fabric application id
    #[arg(long)]
    pub app_id: Option<String>,
}

#[derive(Debug, Args)]
pub struct SessionArgs {
    /// Session JSON with token, entity and app data
    #[arg(long)]
    pub session: PathBuf,

    /// Open this sushi_fabric class instead of the session's application
    #[arg(long)]
    pub class: Option<String>,
}

#[derive(Debug, Args)]
pub struct FormArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// JSON object of parameter values overriding the defaults
    #[arg(long)]
    pub form: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct SubmitArgs {
    #[command(flatten)]
    pub form: FormArgs,

    /// Dataset rows to submit, all rows if not set
    #[arg(long, value_delimiter = ',')]
    pub rows: Vec<usize>,

    /// Charge the run to the project
    #[arg(long)]
    pub charge: bool,

    /// Write job files but don't run sushi_fabric or keep the ledger entry
    #[arg(long)]
    pub dry_run: bool,

    /// Refuse to submit a sidebar with warnings
    #[arg(long)]
    pub strict: bool,

    #[arg(long, env = "SUSHI_SCRATCH_PATH", default_value = "/scratch/sushi_runner")]
    pub scratch_path: PathBuf,

    /// Directory holding the ledger database
    #[arg(long, env = "SUSHI_WORK_DIR", default_value = ".")]
    pub work_dir: PathBuf,

    /// Sushi installation to run `bundle exec` in
    #[arg(long, env = "SUSHI_APP_DIR")]
    pub app_dir: Option<PathBuf>,

    /// Defaults to the entity's container
    #[arg(long, env = "SUSHI_PROJECT_ID")]
    pub project_id: Option<String>,

    #[arg(long, env = "SUSHI_MANGO_RUN_NAME", default_value = "None")]
    pub mango_run_name: String,
}

/// Run a subcommand, returning false when a submission failed
pub fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Command::Apps { environment } => {
            for (id, app) in entries(environment) {
                println!("{id}\t{}\t{}", app.class_name(), app.title());
            }
        }
        Command::Sidebar(args) => {
            let app = match (&args.class, &args.app_id) {
                (Some(class), _) => find_class(class)?,
                (None, Some(id)) => lookup(args.environment, id),
                (None, None) => return Err(anyhow!("Pass --class or --app-id")),
            };
            print!("{}", describe(app));
        }
        Command::Defaults(args) => {
            let session = read_session(&args.session)?;
            let app = select_app(&session, args.class.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&app.defaults(&session.entity_data))?);
        }
        Command::Check(args) => {
            let session = read_session(&args.session.session)?;
            let app = select_app(&session, args.session.class.as_deref())?;
            let form = read_form(app, &session, args.form.as_deref())?;
            if app.has_alerts() {
                for warning in app.warnings(&form) {
                    println!("{warning}");
                }
            }
        }
        Command::Dataset { session, page } => {
            let session = read_session(&session.session)?;
            let dataset = Dataset::from_api_response(&session.entity_data.full_api_response)?;
            println!("{}", dataset.render_page(page));
        }
        Command::Submit(args) => return submit_job(args),
        Command::Jobs { work_dir } => {
            let conn = open_db(&WorkingDirectory { path: work_dir })?;
            for job in list_jobs(&conn)? {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}",
                    job.id, job.state, job.name, job.class, job.project_id, job.updated_at
                );
            }
            release_or_rollback(&conn, false)?;
        }
    }
    Ok(true)
}

/// Any error on the way to sushi_fabric becomes a failure status, like errors inside [submit]
fn submit_job(args: SubmitArgs) -> Result<bool> {
    let status = stage_and_submit(args).unwrap_or_else(|err| {
        warn!("[SUSHI ERROR]: {err:#}");
        SubmitStatus::failed()
    });
    println!("{}", serde_json::to_string(&status)?);
    Ok(status.success)
}

fn stage_and_submit(args: SubmitArgs) -> Result<SubmitStatus> {
    let session = read_session(&args.form.session.session)?;
    let app = select_app(&session, args.form.session.class.as_deref())?;
    let form = read_form(app, &session, args.form.form.as_deref())?;
    let dataset = Dataset::from_api_response(&session.entity_data.full_api_response)?.select(&args.rows)?;
    info!("Submitting {} dataset rows with {}", dataset.rows.len(), app.class_name());

    let request = JobRequest::new(app, form, dataset, &session, args.project_id.as_deref(), args.charge)?;
    let config = Config {
        scratch_path: args.scratch_path,
        app_dir: args.app_dir,
        mango_run_name: args.mango_run_name,
        dry_run: args.dry_run,
        strict: args.strict,
    };

    fs::create_dir_all(&args.work_dir)
        .with_context(|| format!("Can't create working directory {}", args.work_dir.display()))?;
    let conn = open_db(&WorkingDirectory { path: args.work_dir })?;
    let status = submit(&request, &config, &conn);
    release_or_rollback(&conn, config.dry_run)?;
    Ok(status)
}

fn read_session(path: &Path) -> Result<Session> {
    let schema = load_schema()?;
    let message = Message { path: path.to_path_buf(), compiled_schema: &schema };
    Ok(message.read()?)
}

fn find_class(class: &str) -> Result<&'static dyn SushiApp> {
    by_class(class).ok_or_else(|| anyhow!("No Sushi application with class {class}"))
}

fn select_app(session: &Session, class: Option<&str>) -> Result<&'static dyn SushiApp> {
    match class {
        Some(class) => find_class(class),
        None => Ok(lookup(session.environment()?, session.app_id())),
    }
}

fn read_form(app: &dyn SushiApp, session: &Session, path: Option<&Path>) -> Result<FormState> {
    let input = match path {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("Can't read form {}", path.display()))?;
            serde_json::from_str::<Map<String, Value>>(&text).context("Form values must be a JSON object")?
        }
        None => Map::new(),
    };
    Ok(app.form(&session.entity_data, &input)?)
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn rows_are_comma_separated() {
        let cli = Cli::parse_from(["sushi-runner", "submit", "--session", "s.json", "--rows", "0,2,5", "--dry-run"]);
        match cli.command {
            Command::Submit(args) => {
                assert_eq!(args.rows, vec![0, 2, 5]);
                assert!(args.dry_run);
                assert!(!args.charge);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    fn submit_cli(session: serde_json::Value, extra: &[&str]) -> (bool, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let session_path = dir.path().join("session.json");
        fs::write(&session_path, session.to_string()).unwrap();
        let mut argv: Vec<String> = vec!["sushi-runner".into(), "submit".into(), "--dry-run".into()];
        for (flag, value) in [
            ("--session", session_path),
            ("--work-dir", dir.path().join("work")),
            ("--scratch-path", dir.path().join("scratch")),
        ] {
            argv.push(flag.into());
            argv.push(value.to_string_lossy().into_owned());
        }
        argv.extend(extra.iter().map(|a| a.to_string()));
        let submitted = run(Cli::parse_from(argv)).unwrap();
        (submitted, dir)
    }

    fn count_qc_session(entity: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "token_data": {"environment": "test", "application_data": "666"},
            "entity_data": entity
        })
    }

    fn one_row() -> serde_json::Value {
        serde_json::json!({
            "attribute": [{"name": "Name", "position": 1}],
            "item": [{"position": 1, "field": [{"attributeposition": 1, "value": "s1"}]}]
        })
    }

    #[test]
    fn dry_run_submit_succeeds() {
        let session = count_qc_session(serde_json::json!({
            "name": "counts", "container_id": 2220, "full_api_response": one_row()
        }));
        let (submitted, dir) = submit_cli(session, &[]);
        assert!(submitted);
        assert!(dir.path().join("scratch/counts_CountQC/dataset.tsv").exists());
    }

    #[test]
    fn errors_before_staging_are_a_failure_status() {
        let session = count_qc_session(serde_json::json!({
            "name": "counts", "container_id": 2220, "full_api_response": one_row()
        }));
        let (submitted, dir) = submit_cli(session, &["--rows", "5"]);
        assert!(!submitted);
        assert!(!dir.path().join("scratch").exists());

        let (submitted, _dir) = submit_cli(serde_json::json!({"token_data": {}}), &[]);
        assert!(!submitted);
    }

    #[test]
    fn missing_project_is_a_failure_status() {
        if std::env::var_os("SUSHI_PROJECT_ID").is_some() {
            return;
        }
        let session = count_qc_session(serde_json::json!({"name": "counts", "full_api_response": one_row()}));
        let (submitted, _dir) = submit_cli(session, &[]);
        assert!(!submitted);
    }

    #[test]
    fn class_overrides_session_app() {
        let session: Session = serde_json::from_value(serde_json::json!({
            "token_data": {"environment": "test", "application_data": "434"}
        }))
        .unwrap();
        assert_eq!(select_app(&session, None).unwrap().class_name(), "FastqcApp");
        assert_eq!(select_app(&session, Some("STAR")).unwrap().class_name(), "STAR");
        assert!(select_app(&session, Some("Nope")).is_err());
    }
}
