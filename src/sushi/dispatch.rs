use std::path::Path;
use std::process::Command;

use anyhow::{bail, Context, Result};
use log::info;

use crate::sushi::job::StagedJob;

/// Run the staged command with bash, blocking until sushi_fabric exits
///
/// Returns captured stdout. A non-zero exit is an error carrying stderr.
pub fn dispatch(staged: &StagedJob, app_dir: Option<&Path>, charge: Option<&str>) -> Result<String> {
    let mut bash = Command::new("bash");
    let cmd = bash.arg("-c").arg(&staged.command);
    if let Some(dir) = app_dir {
        cmd.current_dir(dir);
    }
    if let Some(project) = charge {
        info!("Charging run {} to project {project}", staged.name);
    }

    info!("Running sushi_fabric process");
    info!("{:?}", &cmd);
    let output = cmd.output().context("Failed to execute bash")?;
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("sushi_fabric {}: {}", output.status, stderr.trim());
    }
    Ok(stdout)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::tempdir;

    use super::*;

    fn staged(command: &str) -> StagedJob {
        StagedJob {
            name: "job".to_string(),
            dir: PathBuf::from("/tmp/job"),
            dataset_path: PathBuf::from("/tmp/job/dataset.tsv"),
            parameters_path: PathBuf::from("/tmp/job/parameters.tsv"),
            command: command.to_string(),
        }
    }

    #[test]
    fn runs_in_the_app_directory() {
        let dir = tempdir().unwrap();
        let output = dispatch(&staged("pwd"), Some(dir.path()), None).unwrap();
        let expected = dir.path().canonicalize().unwrap();
        assert_eq!(PathBuf::from(output).canonicalize().unwrap(), expected);
    }

    #[test]
    fn non_zero_exit_is_an_error() {
        let err = dispatch(&staged("echo broken >&2; exit 3"), None, Some("2220")).unwrap_err();
        assert!(err.to_string().contains("broken"));
    }
}
