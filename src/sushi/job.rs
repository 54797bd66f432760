use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use log::{info, warn};
use serde::Serialize;
use serde_json::Value;
use tinytemplate::TinyTemplate;

use crate::app::form::FormState;
use crate::config::Config;
use crate::sushi::job_request::JobRequest;

/// A job directory holding everything sushi_fabric needs
///
/// `command` refers to both files by absolute path, so it can run from any working directory.
#[derive(Debug)]
pub struct StagedJob {
    pub name: String,
    pub dir: PathBuf,
    pub dataset_path: PathBuf,
    pub parameters_path: PathBuf,
    pub command: String,
}

/// Rendering context for the sushi_fabric command
#[derive(Serialize)]
struct CommandContext {
    class: String,
    dataset_path: String,
    parameters_path: String,
    app_id: String,
    project_id: String,
    dataset_name: String,
    mango_run_name: String,
    name: String,
}

impl JobRequest {
    pub fn create(&self, config: &Config) -> Result<StagedJob> {
        let name = self.name()?;
        if self.dataset.is_empty() {
            bail!("No dataset rows to submit");
        }

        let dir = config.scratch_path.join(name);
        info!("Creating job {} in working directory {}", name, dir.display());
        if dir.exists() {
            warn!("Job directory already exists, files will be overwritten");
        }
        fs::create_dir_all(&dir).with_context(|| format!("Can't create job directory {}", dir.display()))?;

        // order is important: sushi_fabric reads both files as soon as the command runs
        let dataset_path = dir.join("dataset.tsv");
        self.dataset.write_tsv(&dataset_path)?;
        let parameters_path = dir.join("parameters.tsv");
        write_parameters(&self.form, &parameters_path)?;

        let context = CommandContext {
            class: self.app.class_name().to_string(),
            dataset_path: dataset_path.to_string_lossy().into_owned(),
            parameters_path: parameters_path.to_string_lossy().into_owned(),
            app_id: self.app_id.clone(),
            project_id: self.project_id.clone(),
            dataset_name: self.dataset_name.clone(),
            mango_run_name: config.mango_run_name.clone(),
            name: name.to_string(),
        };
        let command = render_command(&context)?;

        Ok(StagedJob { name: name.to_string(), dir, dataset_path, parameters_path, command })
    }
}

/// Write parameters.tsv
///
/// Two tab separated columns, parameter name and value, in sidebar order. No header is present
/// in the output file.
fn write_parameters(form: &FormState, path: &Path) -> Result<()> {
    info!("Writing parameters to {}", path.display());
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Can't create {}", path.display()))?;
    for (key, value) in form.parameters() {
        writer.write_record([key.to_string(), value.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

/// Render the sushi_fabric command using TinyTemplate
fn render_command(context: &CommandContext) -> Result<String> {
    /// included command template
    static SUSHI_FABRIC: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/templates/sushi_fabric.txt"));
    let mut tt = TinyTemplate::new();
    tt.set_default_formatter(&tinytemplate::format_unescaped);
    tt.add_formatter("shell", shell_quote);
    tt.add_template("sushi_fabric", SUSHI_FABRIC)?;
    let command = tt.render("sushi_fabric", context)?;
    Ok(command.trim_end().to_string())
}

/// Single quote anything bash would split or expand
fn shell_quote(value: &Value, output: &mut String) -> tinytemplate::error::Result<()> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    };
    let safe = |c: char| c.is_ascii_alphanumeric() || "-_./:=+,@%".contains(c);
    if !text.is_empty() && text.chars().all(safe) {
        output.push_str(&text);
    } else {
        output.push('\'');
        output.push_str(&text.replace('\'', r"'\''"));
        output.push('\'');
    }
    Ok(())
}
