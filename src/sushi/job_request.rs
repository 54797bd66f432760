use anyhow::{anyhow, bail, Result};

use crate::app::checks::is_valid_job_name;
use crate::app::form::FormState;
use crate::app::SushiApp;
use crate::namespace::Environment;
use crate::request::dataset::Dataset;
use crate::request::session::Session;

pub struct JobRequest {
    pub app: &'static dyn SushiApp,
    pub form: FormState,
    /// Only the selected rows end up in dataset.tsv
    pub dataset: Dataset,
    pub environment: Environment,
    /// `--input_dataset_application`
    pub app_id: String,
    pub project_id: String,
    pub dataset_name: String,
    /// Project charged for the run, if charging is on
    pub charge: Option<String>,
}

impl JobRequest {
    pub fn new(
        app: &'static dyn SushiApp,
        form: FormState,
        dataset: Dataset,
        session: &Session,
        project_id: Option<&str>,
        charge: bool,
    ) -> Result<JobRequest> {
        let project_id = session.project_id(project_id)?;
        Ok(JobRequest {
            app,
            form,
            dataset,
            environment: session.environment()?,
            app_id: session.input_dataset_application().to_string(),
            charge: charge.then(|| project_id.clone()),
            project_id,
            dataset_name: session.dataset_name().to_string(),
        })
    }

    /// The job name doubles as the scratch directory name
    pub fn name(&self) -> Result<&str> {
        let name = self.form.name().ok_or_else(|| anyhow!("Job name is missing"))?;
        if !is_valid_job_name(name) {
            bail!("Job name '{name}' can't be used as a directory name");
        }
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::app::count_qc::CountQC;
    use crate::app::field::FieldValue;

    fn session() -> Session {
        serde_json::from_value(json!({
            "token_data": {"environment": "Test", "application_data": 666},
            "entity_data": {"name": "counts", "container_id": 2220}
        }))
        .unwrap()
    }

    #[test]
    fn charge_targets_the_project() {
        let session = session();
        let form = CountQC.defaults(&session.entity_data);
        let request = JobRequest::new(&CountQC, form.clone(), Dataset::default(), &session, None, true).unwrap();
        assert_eq!(request.project_id, "2220");
        assert_eq!(request.charge.as_deref(), Some("2220"));
        assert_eq!(request.app_id, "666");

        let request = JobRequest::new(&CountQC, form, Dataset::default(), &session, Some("p9"), false).unwrap();
        assert_eq!(request.project_id, "p9");
        assert!(request.charge.is_none());
    }

    #[test]
    fn name_must_be_a_directory() {
        let session = session();
        let mut form = CountQC.defaults(&session.entity_data);
        let request = JobRequest::new(&CountQC, form.clone(), Dataset::default(), &session, None, false).unwrap();
        assert_eq!(request.name().unwrap(), "counts_CountQC");

        form.set("name", FieldValue::text("../etc")).unwrap();
        let request = JobRequest::new(&CountQC, form, Dataset::default(), &session, None, false).unwrap();
        assert!(request.name().is_err());
    }
}
