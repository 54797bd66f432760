//! Parameter sidebars of the Sushi applications
//!
//! Every application is a bundle of a layout (a short description and a banner for untested
//! apps), a sidebar (the fields collecting job configuration, in parameters.tsv order) and alerts
//! (warnings computed from the current form state). Submitting any of them goes through the same
//! staging and dispatch path in [crate::sushi], only the `sushi_fabric` class differs.

use std::fmt::Write;

use serde_json::{Map, Value};

use crate::app::checks::Warnings;
use crate::app::field::{FieldSpec, FieldValue, FormError};
use crate::app::form::FormState;
use crate::request::session::EntityData;

pub mod checks;
pub mod field;
pub mod form;
pub mod generic;

pub mod bowtie2;
pub mod cellranger;
pub mod count_qc;
pub mod deseq2;
pub mod edger;
pub mod empty;
pub mod fastq_screen;
pub mod fastqc;
pub mod feature_counts;
pub mod merge_run_data;
pub mod star;

pub trait SushiApp: Sync {
    fn title(&self) -> &'static str;

    /// Class passed to `sushi_fabric --class`
    fn class_name(&self) -> &'static str;

    /// Appended to the entity name to build the default job name
    fn name_suffix(&self) -> &'static str {
        self.class_name()
    }

    fn description(&self) -> &'static str;

    fn docs_url(&self) -> Option<&'static str> {
        None
    }

    /// Untested apps carry a red "do not use in production" banner
    fn is_tested(&self) -> bool {
        true
    }

    /// The placeholder app shown for unknown application ids can't be submitted
    fn is_runnable(&self) -> bool {
        true
    }

    fn fields(&self) -> Vec<FieldSpec>;

    /// Whether the sidebar comes with an alerts panel
    fn has_alerts(&self) -> bool {
        true
    }

    /// App specific warnings, the job name is always checked by [SushiApp::warnings]
    fn check(&self, _form: &FormState, _warnings: &mut Warnings) {}

    /// Sidebar defaults, with the job name derived from the entity
    fn defaults(&self, entity: &EntityData) -> FormState {
        let mut form = FormState::from_fields(&self.fields());
        let base = entity.name.as_deref().unwrap_or("Unknown");
        form.populate("name", FieldValue::Text(format!("{base}_{}", self.name_suffix())));
        form
    }

    fn warnings(&self, form: &FormState) -> Vec<String> {
        let mut warnings = Warnings::default();
        warnings.job_name(form);
        self.check(form, &mut warnings);
        warnings.into_vec()
    }

    /// Defaults overwritten with user input
    fn form(&self, entity: &EntityData, input: &Map<String, Value>) -> Result<FormState, FormError> {
        let mut form = self.defaults(entity);
        form.apply(&self.fields(), input)?;
        Ok(form)
    }
}

/// Plain text rendering of an app's layout and sidebar
pub fn describe(app: &dyn SushiApp) -> String {
    let mut out = String::new();
    if !app.is_tested() {
        out.push_str("!! This App has not yet been tested! Do not use in production! Only for testing purposes!\n");
    }
    let _ = writeln!(out, "{} ({})", app.title(), app.class_name());
    let _ = writeln!(out, "{}", app.description());
    if let Some(url) = app.docs_url() {
        let _ = writeln!(out, "Docs: {url}");
    }
    for field in app.fields() {
        let default = match &field.default {
            FieldValue::Missing => String::from("-"),
            value => value.to_string(),
        };
        let _ = writeln!(
            out,
            "  {:<28} {:<20} {:<24} [{}] {}",
            field.key,
            field.label,
            default,
            field.kind,
            field.tooltip.unwrap_or("")
        );
    }
    out
}
