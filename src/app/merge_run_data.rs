use crate::app::checks::Warnings;
use crate::app::field::{FieldSpec, FieldValue};
use crate::app::form::FormState;
use crate::app::generic;
use crate::app::SushiApp;
use crate::request::session::EntityData;

pub struct MergeRunData;

impl SushiApp for MergeRunData {
    fn title(&self) -> &'static str {
        "MergeRunData App"
    }

    fn class_name(&self) -> &'static str {
        "MergeRunDataApp"
    }

    fn description(&self) -> &'static str {
        "Merges the reads of two sequencing runs of the same samples into one dataset."
    }

    fn is_tested(&self) -> bool {
        false
    }

    fn fields(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::text("firstDataSet", ""),
            FieldSpec::text("secondDataSet", ""),
            FieldSpec::choice("matchingColumn", &["Name", "Tube", "Sample Id"], "Name"),
            generic::name(),
            FieldSpec::integer("minReadCount", 10_000),
            FieldSpec::integer("cores", 8),
            FieldSpec::integer("ram", 10),
            FieldSpec::integer("scratch", 200),
            FieldSpec::flag("paired", false),
            generic::mail(),
        ]
    }

    /// The merged dataset always starts out as "MergedRunData"
    fn defaults(&self, entity: &EntityData) -> FormState {
        let mut form = FormState::from_fields(&self.fields());
        form.populate("name", FieldValue::text("MergedRunData"));
        if let Some(name) = &entity.name {
            // the entity the app was opened from is the first run
            form.populate("firstDataSet", FieldValue::text(name));
        }
        form
    }

    fn check(&self, form: &FormState, warnings: &mut Warnings) {
        warnings.require(form, "firstDataSet", "Warning: FirstDataSet is required.");
        warnings.require(form, "secondDataSet", "Warning: SecondDataSet is required.");
        warnings.distinct(form, "firstDataSet", "secondDataSet");
        warnings.non_negative(form, &["minReadCount", "cores", "ram", "scratch"]);
    }
}
