//! FastqScreen, for plain and 10x read datasets

use crate::app::checks::Warnings;
use crate::app::field::FieldSpec;
use crate::app::form::FormState;
use crate::app::generic::{self, Resources, FASTP_NON_NEGATIVE};
use crate::app::SushiApp;

pub struct FastqScreen;

impl SushiApp for FastqScreen {
    fn title(&self) -> &'static str {
        "FastqScreen"
    }

    fn class_name(&self) -> &'static str {
        "FastqScreenApp"
    }

    fn name_suffix(&self) -> &'static str {
        "FastqScreen"
    }

    fn description(&self) -> &'static str {
        "Screens a subsample of reads against a panel of reference genomes to detect contamination."
    }

    fn is_tested(&self) -> bool {
        false
    }

    fn fields(&self) -> Vec<FieldSpec> {
        let mut fields = vec![
            FieldSpec::choice("processMode", &["DATASET"], "DATASET"),
            generic::name(),
            generic::comment(),
            FieldSpec::flag("paired", false),
            FieldSpec::integer("cores", 8),
            FieldSpec::integer("ram", 30),
            FieldSpec::integer("scratch", 100),
            FieldSpec::integer("nReads", 100_000).tooltip("number of reads subsampled for the screen"),
            FieldSpec::integer("nTopSpecies", 5),
            FieldSpec::float("minAlignmentScore", -20.0),
            FieldSpec::text("cmdOptions", ""),
        ];
        fields.extend(generic::fastp());
        fields.push(generic::mail());
        fields
    }

    fn check(&self, form: &FormState, warnings: &mut Warnings) {
        warnings.non_negative(form, &["nReads", "nTopSpecies"]);
        warnings.non_negative(form, FASTP_NON_NEGATIVE);
    }
}

pub struct FastqScreen10x;

impl SushiApp for FastqScreen10x {
    fn title(&self) -> &'static str {
        "FastqScreen 10x"
    }

    fn class_name(&self) -> &'static str {
        "FastqScreen10xApp"
    }

    fn name_suffix(&self) -> &'static str {
        "FastqScreen10x"
    }

    fn description(&self) -> &'static str {
        "Contamination screen of 10x Genomics read datasets with FastqScreen."
    }

    fn fields(&self) -> Vec<FieldSpec> {
        let mut fields = vec![generic::name(), generic::comment()];
        fields.extend(generic::resources(Resources {
            cores: 8,
            cores_options: None,
            ram: 30,
            ram_options: None,
            scratch: 300,
            scratch_options: None,
            process_mode: "DATASET",
        }));
        fields.extend([
            FieldSpec::flag("paired", true),
            FieldSpec::text("label_name", "FastQC_Result").label("Label Name"),
            FieldSpec::text("cmdOptions", ""),
            generic::mail(),
        ]);
        fields
    }

    fn check(&self, form: &FormState, warnings: &mut Warnings) {
        warnings.require(form, "paired", "Warning: 'paired' is required. Please select true or false.");
        warnings.require(form, "label_name", "Warning: 'Label Name' is required. Please enter a value.");
    }
}
