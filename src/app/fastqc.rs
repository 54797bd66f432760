//! FastQC, for plain and 10x read datasets

use crate::app::checks::Warnings;
use crate::app::field::FieldSpec;
use crate::app::form::FormState;
use crate::app::generic::{self, CORE_OPTIONS};
use crate::app::SushiApp;

fn fields() -> Vec<FieldSpec> {
    vec![
        generic::name(),
        generic::comment(),
        FieldSpec::flag("paired", false),
        FieldSpec::flag("showNativeReports", false),
        FieldSpec::int_choice("cores", CORE_OPTIONS, 8),
        FieldSpec::int_choice("ram", &[15, 30, 62], 15),
        FieldSpec::int_choice("scratch", &[10, 50, 100], 100),
        FieldSpec::text("specialOptions", ""),
        FieldSpec::text("cmdOptions", ""),
        generic::mail(),
    ]
}

pub struct Fastqc;

impl SushiApp for Fastqc {
    fn title(&self) -> &'static str {
        "FastQC"
    }

    fn class_name(&self) -> &'static str {
        "FastqcApp"
    }

    fn name_suffix(&self) -> &'static str {
        "FastQC"
    }

    fn description(&self) -> &'static str {
        "A quality control tool for NGS reads"
    }

    fn docs_url(&self) -> Option<&'static str> {
        Some("http://www.bioinformatics.babraham.ac.uk/projects/fastqc")
    }

    fn is_tested(&self) -> bool {
        false
    }

    fn fields(&self) -> Vec<FieldSpec> {
        fields()
    }

    fn check(&self, form: &FormState, warnings: &mut Warnings) {
        warnings.require(form, "paired", "Warning: paired is required. Please select true or false.");
    }
}

pub struct Fastqc10x;

impl SushiApp for Fastqc10x {
    fn title(&self) -> &'static str {
        "FastQC 10x"
    }

    fn class_name(&self) -> &'static str {
        "Fastqc10xApp"
    }

    fn name_suffix(&self) -> &'static str {
        "FastQC10x"
    }

    fn description(&self) -> &'static str {
        "A quality control tool for NGS reads, for 10x Genomics read datasets"
    }

    fn docs_url(&self) -> Option<&'static str> {
        Some("http://www.bioinformatics.babraham.ac.uk/projects/fastqc")
    }

    fn is_tested(&self) -> bool {
        false
    }

    fn fields(&self) -> Vec<FieldSpec> {
        fields()
    }

    fn check(&self, form: &FormState, warnings: &mut Warnings) {
        warnings.require(form, "paired", "Warning: paired is required. Please select true or false.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::session::EntityData;

    #[test]
    fn plain_and_10x_share_the_sidebar() {
        let plain: Vec<&str> = Fastqc.fields().iter().map(|f| f.key).collect();
        let tenx: Vec<&str> = Fastqc10x.fields().iter().map(|f| f.key).collect();
        assert_eq!(plain, tenx);
        assert_ne!(Fastqc.class_name(), Fastqc10x.class_name());
    }

    #[test]
    fn defaults_are_clean() {
        let form = Fastqc.defaults(&EntityData::named("run_42"));
        assert_eq!(form.name(), Some("run_42_FastQC"));
        assert!(Fastqc.warnings(&form).is_empty());
    }
}
