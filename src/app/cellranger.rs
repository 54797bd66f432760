use crate::app::checks::Warnings;
use crate::app::field::FieldSpec;
use crate::app::form::FormState;
use crate::app::generic::{self, Resources, TRANSCRIPT_TYPES};
use crate::app::SushiApp;

static CHEMISTRIES: &[&str] = &[
    "auto",
    "ThreePrime",
    "FivePrime",
    "SC3PV1",
    "SC3PV2",
    "SC3PV3",
    "SC5P-PE",
    "SC5P-R2",
    "ARC-v1",
];

static VERSIONS: &[&str] = &[
    "Aligner/CellRanger/9.0.0",
    "Aligner/CellRanger/8.0.1",
    "Aligner/CellRanger/7.1.0",
];

pub struct CellRanger;

impl SushiApp for CellRanger {
    fn title(&self) -> &'static str {
        "CellRanger"
    }

    fn class_name(&self) -> &'static str {
        "CellRanger"
    }

    fn description(&self) -> &'static str {
        "Single cell gene expression, VDJ or feature barcoding counts with 10x Genomics Cell Ranger."
    }

    fn fields(&self) -> Vec<FieldSpec> {
        let mut fields = vec![generic::name(), generic::comment()];
        fields.extend(generic::resources(Resources {
            cores: 8,
            cores_options: None,
            ram: 60,
            ram_options: None,
            scratch: 300,
            scratch_options: None,
            process_mode: "SAMPLE",
        }));
        fields.extend([
            FieldSpec::text("samples", ""),
            FieldSpec::text("label_name", "CellRangerCount").label("Label Name").tooltip("required"),
            FieldSpec::text("refBuild", "").tooltip("required"),
            FieldSpec::text("refFeatureFile", "genes.gtf"),
            FieldSpec::choice("featureLevel", &["gene"], "gene"),
            FieldSpec::choice("TenXLibrary", &["GEX", "VDJ", "FeatureBarcoding"], "GEX"),
            FieldSpec::choice("chemistry", CHEMISTRIES, "auto"),
            FieldSpec::flag("includeIntrons", true),
            FieldSpec::integer("expectedCells", 0).unset(),
            FieldSpec::choice("transcriptTypes", TRANSCRIPT_TYPES, "protein_coding"),
            FieldSpec::text("controlSeqs", ""),
            generic::second_ref(),
            FieldSpec::flag("runVeloCyto", false),
            FieldSpec::flag("bamStats", false),
            FieldSpec::flag("keepAlignment", true),
            FieldSpec::text("cmdOptions", ""),
            FieldSpec::text("specialOptions", ""),
            generic::mail(),
            FieldSpec::choice("CellRangerVersion", VERSIONS, "Aligner/CellRanger/9.0.0"),
        ]);
        fields
    }

    fn check(&self, form: &FormState, warnings: &mut Warnings) {
        warnings.require(form, "label_name", "Warning: 'Label Name' is required. Please enter a value.");
        warnings.require(form, "refBuild", "Warning: 'refBuild' is required. Please select a reference genome.");
        warnings.non_negative(form, &["expectedCells"]);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::request::session::EntityData;

    fn warnings(input: serde_json::Value) -> Vec<String> {
        let form = CellRanger.form(&EntityData::named("10x_run"), input.as_object().unwrap()).unwrap();
        CellRanger.warnings(&form)
    }

    #[test]
    fn label_and_reference_required() {
        assert_eq!(
            warnings(json!({"label_name": ""})),
            vec![
                "Warning: 'Label Name' is required. Please enter a value.",
                "Warning: 'refBuild' is required. Please select a reference genome.",
            ]
        );
    }

    #[test]
    fn expected_cells_may_stay_empty() {
        assert!(warnings(json!({"refBuild": "Homo_sapiens/refdata-gex-GRCh38-2024-A"})).is_empty());
        assert_eq!(
            warnings(json!({"refBuild": "Homo_sapiens/refdata-gex-GRCh38-2024-A", "expectedCells": "-100"})),
            vec!["Warning: expectedCells must be ≥ 0."]
        );
    }
}
