use crate::app::checks::Warnings;
use crate::app::field::FieldSpec;
use crate::app::form::FormState;
use crate::app::generic::{self, Resources, TRANSCRIPT_TYPES};
use crate::app::SushiApp;

pub struct FeatureCounts;

impl SushiApp for FeatureCounts {
    fn title(&self) -> &'static str {
        "FeatureCounts"
    }

    fn class_name(&self) -> &'static str {
        "FeatureCounts"
    }

    fn description(&self) -> &'static str {
        "Counts aligned reads per gene or transcript feature with featureCounts."
    }

    fn fields(&self) -> Vec<FieldSpec> {
        let mut fields = vec![generic::name(), generic::comment()];
        fields.extend(generic::resources(Resources {
            cores: 8,
            cores_options: None,
            ram: 20,
            ram_options: None,
            scratch: 10,
            scratch_options: None,
            process_mode: "SAMPLE",
        }));
        fields.extend([
            FieldSpec::text("samples", ""),
            FieldSpec::text("refBuild", "Homo_sapiens/GENCODE/GRC").tooltip("required"),
            FieldSpec::flag("paired", true).tooltip("required"),
            FieldSpec::choice("strandMode", &["none", "sense", "antisense"], "antisense").tooltip("required"),
            FieldSpec::text("refFeatureFile", "genes.gtf"),
            FieldSpec::choice("featureLevel", &["gene"], "gene"),
            FieldSpec::text("gtfFeatureType", "exon").tooltip(
                "which atomic features of the gtf should be used to define the meta-features; see featureLevel",
            ),
            FieldSpec::flag("allowMultiOverlap", true)
                .tooltip("count alignments that fall in a region where multiple features are annotated"),
            FieldSpec::flag("countPrimaryAlignmentsOnly", true),
            FieldSpec::integer("minFeatureOverlap", 10)
                .tooltip("minimum overlap of a read with a transcript feature"),
            FieldSpec::integer("minMapQuality", 10),
            FieldSpec::flag("keepMultiHits", true),
            FieldSpec::flag("ignoreDup", false),
            FieldSpec::choice("transcriptTypes", TRANSCRIPT_TYPES, "protein_coding"),
            generic::second_ref(),
            FieldSpec::text("specialOptions", ""),
            generic::mail(),
        ]);
        fields
    }

    fn check(&self, form: &FormState, warnings: &mut Warnings) {
        warnings.require(form, "refBuild", "Warning: refBuild is required. Please select a reference genome.");
        warnings.require(form, "paired", "Warning: paired is required. Please select true or false.");
        warnings.reject(
            form,
            "strandMode",
            "none",
            "Warning: strandMode is required. Please select a mode (sense, antisense).",
        );
        warnings.non_negative(form, &["minFeatureOverlap", "minMapQuality"]);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::request::session::EntityData;

    fn warnings(input: serde_json::Value) -> Vec<String> {
        let form = FeatureCounts.form(&EntityData::named("bams"), input.as_object().unwrap()).unwrap();
        FeatureCounts.warnings(&form)
    }

    #[test]
    fn defaults_are_clean() {
        assert!(warnings(json!({})).is_empty());
    }

    #[test]
    fn unstranded_mode_is_flagged() {
        assert_eq!(
            warnings(json!({"strandMode": "none", "minFeatureOverlap": -1})),
            vec![
                "Warning: strandMode is required. Please select a mode (sense, antisense).",
                "Warning: minFeatureOverlap must be ≥ 0.",
            ]
        );
    }

    #[test]
    fn reference_build_is_required() {
        assert_eq!(warnings(json!({"refBuild": ""})).len(), 1);
    }
}
