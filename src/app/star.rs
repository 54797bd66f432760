use crate::app::checks::Warnings;
use crate::app::field::FieldSpec;
use crate::app::form::FormState;
use crate::app::generic::{self, Resources, CORE_OPTIONS};
use crate::app::SushiApp;

pub struct Star;

impl SushiApp for Star {
    fn title(&self) -> &'static str {
        "STAR"
    }

    fn class_name(&self) -> &'static str {
        "STAR"
    }

    fn description(&self) -> &'static str {
        "Spliced alignment of RNA-seq reads with STAR, after read preprocessing with fastp."
    }

    fn fields(&self) -> Vec<FieldSpec> {
        let mut fields = vec![generic::name(), generic::comment()];
        fields.extend(generic::resources(Resources {
            cores: 8,
            cores_options: Some(CORE_OPTIONS),
            ram: 30,
            ram_options: None,
            scratch: 100,
            scratch_options: None,
            process_mode: "SAMPLE",
        }));
        fields.extend([
            FieldSpec::text("refBuild", "").tooltip(
                "required! Select the reference genome you wish to map your reads to. Use the most recent version",
            ),
            FieldSpec::flag("paired", true).tooltip(
                "required! If you only have R1, set to false. If you have R1 and R2, set to true.",
            ),
            FieldSpec::choice("strandMode", &["none", "forward", "reverse", "both"], "both")
                .tooltip("required! Check which library kit was used to determine. If you are unsure, ask your coach."),
            FieldSpec::text("refFeatureFile", "genes.gtf"),
            generic::second_ref(),
            FieldSpec::text("cmdOptions", "--sjdbOverhang 150 --outFilterType BySJout --outSAMattributes All"),
            FieldSpec::flag("getJunctions", false),
            FieldSpec::flag("twopassMode", false).tooltip(
                "Per-sample 2-pass mapping or 1-pass mapping in STAR. 2-pass mapping allows to detect \
                 more splice reads mapping to novel junctions.",
            ),
            FieldSpec::flag("trimAdapter", true),
        ]);
        fields.extend(generic::fastp());
        fields.extend([
            FieldSpec::text("barcodePattern", "")
                .tooltip("Optional for libraries which are including UMIs e.g. NNNNNNNN for TakRa SMARTer pico RNA kit v3"),
            FieldSpec::flag("markDuplicates", false)
                .tooltip("Should duplicates be marked with picard. It is recommended for ChIP-seq and ATAC-seq data."),
            FieldSpec::text("specialOptions", ""),
            generic::mail(),
        ]);
        fields
    }

    fn check(&self, form: &FormState, warnings: &mut Warnings) {
        warnings.require(form, "refBuild", "Warning: refBuild is required. Please select a reference genome.");
        warnings.require(form, "strandMode", "Warning: strandMode is required when paired is set to true.");
        warnings.non_negative(form, &["average_qual", "length_required", "max_len1", "max_len2", "poly_x_min_len"]);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::request::session::EntityData;

    fn warnings(input: serde_json::Value) -> Vec<String> {
        let form = Star.form(&EntityData::named("fastq"), input.as_object().unwrap()).unwrap();
        Star.warnings(&form)
    }

    #[test]
    fn reference_build_is_required() {
        assert_eq!(
            warnings(json!({})),
            vec!["Warning: refBuild is required. Please select a reference genome."]
        );
        assert!(warnings(json!({"refBuild": "Mus_musculus/GENCODE/GRCm39"})).is_empty());
    }

    #[test]
    fn read_filters_must_not_be_negative() {
        let w = warnings(json!({
            "refBuild": "Mus_musculus/GENCODE/GRCm39",
            "strandMode": "",
            "length_required": -1,
            "max_len2": -10
        }));
        assert_eq!(
            w,
            vec![
                "Warning: strandMode is required when paired is set to true.",
                "Warning: length_required must be ≥ 0.",
                "Warning: max_len2 must be ≥ 0.",
            ]
        );
    }

    #[test]
    fn fastp_block_sits_between_trim_adapter_and_barcode_pattern() {
        let keys: Vec<&str> = Star.fields().iter().map(|f| f.key).collect();
        let trim = keys.iter().position(|k| *k == "trimAdapter").unwrap();
        assert_eq!(keys[trim + 1], "trim_front1");
        let fastp_options = keys.iter().position(|k| *k == "cmdOptionsFastp").unwrap();
        assert_eq!(keys[fastp_options + 1], "barcodePattern");
    }
}
