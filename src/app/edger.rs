use crate::app::checks::Warnings;
use crate::app::field::FieldSpec;
use crate::app::form::FormState;
use crate::app::generic::{self, PARTITIONS, R_VERSIONS};
use crate::app::SushiApp;

static GROUPS: &str = "Controls";

pub struct EdgeR;

impl SushiApp for EdgeR {
    fn title(&self) -> &'static str {
        "EdgeR"
    }

    fn class_name(&self) -> &'static str {
        "EdgeR"
    }

    fn description(&self) -> &'static str {
        "Differential expression analysis of count data with edgeR (glm or exact test)."
    }

    fn fields(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::integer("cores", 4).label("Cores"),
            FieldSpec::choice("partition", PARTITIONS, "employee").label("Partition"),
            FieldSpec::choice("processMode", &["DATASET"], "DATASET").label("Process Mode"),
            FieldSpec::choice("featureLevel", &["Gene", "Isoform"], "Gene"),
            FieldSpec::choice("testMethod", &["glm", "exactTest"], "glm"),
            FieldSpec::flag("runGo", true),
            FieldSpec::text("grouping", "condition"),
            FieldSpec::text("sampleGroup", "Hetero")
                .tooltip("required. sampleGroup should be different from refGroup"),
            FieldSpec::text("sampleGroupBaseline", GROUPS),
            FieldSpec::text("refGroup", GROUPS)
                .tooltip("required. refGroup should be different from sampleGroup"),
            FieldSpec::text("refGroupBaseline", GROUPS),
            FieldSpec::flag("onlyCompGroupsHeatmap", true),
            FieldSpec::choice("normMethod", &["TMM", "RLE", "upperQuartile", "None"], "TMM"),
            FieldSpec::float("pValueHighThreshold", 0.05),
            FieldSpec::float("pvalCut", 0.05),
            FieldSpec::float("log2FoldChangeThreshold", 1.0),
            FieldSpec::integer("topNtag", 20),
            FieldSpec::float("fdrThresholdForNSEA", 0.05),
            FieldSpec::text("sparselogNorm", ""),
            FieldSpec::choice("Rversion", R_VERSIONS, "Dev/R/4.4.2").label("R Version"),
            generic::name(),
            generic::comment(),
        ]
    }

    fn check(&self, form: &FormState, warnings: &mut Warnings) {
        warnings.distinct(form, "sampleGroup", "refGroup");
        warnings.unit_interval(form, &["pValueHighThreshold", "pvalCut", "fdrThresholdForNSEA"]);
        warnings.non_negative(form, &["log2FoldChangeThreshold", "topNtag", "cores"]);
    }
}
