use crate::app::checks::Warnings;
use crate::app::field::FieldSpec;
use crate::app::form::FormState;
use crate::app::generic::{self, Resources, CORE_OPTIONS, R_VERSIONS};
use crate::app::SushiApp;

pub struct DESeq2;

impl SushiApp for DESeq2 {
    fn title(&self) -> &'static str {
        "DESeq2"
    }

    fn class_name(&self) -> &'static str {
        "DESeq2"
    }

    fn description(&self) -> &'static str {
        "Differential expression analysis of count data with DESeq2, with optional GO enrichment."
    }

    fn fields(&self) -> Vec<FieldSpec> {
        let mut fields = generic::resources(Resources {
            cores: 4,
            cores_options: Some(CORE_OPTIONS),
            ram: 12,
            ram_options: Some(&[12, 24, 48]),
            scratch: 10,
            scratch_options: Some(&[10, 50, 100]),
            process_mode: "DATASET",
        });
        fields.extend([
            FieldSpec::text("samples", "").label("Samples"),
            FieldSpec::text("refBuild", "Homo_sapiens/GENCODE/GRC"),
            FieldSpec::text("refFeatureFile", "genes.gtf"),
            FieldSpec::choice("featureLevel", &["gene"], "gene").label("Feature Level"),
            FieldSpec::text("grouping", "condition").label("Grouping").tooltip("required"),
            FieldSpec::text("sampleGroup", "Hetero")
                .label("Sample Group")
                .tooltip("required. sampleGroup should be different from refGroup"),
            FieldSpec::text("refGroup", "Controls")
                .label("Reference Group")
                .tooltip("required. refGroup should be different from sampleGroup"),
            FieldSpec::flag("onlyCompGroupsHeatmap", true)
                .tooltip("Only show the samples from comparison groups in heatmap"),
            FieldSpec::text("grouping2", "").tooltip(
                "specify the column name of your secondary co-variate (factor or numeric, assuming \
                 there is one). Ensure the column name is in the format 'NAME [Factor]' or 'NAME [Numeric]'",
            ),
            FieldSpec::float("backgroundExpression", 10.0).tooltip("additive offset used in heatmaps"),
            FieldSpec::choice("transcriptTypes", &["protein_coding", "long_noncoding"], "protein_coding"),
            FieldSpec::flag("runGO", true).tooltip("perform ORA and GSEA with Gene Ontology annotations"),
            FieldSpec::float("pValThreshGO", 0.01).tooltip("pValue cut-off for ORA candidate gene selection"),
            FieldSpec::float("log2RatioThreshGO", 0.0)
                .tooltip("log2 FoldChange cut-off for ORA candidate gene selection"),
            FieldSpec::float("fdrThreshORA", 0.05).tooltip("adjusted pValue cut-off for GO terms in ORA"),
            FieldSpec::float("fdrThreshGSEA", 0.05).tooltip("adjusted pValue cut-off for GO terms in GSEA"),
            FieldSpec::text("specialOptions", ""),
            FieldSpec::text("expressionName", ""),
            generic::mail(),
            FieldSpec::choice("Rversion", R_VERSIONS, "Dev/R/4.4.2"),
            generic::name(),
            generic::comment(),
        ]);
        fields
    }

    fn check(&self, form: &FormState, warnings: &mut Warnings) {
        warnings.distinct(form, "sampleGroup", "refGroup");
        warnings.covariate(form, "grouping2");
        warnings.non_negative(form, &["backgroundExpression"]);
        warnings.unit_interval(form, &["pValThreshGO", "fdrThreshORA", "fdrThreshGSEA"]);
        warnings.non_negative(form, &["log2RatioThreshGO"]);
    }
}
