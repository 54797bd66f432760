use crate::app::checks::Warnings;
use crate::app::field::FieldSpec;
use crate::app::form::FormState;
use crate::app::generic::{self, Resources, CORE_OPTIONS};
use crate::app::SushiApp;

pub struct CountQC;

impl SushiApp for CountQC {
    fn title(&self) -> &'static str {
        "CountQC"
    }

    fn class_name(&self) -> &'static str {
        "CountQC"
    }

    fn description(&self) -> &'static str {
        "Quality control of count data: correlation, clustering and expression overviews."
    }

    fn fields(&self) -> Vec<FieldSpec> {
        let mut fields = vec![generic::name(), generic::comment()];
        fields.extend(generic::resources(Resources {
            cores: 1,
            cores_options: Some(CORE_OPTIONS),
            ram: 4,
            ram_options: None,
            scratch: 10,
            scratch_options: None,
            process_mode: "DATASET",
        }));
        fields.extend([
            FieldSpec::text("label_name", "Count_QC").label("Label Name"),
            FieldSpec::text("refBuild", "Homo_sapiens/GENCODE/GRC"),
            FieldSpec::text("refFeatureFile", "genes.gtf"),
            FieldSpec::choice("featureLevel", &["gene"], "gene"),
            FieldSpec::text("normMethod", "logMean"),
            FieldSpec::flag("runGO", true),
            FieldSpec::float("backgroundExpression", 10.0)
                .tooltip("counts to be added to shrink estimated log2 ratios"),
            FieldSpec::integer("topGeneSize", 100),
            FieldSpec::flag("selectByFtest", false),
            FieldSpec::choice("transcriptTypes", &["protein_coding", "long_noncoding"], "protein_coding"),
            FieldSpec::text("specialOptions", ""),
            FieldSpec::text("expressionName", ""),
            generic::mail(),
        ]);
        fields
    }

    fn check(&self, form: &FormState, warnings: &mut Warnings) {
        warnings.non_negative(form, &["backgroundExpression", "topGeneSize"]);
    }
}
