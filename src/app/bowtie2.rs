use crate::app::checks::Warnings;
use crate::app::field::FieldSpec;
use crate::app::form::FormState;
use crate::app::generic::{self, Resources, CORE_OPTIONS, FASTP_NON_NEGATIVE};
use crate::app::SushiApp;

pub struct Bowtie2;

impl SushiApp for Bowtie2 {
    fn title(&self) -> &'static str {
        "Bowtie2"
    }

    fn class_name(&self) -> &'static str {
        "Bowtie2"
    }

    fn description(&self) -> &'static str {
        "Alignment of DNA reads with Bowtie2, after read preprocessing with fastp."
    }

    fn fields(&self) -> Vec<FieldSpec> {
        let mut fields = vec![generic::name(), generic::comment()];
        fields.extend(generic::resources(Resources {
            cores: 8,
            cores_options: Some(CORE_OPTIONS),
            ram: 30,
            ram_options: None,
            scratch: 200,
            scratch_options: None,
            process_mode: "SAMPLE",
        }));
        fields.extend([
            FieldSpec::text("samples", ""),
            FieldSpec::text("refBuild", "")
                .tooltip("required: the genome refBuild and annotation to use as reference."),
            FieldSpec::flag("paired", true).tooltip(
                "required: whether the reads are paired end; if false then only Read1 is considered \
                 even if Read2 is available.",
            ),
            generic::second_ref(),
            FieldSpec::text("cmdOptions", "--no-unal").tooltip(
                "specify the commandline options for bowtie2; do not specify any option that is \
                 already covered by the dedicated input fields",
            ),
            FieldSpec::flag("trimAdapter", true),
        ]);
        fields.extend(generic::fastp());
        fields.extend([
            FieldSpec::flag("markDuplicates", false)
                .tooltip("should duplicates be marked with picard. It is recommended for ChIP-seq and ATAC-seq data."),
            FieldSpec::flag("generateBigWig", false),
            FieldSpec::text("specialOptions", ""),
            generic::mail(),
        ]);
        fields
    }

    fn check(&self, form: &FormState, warnings: &mut Warnings) {
        warnings.require(form, "refBuild", "Warning: refBuild is required. Please select a reference genome.");
        warnings.require(form, "paired", "Warning: paired is required. Please select true or false.");
        warnings.non_negative(form, FASTP_NON_NEGATIVE);
    }
}
