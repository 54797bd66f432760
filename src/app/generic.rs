//! Field blocks shared between sidebars

use crate::app::field::FieldSpec;

pub static PARTITIONS: &[&str] = &["employee", "manyjobs", "user"];
pub static CORE_OPTIONS: &[i64] = &[1, 2, 4, 8];
pub static TRANSCRIPT_TYPES: &[&str] = &[
    "protein_coding",
    "rRNA",
    "tRNA",
    "Mt_rRNA",
    "Mt_tRNA",
    "long_noncoding",
    "short_noncoding",
    "pseudogene",
];
pub static R_VERSIONS: &[&str] = &["Dev/R/4.4.2"];

/// Fastp numeric settings that must not be negative
pub static FASTP_NON_NEGATIVE: &[&str] = &[
    "trim_front1",
    "trim_tail1",
    "cut_front_window_size",
    "cut_tail_window_size",
    "cut_right_window_size",
    "cut_front_mean_quality",
    "cut_tail_mean_quality",
    "cut_right_mean_quality",
    "average_qual",
    "max_len1",
    "max_len2",
    "poly_x_min_len",
    "length_required",
];

/// Cluster resources requested for a job
///
/// A `Some` option list renders the input as a select, otherwise it's a free number input.
pub struct Resources {
    pub cores: i64,
    pub cores_options: Option<&'static [i64]>,
    pub ram: i64,
    pub ram_options: Option<&'static [i64]>,
    pub scratch: i64,
    pub scratch_options: Option<&'static [i64]>,
    pub process_mode: &'static str,
}

pub fn name() -> FieldSpec {
    FieldSpec::text("name", "").label("Name")
}

pub fn comment() -> FieldSpec {
    FieldSpec::text("comment", "").label("Comment")
}

pub fn mail() -> FieldSpec {
    FieldSpec::email("mail").label("Mail")
}

/// cores, ram, scratch, partition, processMode
pub fn resources(r: Resources) -> Vec<FieldSpec> {
    let number = |key: &'static str, label: &'static str, options: Option<&'static [i64]>, default: i64| {
        let spec = match options {
            Some(options) => FieldSpec::int_choice(key, options, default),
            None => FieldSpec::integer(key, default),
        };
        spec.label(label)
    };
    let process_modes: &'static [&'static str] = match r.process_mode {
        "SAMPLE" => &["SAMPLE"],
        _ => &["DATASET"],
    };

    vec![
        number("cores", "Cores", r.cores_options, r.cores),
        number("ram", "RAM", r.ram_options, r.ram),
        number("scratch", "Scratch", r.scratch_options, r.scratch),
        FieldSpec::choice("partition", PARTITIONS, "employee").label("Partition"),
        FieldSpec::choice("processMode", process_modes, r.process_mode).label("Process Mode"),
    ]
}

pub fn second_ref() -> FieldSpec {
    FieldSpec::text("secondRef", "").tooltip(
        "extra DNA/RNA sequences to use for alignment; needs to point to a file on FGCZ servers; \
         ask for upload sushi@fgcz.ethz.ch",
    )
}

/// Read preprocessing with fastp, from trim_front1 to cmdOptionsFastp
pub fn fastp() -> Vec<FieldSpec> {
    vec![
        FieldSpec::integer("trim_front1", 0)
            .tooltip("trimming how many bases in front for read1 (and read2), default is 0."),
        FieldSpec::integer("trim_tail1", 0)
            .tooltip("trimming how many bases in tail for read1 (and read2), default is 0."),
        FieldSpec::flag("cut_front", false).tooltip(
            "move a sliding window from front (5p) to tail, drop the bases in the window if its \
             mean quality < threshold, stop otherwise.",
        ),
        FieldSpec::integer("cut_front_window_size", 4).tooltip("size of the window used by cut_front."),
        FieldSpec::integer("cut_front_mean_quality", 20)
            .tooltip("quality threshold for bases to be dropped by cut_front."),
        FieldSpec::flag("cut_tail", false).tooltip(
            "move a sliding window from tail (3p) to front, drop the bases in the window if mean \
             quality < threshold, stop otherwise.",
        ),
        FieldSpec::integer("cut_tail_window_size", 4).tooltip("size of the window used by cut_tail."),
        FieldSpec::integer("cut_tail_mean_quality", 20)
            .tooltip("quality threshold for bases to be dropped by cut_tail."),
        FieldSpec::flag("cut_right", false).tooltip(
            "move a sliding window from front to tail, if meet one window with mean quality < \
             threshold, drop the bases in the window and the right part, and then stop.",
        ),
        FieldSpec::integer("cut_right_window_size", 4).tooltip("size of the window used by cut_right."),
        FieldSpec::integer("cut_right_mean_quality", 20)
            .tooltip("quality threshold for bases to be dropped by cut_right."),
        FieldSpec::integer("average_qual", 0).tooltip(
            "if one read's average quality score < average_qual, then this read/pair is discarded. \
             Default 0 means no requirement.",
        ),
        FieldSpec::integer("max_len1", 0).tooltip(
            "if read1 is longer than max_len1, then trim read1 at its tail to make it as long as \
             max_len1. Default 0 means no limitation.",
        ),
        FieldSpec::integer("max_len2", 0).tooltip(
            "if read2 is longer than max_len2, then trim read2 at its tail to make it as long as \
             max_len2. Default 0 means no limitation.",
        ),
        FieldSpec::integer("poly_x_min_len", 10)
            .tooltip("the minimum length to detect polyX in the read tail. 10 by default."),
        FieldSpec::integer("length_required", 18)
            .tooltip("reads shorter than length_required will be discarded."),
        FieldSpec::text("cmdOptionsFastp", ""),
    ]
}
