//! Which sidebar to show for a session
//!
//! Sessions carry the B-Fabric application id, which is only meaningful together with the
//! environment that issued the token.

use log::warn;

use crate::app::bowtie2::Bowtie2;
use crate::app::cellranger::CellRanger;
use crate::app::count_qc::CountQC;
use crate::app::deseq2::DESeq2;
use crate::app::edger::EdgeR;
use crate::app::empty::EmptyApp;
use crate::app::fastq_screen::{FastqScreen, FastqScreen10x};
use crate::app::fastqc::{Fastqc, Fastqc10x};
use crate::app::feature_counts::FeatureCounts;
use crate::app::merge_run_data::MergeRunData;
use crate::app::star::Star;
use crate::app::SushiApp;
use crate::namespace::Environment;

pub type Entry = (&'static str, &'static dyn SushiApp);

static TEST: &[Entry] = &[
    ("373", &MergeRunData),
    ("434", &Fastqc),
    ("111", &Fastqc10x),
    ("377", &EdgeR),
    ("333", &DESeq2),
    ("444", &Star),
    ("555", &Bowtie2),
    ("666", &CountQC),
    ("777", &FeatureCounts),
    ("888", &CellRanger),
    ("999", &FastqScreen10x),
];

// no production application ids are registered yet
static PROD: &[Entry] = &[];

/// Every app, including those without an application id
static ALL: &[&dyn SushiApp] = &[
    &MergeRunData,
    &Fastqc,
    &Fastqc10x,
    &EdgeR,
    &DESeq2,
    &Star,
    &Bowtie2,
    &CountQC,
    &FeatureCounts,
    &CellRanger,
    &FastqScreen,
    &FastqScreen10x,
];

pub fn entries(environment: Environment) -> &'static [Entry] {
    match environment {
        Environment::Test => TEST,
        Environment::Prod => PROD,
    }
}

/// Unknown application ids get the placeholder [EmptyApp]
pub fn lookup(environment: Environment, app_id: &str) -> &'static dyn SushiApp {
    match entries(environment).iter().find(|(id, _)| *id == app_id.trim()) {
        Some((_, app)) => *app,
        None => {
            warn!("No app registered for application id {app_id} in {environment}");
            &EmptyApp
        }
    }
}

/// Case-insensitive lookup by `sushi_fabric` class name
pub fn by_class(class_name: &str) -> Option<&'static dyn SushiApp> {
    ALL.iter().copied().find(|app| app.class_name().eq_ignore_ascii_case(class_name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_resolve() {
        assert_eq!(lookup(Environment::Test, "377").class_name(), "EdgeR");
        assert_eq!(lookup(Environment::Test, "111").class_name(), "Fastqc10xApp");
        assert_eq!(lookup(Environment::Test, "999").class_name(), "FastqScreen10xApp");
    }

    #[test]
    fn unknown_ids_are_not_runnable() {
        assert!(!lookup(Environment::Test, "12").is_runnable());
        assert!(!lookup(Environment::Prod, "377").is_runnable());
    }

    #[test]
    fn apps_without_an_id_are_found_by_class() {
        assert!(entries(Environment::Test).iter().all(|(_, app)| app.class_name() != "FastqScreenApp"));
        assert_eq!(by_class("fastqscreenapp").map(|app| app.title()), Some("FastqScreen"));
        assert!(by_class("NoSuchApp").is_none());
    }

    #[test]
    fn class_names_are_unique() {
        let mut names: Vec<&str> = ALL.iter().map(|app| app.class_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ALL.len());
    }
}
