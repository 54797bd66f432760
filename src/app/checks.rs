//! Warning predicates shared by the parameter sidebars
//!
//! Each predicate looks at one or two fields and appends a human readable warning. Warnings are
//! advisory: they open the warning alert but don't block a submission.

use std::sync::LazyLock;

use regex::Regex;

use crate::app::form::FormState;

/// "NAME [Factor]" or "NAME [Numeric]"
static COVARIATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.+\s*\[(Factor|Numeric)\]$").expect("valid regex"));

#[derive(Debug, Default)]
pub struct Warnings {
    messages: Vec<String>,
}

impl Warnings {
    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn require(&mut self, form: &FormState, key: &str, message: &str) {
        if !form.is_present(key) {
            self.push(message);
        }
    }

    /// Empty is fine, negative numbers are not
    pub fn non_negative(&mut self, form: &FormState, keys: &[&str]) {
        for key in keys {
            if form.number(key).map_or(false, |v| v < 0.0) {
                self.push(format!("Warning: {key} must be ≥ 0."));
            }
        }
    }

    /// Probability thresholds: 0 < v ≤ 1, and an empty value is a warning too
    pub fn unit_interval(&mut self, form: &FormState, keys: &[&str]) {
        for key in keys {
            match form.number(key) {
                Some(v) if v > 0.0 && v <= 1.0 => {}
                _ => self.push(format!("Warning: {key} must be > 0 and ≤ 1.")),
            }
        }
    }

    /// Only compared when both sides are filled in
    pub fn distinct(&mut self, form: &FormState, a: &str, b: &str) {
        if let (Some(left), Some(right)) = (form.text(a), form.text(b)) {
            if left == right {
                self.push(format!("Warning: {a} should be different from {b}."));
            }
        }
    }

    pub fn covariate(&mut self, form: &FormState, key: &str) {
        if let Some(value) = form.text(key) {
            if !COVARIATE.is_match(value) {
                self.push(format!(
                    "Warning: {key} must be in the format 'NAME [Factor]' or 'NAME [Numeric]'."
                ));
            }
        }
    }

    pub fn reject(&mut self, form: &FormState, key: &str, sentinel: &str, message: &str) {
        if form.text(key) == Some(sentinel) {
            self.push(message);
        }
    }

    /// The name becomes a directory under the scratch path
    pub fn job_name(&mut self, form: &FormState) {
        match form.name() {
            None => self.push("Warning: name is required."),
            Some(name) if !is_valid_job_name(name) => {
                self.push("Warning: name must not contain '/', whitespace or be '.' or '..'.")
            }
            Some(_) => {}
        }
    }

    pub fn into_vec(self) -> Vec<String> {
        self.messages
    }
}

pub fn is_valid_job_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.chars().any(|c| c == '/' || c == '\\' || c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::app::field::FieldSpec;

    fn form(input: serde_json::Value) -> FormState {
        let fields = vec![
            FieldSpec::text("name", "job_1"),
            FieldSpec::text("refBuild", ""),
            FieldSpec::text("sampleGroup", "Hetero"),
            FieldSpec::text("refGroup", "Controls"),
            FieldSpec::text("grouping2", ""),
            FieldSpec::float("pValThreshGO", 0.01),
            FieldSpec::integer("max_len1", 0),
            FieldSpec::text("strandMode", "sense"),
        ];
        let mut form = FormState::from_fields(&fields);
        form.apply(&fields, input.as_object().unwrap()).unwrap();
        form
    }

    fn warnings_for(form: &FormState, check: impl Fn(&mut Warnings, &FormState)) -> Vec<String> {
        let mut warnings = Warnings::default();
        check(&mut warnings, form);
        warnings.into_vec()
    }

    #[test]
    fn required_field_rejected_when_empty() {
        let f = form(json!({}));
        let w = warnings_for(&f, |w, f| w.require(f, "refBuild", "Warning: refBuild is required."));
        assert_eq!(w, vec!["Warning: refBuild is required."]);

        let f = form(json!({"refBuild": "Homo_sapiens/GENCODE/GRCh38"}));
        assert!(warnings_for(&f, |w, f| w.require(f, "refBuild", "x")).is_empty());
    }

    #[test]
    fn numeric_field_rejected_when_negative() {
        let f = form(json!({"max_len1": -1}));
        assert_eq!(
            warnings_for(&f, |w, f| w.non_negative(f, &["max_len1"])),
            vec!["Warning: max_len1 must be ≥ 0."]
        );
        let f = form(json!({"max_len1": null}));
        assert!(warnings_for(&f, |w, f| w.non_negative(f, &["max_len1"])).is_empty());
    }

    #[test]
    fn two_fields_rejected_when_equal() {
        let f = form(json!({"sampleGroup": "Controls"}));
        assert_eq!(
            warnings_for(&f, |w, f| w.distinct(f, "sampleGroup", "refGroup")),
            vec!["Warning: sampleGroup should be different from refGroup."]
        );
    }

    #[test]
    fn unit_interval_bounds() {
        for (value, warned) in [(json!(0.0), true), (json!(1.0), false), (json!(1.5), true), (json!(null), true)] {
            let f = form(json!({ "pValThreshGO": value.clone() }));
            let w = warnings_for(&f, |w, f| w.unit_interval(f, &["pValThreshGO"]));
            assert_eq!(!w.is_empty(), warned, "value {value}");
        }
    }

    #[test]
    fn covariate_needs_type_suffix() {
        let f = form(json!({"grouping2": "Batch [Factor]"}));
        assert!(warnings_for(&f, |w, f| w.covariate(f, "grouping2")).is_empty());
        let f = form(json!({"grouping2": "Age [Numeric]"}));
        assert!(warnings_for(&f, |w, f| w.covariate(f, "grouping2")).is_empty());
        let f = form(json!({"grouping2": "Batch"}));
        assert_eq!(warnings_for(&f, |w, f| w.covariate(f, "grouping2")).len(), 1);
        let f = form(json!({"grouping2": "[Factor]"}));
        assert_eq!(warnings_for(&f, |w, f| w.covariate(f, "grouping2")).len(), 1);
    }

    #[test]
    fn sentinel_value_rejected() {
        let f = form(json!({"strandMode": "none"}));
        assert_eq!(warnings_for(&f, |w, f| w.reject(f, "strandMode", "none", "no strand")).len(), 1);
    }

    #[test]
    fn job_names_must_be_directory_safe() {
        assert!(is_valid_job_name("p1000_STAR"));
        assert!(!is_valid_job_name("../etc"));
        assert!(!is_valid_job_name("my job"));
        assert!(!is_valid_job_name(".."));

        let f = form(json!({"name": ""}));
        assert_eq!(warnings_for(&f, |w, f| w.job_name(f)), vec!["Warning: name is required."]);
    }
}
