use log::info;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::app::field::{FieldSpec, FieldValue, FormError};

/// Current values of a parameter sidebar, in parameters.tsv order
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    entries: Vec<(&'static str, FieldValue)>,
}

impl FormState {
    pub fn from_fields(fields: &[FieldSpec]) -> FormState {
        let entries = fields.iter().map(|f| (f.key, f.default.clone())).collect();
        FormState { entries }
    }

    pub fn set(&mut self, key: &str, value: FieldValue) -> Result<(), FormError> {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => {
                *slot = value;
                Ok(())
            }
            None => Err(FormError::UnknownField(key.to_string())),
        }
    }

    /// Like [FormState::set], but a no-op for forms without the field
    pub fn populate(&mut self, key: &str, value: FieldValue) {
        if let Some((_, slot)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            *slot = value;
        }
    }

    /// Overwrite defaults with user input, coercing each value to its field's kind
    pub fn apply(&mut self, fields: &[FieldSpec], input: &Map<String, Value>) -> Result<(), FormError> {
        for (key, raw) in input {
            let spec = fields
                .iter()
                .find(|f| f.key == key)
                .ok_or_else(|| FormError::UnknownField(key.clone()))?;
            let value = spec.coerce(raw)?;
            info!("Setting {key} = {value}");
            self.set(key, value)?;
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Non-empty text value
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some(FieldValue::Text(s)) if !s.trim().is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(FieldValue::as_number)
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.get(key) {
            Some(FieldValue::Flag(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn is_present(&self, key: &str) -> bool {
        self.get(key).map_or(false, FieldValue::is_present)
    }

    /// The job name, also used as the scratch directory and next dataset name
    pub fn name(&self) -> Option<&str> {
        self.text("name")
    }

    pub fn parameters(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }
}

impl Serialize for FormState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::text("name", ""),
            FieldSpec::integer("cores", 8),
            FieldSpec::flag("paired", true),
        ]
    }

    #[test]
    fn apply_overrides_in_place() {
        let fields = fields();
        let mut form = FormState::from_fields(&fields);
        let input = json!({"cores": "4", "name": "run_1"});
        form.apply(&fields, input.as_object().unwrap()).unwrap();

        assert_eq!(form.number("cores"), Some(4.0));
        assert_eq!(form.name(), Some("run_1"));
        assert_eq!(form.flag("paired"), Some(true));
        let keys: Vec<&str> = form.parameters().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["name", "cores", "paired"]);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let fields = fields();
        let mut form = FormState::from_fields(&fields);
        let input = json!({"ram": 4});
        assert!(matches!(
            form.apply(&fields, input.as_object().unwrap()),
            Err(FormError::UnknownField(_))
        ));
    }

    #[test]
    fn serialises_in_field_order() {
        let form = FormState::from_fields(&fields());
        assert_eq!(
            serde_json::to_string(&form).unwrap(),
            r#"{"name":"","cores":8,"paired":true}"#
        );
    }
}
