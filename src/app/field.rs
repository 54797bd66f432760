use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// How a sidebar input is presented and how raw input is coerced
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    Email,
    Integer,
    Float,
    /// True/False select
    Flag,
    Choice(&'static [&'static str]),
    IntChoice(&'static [i64]),
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FieldKind::Text => write!(f, "text"),
            FieldKind::Email => write!(f, "email"),
            FieldKind::Integer => write!(f, "integer"),
            FieldKind::Float => write!(f, "number"),
            FieldKind::Flag => write!(f, "True|False"),
            FieldKind::Choice(options) => write!(f, "{}", options.join("|")),
            FieldKind::IntChoice(options) => {
                let options: Vec<String> = options.iter().map(|o| o.to_string()).collect();
                write!(f, "{}", options.join("|"))
            }
        }
    }
}

/// A scalar form value
///
/// Display gives the text written to parameters.tsv, which is what sushi_fabric reads back:
/// flags are `True`/`False`, floats keep their decimal point and missing values are empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Missing,
}

impl FieldValue {
    pub fn text(value: &str) -> FieldValue {
        FieldValue::Text(value.to_string())
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// Present means set to something other than an empty string
    pub fn is_present(&self) -> bool {
        match self {
            FieldValue::Missing => false,
            FieldValue::Text(s) => !s.trim().is_empty(),
            _ => true,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FieldValue::Flag(true) => write!(f, "True"),
            FieldValue::Flag(false) => write!(f, "False"),
            FieldValue::Integer(i) => write!(f, "{i}"),
            // Debug keeps "1.0" where Display would print "1"
            FieldValue::Float(x) => write!(f, "{x:?}"),
            FieldValue::Text(s) => write!(f, "{s}"),
            FieldValue::Missing => Ok(()),
        }
    }
}

#[derive(Debug)]
pub enum FormError {
    UnknownField(String),
    InvalidValue { field: &'static str, value: String },
    InvalidChoice { field: &'static str, value: String },
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FormError::UnknownField(key) => write!(f, "unknown field '{key}'"),
            FormError::InvalidValue { field, value } => {
                write!(f, "'{value}' is not a valid value for {field}")
            }
            FormError::InvalidChoice { field, value } => {
                write!(f, "'{value}' is not one of the options for {field}")
            }
        }
    }
}

impl std::error::Error for FormError {}

/// One sidebar input
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Key in parameters.tsv
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub default: FieldValue,
    pub tooltip: Option<&'static str>,
}

impl FieldSpec {
    fn new(key: &'static str, kind: FieldKind, default: FieldValue) -> FieldSpec {
        FieldSpec { key, label: key, kind, default, tooltip: None }
    }

    pub fn text(key: &'static str, default: &str) -> FieldSpec {
        FieldSpec::new(key, FieldKind::Text, FieldValue::text(default))
    }

    pub fn email(key: &'static str) -> FieldSpec {
        FieldSpec::new(key, FieldKind::Email, FieldValue::text(""))
    }

    pub fn integer(key: &'static str, default: i64) -> FieldSpec {
        FieldSpec::new(key, FieldKind::Integer, FieldValue::Integer(default))
    }

    pub fn float(key: &'static str, default: f64) -> FieldSpec {
        FieldSpec::new(key, FieldKind::Float, FieldValue::Float(default))
    }

    pub fn flag(key: &'static str, default: bool) -> FieldSpec {
        FieldSpec::new(key, FieldKind::Flag, FieldValue::Flag(default))
    }

    pub fn choice(key: &'static str, options: &'static [&'static str], default: &str) -> FieldSpec {
        FieldSpec::new(key, FieldKind::Choice(options), FieldValue::text(default))
    }

    pub fn int_choice(key: &'static str, options: &'static [i64], default: i64) -> FieldSpec {
        FieldSpec::new(key, FieldKind::IntChoice(options), FieldValue::Integer(default))
    }

    pub fn label(mut self, label: &'static str) -> FieldSpec {
        self.label = label;
        self
    }

    pub fn tooltip(mut self, tooltip: &'static str) -> FieldSpec {
        self.tooltip = Some(tooltip);
        self
    }

    /// Start the field empty, e.g. a number the user has to fill in
    pub fn unset(mut self) -> FieldSpec {
        self.default = FieldValue::Missing;
        self
    }

    /// Coerce raw JSON input into a value of this field's kind
    ///
    /// Select inputs hand numbers over as strings and flags as "True"/"False", so both spellings
    /// are accepted. An empty string clears numeric and flag fields.
    pub fn coerce(&self, raw: &Value) -> Result<FieldValue, FormError> {
        let value = match (&self.kind, raw) {
            (_, Value::Null) => FieldValue::Missing,
            (FieldKind::Integer | FieldKind::IntChoice(_), raw) => {
                parse_integer(raw).ok_or_else(|| self.invalid(raw))?
            }
            (FieldKind::Float, raw) => parse_float(raw).ok_or_else(|| self.invalid(raw))?,
            (FieldKind::Flag, raw) => parse_flag(raw).ok_or_else(|| self.invalid(raw))?,
            (FieldKind::Text | FieldKind::Email | FieldKind::Choice(_), Value::String(s)) => {
                FieldValue::Text(s.clone())
            }
            (FieldKind::Text | FieldKind::Email | FieldKind::Choice(_), Value::Number(n)) => {
                FieldValue::Text(n.to_string())
            }
            (_, raw) => return Err(self.invalid(raw)),
        };
        self.check_choice(value)
    }

    fn check_choice(&self, value: FieldValue) -> Result<FieldValue, FormError> {
        let allowed = match (&self.kind, &value) {
            (FieldKind::Choice(options), FieldValue::Text(s)) => s.is_empty() || options.contains(&s.as_str()),
            (FieldKind::IntChoice(options), FieldValue::Integer(i)) => options.contains(i),
            _ => true,
        };
        match allowed {
            true => Ok(value),
            false => Err(FormError::InvalidChoice { field: self.key, value: value.to_string() }),
        }
    }

    fn invalid(&self, raw: &Value) -> FormError {
        FormError::InvalidValue { field: self.key, value: raw.to_string() }
    }
}

fn parse_integer(raw: &Value) -> Option<FieldValue> {
    match raw {
        Value::Number(n) => match n.as_i64() {
            Some(i) => Some(FieldValue::Integer(i)),
            None => n
                .as_f64()
                .filter(|x| x.fract() == 0.0 && *x >= i64::MIN as f64 && *x < i64::MAX as f64)
                .map(|x| FieldValue::Integer(x as i64)),
        },
        Value::String(s) if s.trim().is_empty() => Some(FieldValue::Missing),
        Value::String(s) => s.trim().parse::<i64>().ok().map(FieldValue::Integer),
        _ => None,
    }
}

fn parse_float(raw: &Value) -> Option<FieldValue> {
    match raw {
        Value::Number(n) => n.as_f64().filter(|x| x.is_finite()).map(FieldValue::Float),
        Value::String(s) if s.trim().is_empty() => Some(FieldValue::Missing),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|x| x.is_finite()).map(FieldValue::Float),
        _ => None,
    }
}

fn parse_flag(raw: &Value) -> Option<FieldValue> {
    match raw {
        Value::Bool(b) => Some(FieldValue::Flag(*b)),
        Value::String(s) => match s.trim() {
            "" => Some(FieldValue::Missing),
            "True" | "true" => Some(FieldValue::Flag(true)),
            "False" | "false" => Some(FieldValue::Flag(false)),
            _ => None,
        },
        _ => None,
    }
}
