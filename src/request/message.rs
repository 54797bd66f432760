use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use jsonschema::JSONSchema;
use log::{info, warn};
use serde_json::Value;

use crate::request::session::Session;

#[derive(Debug)]
pub enum MessageError {
    JSONValidationError(Vec<String>),
    JSONDecodeError(String),
    DeserialisationError(String),
    MessageReadError(String),
}

impl fmt::Display for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MessageError::JSONValidationError(errors) => {
                write!(f, "session fails validation: {}", errors.join("; "))
            }
            MessageError::JSONDecodeError(err) => write!(f, "session is not valid JSON: {err}"),
            MessageError::DeserialisationError(err) => write!(f, "can't deserialise session: {err}"),
            MessageError::MessageReadError(err) => write!(f, "can't read session: {err}"),
        }
    }
}

impl std::error::Error for MessageError {}

/// A session file written by the B-Fabric app launcher
pub struct Message<'a> {
    pub path: PathBuf,
    pub compiled_schema: &'a JSONSchema,
}

impl Message<'_> {
    pub fn read(&self) -> Result<Session, MessageError> {
        let json: Value = self.parse_untyped_json()?;

        match self.validate(&json) {
            Ok(_) => {
                info!("Session is valid");
                self.parse_json(json)
            }
            Err(err) => {
                warn!("Session fails validation");
                Err(err)
            }
        }
    }

    fn validate(&self, json: &Value) -> Result<(), MessageError> {
        info!("Validating raw session against JSON schema");
        self.compiled_schema.validate(json).map_err(|errors| {
            let errors: Vec<String> = errors.map(|err| format!("{} at {}", err, err.instance_path)).collect();
            MessageError::JSONValidationError(errors)
        })
    }

    fn read_file(&self) -> Result<String, MessageError> {
        let path: &Path = self.path.as_path();
        info!("Reading session at {}", path.display());
        fs::read_to_string(path).map_err(|err| {
            warn!("Can't read session at path {}: {}", path.display(), err);
            MessageError::MessageReadError(format!("{}: {err}", path.display()))
        })
    }

    fn parse_json(&self, value: Value) -> Result<Session, MessageError> {
        info!("Deserialising valid JSON into typed Rust object");
        serde_json::from_value::<Session>(value).map_err(|err| MessageError::DeserialisationError(err.to_string()))
    }

    fn parse_untyped_json(&self) -> Result<Value, MessageError> {
        info!("Parsing JSON into untyped structure");
        let json_string = self.read_file()?;
        serde_json::from_str::<Value>(&json_string).map_err(|err| MessageError::JSONDecodeError(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::request::schema::load_schema;

    fn write(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_valid_session() {
        let schema = load_schema().unwrap();
        let file = write(r#"{"token_data": {"environment": "Test", "application_data": "377"}, "entity_data": {"name": "counts"}}"#);
        let message = Message { path: file.path().to_path_buf(), compiled_schema: &schema };
        let session = message.read().unwrap();
        assert_eq!(session.app_id(), "377");
        assert_eq!(session.dataset_name(), "counts");
    }

    #[test]
    fn empty_app_data_is_accepted() {
        let schema = load_schema().unwrap();
        let file = write(r#"{"token_data": {"environment": "test", "application_data": 434}, "entity_data": {}, "app_data": {}}"#);
        let message = Message { path: file.path().to_path_buf(), compiled_schema: &schema };
        let session = message.read().unwrap();
        assert_eq!(session.input_dataset_application(), "434");
    }

    #[test]
    fn invalid_session_lists_errors() {
        let schema = load_schema().unwrap();
        let file = write(r#"{"token_data": {"environment": ""}}"#);
        let message = Message { path: file.path().to_path_buf(), compiled_schema: &schema };
        match message.read() {
            Err(MessageError::JSONValidationError(errors)) => assert!(!errors.is_empty()),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let schema = load_schema().unwrap();
        let file = write("token_data = 1");
        let message = Message { path: file.path().to_path_buf(), compiled_schema: &schema };
        assert!(matches!(message.read(), Err(MessageError::JSONDecodeError(_))));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let schema = load_schema().unwrap();
        let message = Message { path: PathBuf::from("/nonexistent/session.json"), compiled_schema: &schema };
        assert!(matches!(message.read(), Err(MessageError::MessageReadError(_))));
    }
}
