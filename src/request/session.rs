use anyhow::{anyhow, Result};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::namespace::Environment;

/// Everything the runner knows about the user, the entity and the application
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Session {
    pub token_data: TokenData,
    #[serde(default)]
    pub entity_data: EntityData,
    #[serde(default)]
    pub app_data: Option<AppData>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenData {
    pub environment: String,
    /// B-Fabric application id, used to pick the sidebar
    #[serde(deserialize_with = "id_string")]
    pub application_data: String,
    #[serde(default)]
    pub user_data: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EntityData {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "optional_id_string")]
    pub container_id: Option<String>,
    #[serde(default)]
    pub full_api_response: Value,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppData {
    #[serde(default, deserialize_with = "optional_id_string")]
    pub id: Option<String>,
}

impl EntityData {
    pub fn named(name: &str) -> EntityData {
        EntityData { name: Some(name.to_string()), ..EntityData::default() }
    }
}

impl Session {
    pub fn environment(&self) -> Result<Environment> {
        self.token_data.environment.parse()
    }

    pub fn app_id(&self) -> &str {
        &self.token_data.application_data
    }

    /// Application id passed to sushi_fabric as `--input_dataset_application`
    pub fn input_dataset_application(&self) -> &str {
        self.app_data
            .as_ref()
            .and_then(|app| app.id.as_deref())
            .unwrap_or(self.app_id())
    }

    /// A configured project id wins over the entity's container
    pub fn project_id(&self, configured: Option<&str>) -> Result<String> {
        configured
            .map(str::to_string)
            .or_else(|| self.entity_data.container_id.clone())
            .ok_or_else(|| anyhow!("No project id configured and the entity has no container"))
    }

    pub fn dataset_name(&self) -> &str {
        self.entity_data.name.as_deref().unwrap_or("Unknown")
    }
}

/// B-Fabric sends ids as numbers or strings depending on the endpoint
fn id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("expected an id, found {other}"))),
    }
}

fn optional_id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(D::Error::custom(format!("expected an id, found {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn session() -> Session {
        serde_json::from_value(json!({
            "token_data": {"environment": "Test", "application_data": 434, "user_data": "alice"},
            "entity_data": {"name": "run_42", "container_id": 3000},
            "app_data": {"id": "501"}
        }))
        .unwrap()
    }

    #[test]
    fn numeric_ids_become_strings() {
        let session = session();
        assert_eq!(session.app_id(), "434");
        assert_eq!(session.entity_data.container_id.as_deref(), Some("3000"));
        assert_eq!(session.environment().unwrap(), Environment::Test);
    }

    #[test]
    fn app_data_takes_precedence_for_input_application() {
        let mut session = session();
        assert_eq!(session.input_dataset_application(), "501");
        session.app_data = None;
        assert_eq!(session.input_dataset_application(), "434");
    }

    #[test]
    fn app_data_without_id_uses_the_token() {
        let session: Session = serde_json::from_value(json!({
            "token_data": {"environment": "test", "application_data": 434},
            "app_data": {}
        }))
        .unwrap();
        assert_eq!(session.input_dataset_application(), "434");
    }

    #[test]
    fn project_id_falls_back_to_container() {
        let mut session = session();
        assert_eq!(session.project_id(Some("p1")).unwrap(), "p1");
        assert_eq!(session.project_id(None).unwrap(), "3000");
        session.entity_data.container_id = None;
        assert!(session.project_id(None).is_err());
    }

    #[test]
    fn missing_entity_name_is_unknown() {
        let session: Session = serde_json::from_value(json!({
            "token_data": {"environment": "test", "application_data": "111"}
        }))
        .unwrap();
        assert_eq!(session.dataset_name(), "Unknown");
        assert!(session.entity_data.full_api_response.is_null());
    }
}
