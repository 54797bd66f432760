use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use jsonschema::{JSONSchema, SchemaResolver, SchemaResolverError};
use serde_json::Value;
use url::Url;

/// included session schema, refers to dataset.json for the entity's API response
static SESSION: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/schema/session.json"));
static DATASET: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/schema/dataset.json"));

pub fn load_schema() -> Result<JSONSchema> {
    let schema_json = read_schema("session.json")?;
    compile_schema(&schema_json)
}

fn read_schema(name: &str) -> Result<Value> {
    let json_string = match name {
        "session.json" => SESSION,
        "dataset.json" => DATASET,
        other => return Err(anyhow!("no embedded schema called {other}")),
    };
    serde_json::from_str(json_string).with_context(|| format!("Invalid JSON in schema {name}"))
}

fn compile_schema(schema: &Value) -> Result<JSONSchema> {
    JSONSchema::options()
        .with_resolver(LocalResolver)
        .compile(schema)
        .map_err(|err| anyhow!("Invalid schema: {err}"))
}

/*
The session schema contains relative references to the other embedded schema
Relative references resolve against the json-schema:/// base and are looked up by file name
*/
struct LocalResolver;

impl SchemaResolver for LocalResolver {
    fn resolve(&self, _root_schema: &Value, url: &Url, original_reference: &str) -> Result<Arc<Value>, SchemaResolverError> {
        match url.scheme() {
            "json-schema" => {
                let name = url.path().trim_start_matches('/');
                let name = if name.is_empty() { original_reference } else { name };
                Ok(Arc::new(read_schema(name)?))
            }
            _ => Err(anyhow!("scheme is not supported")),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn embedded_schema_compiles() {
        let schema = load_schema().unwrap();
        let session = json!({
            "token_data": {"environment": "test", "application_data": 434},
            "entity_data": {"name": "run_42", "full_api_response": {"attribute": [], "item": []}}
        });
        assert!(schema.is_valid(&session));
    }

    #[test]
    fn dataset_reference_is_resolved() {
        let schema = load_schema().unwrap();
        let session = json!({
            "token_data": {"environment": "test", "application_data": 434},
            "entity_data": {"full_api_response": {"attribute": [{"position": 1}]}}
        });
        // attribute without a name
        assert!(!schema.is_valid(&session));
    }

    #[test]
    fn token_is_required() {
        let schema = load_schema().unwrap();
        assert!(!schema.is_valid(&json!({"entity_data": {}})));
    }
}
