use super::{JsonSchema, Schema, SchemaError, Validation};
use crate::core::Issue;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;

/// JSON Schema generated from `T`'s `schemars::JsonSchema` impl.
///
/// Values are first checked against the generated schema, which reports
/// every issue, and only then decoded into `T`.
pub struct SchemaFor<T> {
    schema: JsonSchema,
    _marker: PhantomData<fn() -> T>,
}

impl<T: schemars::JsonSchema> SchemaFor<T> {
    pub fn new() -> Result<Self, SchemaError> {
        let generated = schemars::schema_for!(T);
        let document = serde_json::to_value(&generated)
            .map_err(|err| SchemaError::Generation(err.to_string()))?;
        Ok(Self {
            schema: JsonSchema::new(document)?,
            _marker: PhantomData,
        })
    }
}

impl<T> SchemaFor<T> {
    /// The generated JSON Schema document.
    pub fn document(&self) -> &Value {
        self.schema.document()
    }
}

impl<T> std::fmt::Debug for SchemaFor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaFor")
            .field("type", &std::any::type_name::<T>())
            .field("schema", &self.schema)
            .finish()
    }
}

#[async_trait]
impl<T: DeserializeOwned + Send> Schema for SchemaFor<T> {
    type Output = T;

    async fn validate(&self, value: Value) -> Validation<T> {
        let issues = self.schema.issues(&value);
        if !issues.is_empty() {
            return Err(issues);
        }
        serde_json::from_value(value).map_err(|err| vec![Issue::root(err.to_string())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, schemars::JsonSchema, PartialEq)]
    struct Account {
        id: u64,
        owner: String,
    }

    #[tokio::test]
    async fn test_decodes_conforming_value() {
        let schema = SchemaFor::<Account>::new().unwrap();
        let account = schema
            .validate(json!({"id": 7, "owner": "bob"}))
            .await
            .unwrap();
        assert_eq!(
            account,
            Account {
                id: 7,
                owner: "bob".into()
            }
        );
    }

    #[tokio::test]
    async fn test_reports_all_issues_before_decoding() {
        let schema = SchemaFor::<Account>::new().unwrap();
        let issues = schema
            .validate(json!({"id": "seven", "owner": 3}))
            .await
            .unwrap_err();
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().any(|issue| issue.path == "/id"));
        assert!(issues.iter().any(|issue| issue.path == "/owner"));
    }

    #[test]
    fn test_exposes_generated_document() {
        let schema = SchemaFor::<Account>::new().unwrap();
        assert_eq!(schema.document()["type"], json!("object"));
    }
}
