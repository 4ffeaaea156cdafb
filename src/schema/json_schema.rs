use super::{Schema, SchemaError, Validation};
use crate::core::Issue;
use async_trait::async_trait;
use jsonschema::Validator;
use serde_json::Value;

/// A compiled JSON Schema document.
///
/// Every error reported by the validator becomes one [`Issue`] carrying its
/// instance path, schema path and keyword; the validated value is passed on
/// unchanged.
pub struct JsonSchema {
    document: Value,
    validator: Validator,
}

impl JsonSchema {
    /// Compile `document`, auto-detecting its draft from `$schema`.
    pub fn new(document: Value) -> Result<Self, SchemaError> {
        let validator = jsonschema::validator_for(&document)
            .map_err(|err| SchemaError::InvalidSchema(err.to_string()))?;
        Ok(Self {
            document,
            validator,
        })
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    /// All issues `value` has against this schema, empty when it conforms.
    pub fn issues(&self, value: &Value) -> Vec<Issue> {
        self.validator
            .iter_errors(value)
            .map(|err| {
                Issue::new(err.instance_path.to_string(), err.to_string())
                    .at_schema_path(err.schema_path.to_string())
            })
            .collect()
    }
}

impl std::fmt::Debug for JsonSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonSchema")
            .field("document", &self.document)
            .finish()
    }
}

#[async_trait]
impl Schema for JsonSchema {
    type Output = Value;

    async fn validate(&self, value: Value) -> Validation<Value> {
        let issues = self.issues(&value);
        if issues.is_empty() {
            Ok(value)
        } else {
            Err(issues)
        }
    }
}
