//! Validation-library bindings
//!
//! The pipeline only depends on [`Schema`]: "validate this JSON value and
//! either decode it or list every issue". Each validation backend gets one
//! thin binding here instead of its own copy of the pipeline.
//!
//! - `typed.rs` - serde decoding into a Rust type
//! - `json_schema.rs` - JSON Schema documents (feature `json-schema`)
//! - `derived.rs` - JSON Schema derived from a Rust type (feature `schemars`)

mod typed;
#[cfg(feature = "json-schema")]
mod json_schema;
#[cfg(feature = "schemars")]
mod derived;

use crate::core::Issue;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

pub use typed::{Typed, typed};
#[cfg(feature = "json-schema")]
pub use json_schema::JsonSchema;
#[cfg(feature = "schemars")]
pub use derived::SchemaFor;

pub type Validation<T> = Result<T, Vec<Issue>>;

/// Schema capability consumed by the pipeline.
///
/// Implementations must report all issues they can find in one call rather
/// than stopping at the first one.
#[async_trait]
pub trait Schema: Send + Sync {
    type Output: Send;

    async fn validate(&self, value: Value) -> Validation<Self::Output>;
}

#[async_trait]
impl<S: Schema + ?Sized> Schema for &S {
    type Output = S::Output;

    async fn validate(&self, value: Value) -> Validation<Self::Output> {
        (**self).validate(value).await
    }
}

#[async_trait]
impl<S: Schema + ?Sized> Schema for Arc<S> {
    type Output = S::Output;

    async fn validate(&self, value: Value) -> Validation<Self::Output> {
        (**self).validate(value).await
    }
}

/// Accepts every value unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Any;

#[async_trait]
impl Schema for Any {
    type Output = Value;

    async fn validate(&self, value: Value) -> Validation<Value> {
        Ok(value)
    }
}

/// Raised while building a schema binding, never during a run.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Invalid JSON Schema: {0}")]
    InvalidSchema(String),

    #[error("Schema generation failed: {0}")]
    Generation(String),
}
