use super::{Schema, Validation};
use crate::core::Issue;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;

/// Decodes values into `T` through its `Deserialize` impl.
///
/// serde stops at the first mismatch, so a failure always carries exactly
/// one issue with serde's message.
pub struct Typed<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> Typed<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for Typed<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Typed<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> Copy for Typed<T> {}

impl<T> fmt::Debug for Typed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Typed<{}>", std::any::type_name::<T>())
    }
}

pub fn typed<T>() -> Typed<T> {
    Typed::new()
}

#[async_trait]
impl<T: DeserializeOwned + Send> Schema for Typed<T> {
    type Output = T;

    async fn validate(&self, value: Value) -> Validation<T> {
        serde_json::from_value(value).map_err(|err| vec![Issue::root(err.to_string())])
    }
}
