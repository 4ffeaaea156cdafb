use crate::infer::Fallback;
use serde::{Deserialize, Serialize};

/// Adapter configuration
///
/// Deserializable so it can live inside an application's own config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Fallback used by inference when a call does not pick one
    pub default_fallback: Fallback,

    /// Log serialized inputs and raw runtime outputs at TRACE level
    pub log_payloads: bool,
}

impl AdapterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default inference fallback
    pub fn default_fallback(mut self, fallback: Fallback) -> Self {
        self.default_fallback = fallback;
        self
    }

    /// Enable or disable payload logging
    pub fn log_payloads(mut self, enabled: bool) -> Self {
        self.log_payloads = enabled;
        self
    }
}
