//! Error model shared by every pipeline run
//!
//! Failures are returned as values. A run yields either the complete
//! validated output list or exactly one `AdapterError`.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const INPUT_MISMATCH: &str = "Input does not match schema";
pub const OUTPUT_MISMATCH: &str = "Output does not match schema";

pub type AdapterResult<T> = Result<T, AdapterError>;

/// One validation failure reported by a schema binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// JSON pointer into the validated value, empty for the root
    pub path: String,
    pub message: String,
    /// Schema keyword that failed (`type`, `required`, ...), when the
    /// binding knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    /// JSON pointer into the schema document at the failing keyword
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_path: Option<String>,
}

impl Issue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            keyword: None,
            schema_path: None,
        }
    }

    /// Attach the failing schema location; the keyword is the last
    /// segment of `schema_path`.
    pub fn at_schema_path(mut self, schema_path: impl Into<String>) -> Self {
        let schema_path = schema_path.into();
        self.keyword = schema_path
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .map(str::to_string);
        self.schema_path = Some(schema_path);
        self
    }

    /// Issue attached to the whole value.
    pub fn root(message: impl Into<String>) -> Self {
        Self::new(String::new(), message)
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Failure reported by the filter runtime itself.
///
/// Runtimes report either a bare message or a positioned diagnostic. Both
/// shapes are kept verbatim so callers can render compiler-style errors.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuntimeError {
    #[error("{0}")]
    Message(String),

    #[error("{message}")]
    Diagnostic {
        code: String,
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        line: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        column: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        offset: Option<usize>,
    },
}

impl RuntimeError {
    pub fn message(&self) -> &str {
        match self {
            RuntimeError::Message(message) => message,
            RuntimeError::Diagnostic { message, .. } => message,
        }
    }
}

impl From<String> for RuntimeError {
    fn from(message: String) -> Self {
        RuntimeError::Message(message)
    }
}

impl From<&str> for RuntimeError {
    fn from(message: &str) -> Self {
        RuntimeError::Message(message.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AdapterError {
    #[error("{message}: {}", join_issues(.issues))]
    InputValidation { message: String, issues: Vec<Issue> },

    #[error("Runtime error: {message}")]
    Runtime {
        message: String,
        #[serde(rename = "runtimeError")]
        runtime_error: RuntimeError,
    },

    #[error("Output {index} is not valid JSON: {message}")]
    OutputParse {
        index: usize,
        raw: String,
        message: String,
    },

    #[error("{message} at output {index}: {}", join_issues(.issues))]
    OutputValidation {
        index: usize,
        message: String,
        issues: Vec<Issue>,
    },
}

impl AdapterError {
    pub(crate) fn input_validation(issues: Vec<Issue>) -> Self {
        AdapterError::InputValidation {
            message: INPUT_MISMATCH.to_string(),
            issues,
        }
    }

    pub(crate) fn runtime(runtime_error: RuntimeError) -> Self {
        AdapterError::Runtime {
            message: runtime_error.message().to_string(),
            runtime_error,
        }
    }

    pub(crate) fn output_validation(index: usize, issues: Vec<Issue>) -> Self {
        AdapterError::OutputValidation {
            index,
            message: OUTPUT_MISMATCH.to_string(),
            issues,
        }
    }

    /// Snake-case tag of the variant, as used in the serialized form.
    pub fn kind(&self) -> &'static str {
        match self {
            AdapterError::InputValidation { .. } => "input_validation",
            AdapterError::Runtime { .. } => "runtime",
            AdapterError::OutputParse { .. } => "output_parse",
            AdapterError::OutputValidation { .. } => "output_validation",
        }
    }

    /// Position in the runtime's result list for output failures.
    pub fn index(&self) -> Option<usize> {
        match self {
            AdapterError::OutputParse { index, .. }
            | AdapterError::OutputValidation { index, .. } => Some(*index),
            _ => None,
        }
    }

    pub fn issues(&self) -> &[Issue] {
        match self {
            AdapterError::InputValidation { issues, .. }
            | AdapterError::OutputValidation { issues, .. } => issues,
            _ => &[],
        }
    }
}

fn join_issues(issues: &[Issue]) -> String {
    issues
        .iter()
        .map(Issue::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
