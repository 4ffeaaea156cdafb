pub mod error;

pub use error::{AdapterError, AdapterResult, INPUT_MISMATCH, Issue, OUTPUT_MISMATCH, RuntimeError};
