// ============================================================================
// jqx-adapter
// ============================================================================
//
// Schema-validated round-trips through jq-style filter runtimes. The runtime
// that actually evaluates filters is supplied by the caller through the
// `DynamicRuntime` / `TypedRuntime` traits; validation backends plug in
// through `schema::Schema`.

extern crate self as jqx_adapter;

pub mod core;
pub mod config;
pub mod runtime;
pub mod schema;
pub mod infer;
pub mod pipeline;
pub mod adapter;
pub mod prelude;

pub use adapter::Adapter;
pub use config::AdapterConfig;
pub use crate::core::{AdapterError, AdapterResult, Issue, RuntimeError};
pub use infer::{DescribeShape, Fallback, Shape, infer_output, infer_shape};
pub use jqx_adapter_derive::DescribeShape;
pub use pipeline::{
    FilterOptions, InferredOptions, QueryOptions, run_filter, run_inferred, run_query,
};
pub use runtime::{DynamicRuntime, RuntimeFn, RuntimeOutput, TypedRuntime, runtime_fn};
pub use schema::{Schema, SchemaError, Validation};
