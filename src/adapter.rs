//! Runtime handle exposing the pipeline operations
//!
//! Which operations exist is decided by the runtime's type: `filter` and
//! `inferred` are always available, `query` only when the runtime also
//! implements [`TypedRuntime`] for the query type.

use crate::config::AdapterConfig;
use crate::core::AdapterResult;
use crate::infer::{DescribeShape, Shape};
use crate::pipeline::{self, FilterOptions, InferredOptions, QueryOptions};
use crate::runtime::{DynamicRuntime, TypedRuntime};
use crate::schema::Schema;
use serde::Serialize;
use serde_json::Value;

/// Schema-validating front end for a filter runtime.
///
/// # Example
/// ```
/// use jqx_adapter::schema::{Any, typed};
/// use jqx_adapter::{Adapter, FilterOptions, runtime_fn};
/// use serde_json::json;
///
/// # tokio_test::block_on(async {
/// let runtime = runtime_fn(|_filter, _input| async move {
///     Ok(vec![r#""ada""#.to_string(), r#""grace""#.to_string()])
/// });
/// let adapter = Adapter::new(runtime);
/// let names = adapter
///     .filter(FilterOptions::new(
///         ".users[].name",
///         json!({"users": [{"name": "ada"}, {"name": "grace"}]}),
///         Any,
///         typed::<String>(),
///     ))
///     .await
///     .unwrap();
/// assert_eq!(names, ["ada", "grace"]);
/// # });
/// ```
///
/// A runtime without the typed capability has no `query` operation:
///
/// ```compile_fail
/// use jqx_adapter::{Adapter, QueryOptions, runtime_fn, schema::Any};
///
/// async fn demo() {
///     let adapter = Adapter::new(runtime_fn(|_filter, input| async move { Ok(vec![input]) }));
///     let _ = adapter
///         .query(QueryOptions::new(1u8, serde_json::json!(null), Any, Any))
///         .await;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Adapter<R> {
    runtime: R,
    config: AdapterConfig,
}

impl<R: DynamicRuntime> Adapter<R> {
    pub fn new(runtime: R) -> Self {
        Self::with_config(runtime, AdapterConfig::default())
    }

    pub fn with_config(runtime: R, config: AdapterConfig) -> Self {
        Self { runtime, config }
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    pub fn into_runtime(self) -> R {
        self.runtime
    }

    /// Run a filter with input and output validation.
    pub async fn filter<I, O>(&self, options: FilterOptions<I, O>) -> AdapterResult<Vec<O::Output>>
    where
        I: Schema,
        I::Output: Serialize,
        O: Schema,
    {
        pipeline::filter_with(&self.runtime, options, &self.config).await
    }

    /// Run a typed query with input and output validation.
    pub async fn query<Q, I, O>(
        &self,
        options: QueryOptions<Q, I, O>,
    ) -> AdapterResult<Vec<O::Output>>
    where
        R: TypedRuntime<Q>,
        Q: Send + Sync,
        I: Schema,
        I::Output: Serialize,
        O: Schema,
    {
        pipeline::query_with(&self.runtime, options, &self.config).await
    }

    /// Run a filter without schemas; see [`pipeline::run_inferred`].
    pub async fn inferred<T: Serialize>(
        &self,
        options: InferredOptions<T>,
    ) -> Result<Vec<Value>, String> {
        pipeline::inferred_with(&self.runtime, options, &self.config).await
    }

    /// Statically expected shape of each output of `options`, using the
    /// configured fallback unless the options pick one.
    pub fn infer_shape<T: DescribeShape>(&self, options: &InferredOptions<T>) -> Shape {
        options.output_shape_with(&self.config)
    }
}
