//! Validated round-trip through a filter runtime
//!
//! validate input -> serialize -> run -> parse each result -> validate each
//! result. The first failure ends the run; results are never returned
//! partially.

use crate::config::AdapterConfig;
use crate::core::{AdapterError, AdapterResult, Issue, RuntimeError};
use crate::infer::{DescribeShape, Fallback, Shape, infer_output};
use crate::runtime::{DynamicRuntime, TypedRuntime};
use crate::schema::Schema;
use serde::Serialize;
use serde_json::Value;
use tracing::{Instrument, Level, event, info_span};

#[derive(Debug, Clone)]
pub struct FilterOptions<I, O> {
    pub filter: String,
    pub input: Value,
    pub input_schema: I,
    pub output_schema: O,
}

impl<I, O> FilterOptions<I, O> {
    pub fn new(filter: impl Into<String>, input: Value, input_schema: I, output_schema: O) -> Self {
        Self {
            filter: filter.into(),
            input,
            input_schema,
            output_schema,
        }
    }
}

#[derive(Debug, Clone)]
pub struct QueryOptions<Q, I, O> {
    pub query: Q,
    pub input: Value,
    pub input_schema: I,
    pub output_schema: O,
}

impl<Q, I, O> QueryOptions<Q, I, O> {
    pub fn new(query: Q, input: Value, input_schema: I, output_schema: O) -> Self {
        Self {
            query,
            input,
            input_schema,
            output_schema,
        }
    }
}

/// Options for an unvalidated run whose output type is only inferred.
#[derive(Debug, Clone)]
pub struct InferredOptions<T> {
    pub filter: String,
    pub input: T,
    /// `None` defers to the adapter's configured default
    pub fallback: Option<Fallback>,
}

impl<T> InferredOptions<T> {
    pub fn new(filter: impl Into<String>, input: T) -> Self {
        Self {
            filter: filter.into(),
            input,
            fallback: None,
        }
    }

    pub fn fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = Some(fallback);
        self
    }
}

impl<T: DescribeShape> InferredOptions<T> {
    /// Statically expected shape of each output element under the default
    /// configuration, matching [`run_inferred`].
    pub fn output_shape(&self) -> Shape {
        self.output_shape_with(&AdapterConfig::default())
    }

    /// Statically expected shape of each output element; an unset fallback
    /// defers to `config.default_fallback`.
    pub fn output_shape_with(&self, config: &AdapterConfig) -> Shape {
        let fallback = self.fallback.unwrap_or(config.default_fallback);
        infer_output::<T>(&self.filter, fallback)
    }
}

/// Run `filter` with schema validation on both sides.
pub async fn run_filter<R, I, O>(
    runtime: &R,
    options: FilterOptions<I, O>,
) -> AdapterResult<Vec<O::Output>>
where
    R: DynamicRuntime + ?Sized,
    I: Schema,
    I::Output: Serialize,
    O: Schema,
{
    filter_with(runtime, options, &AdapterConfig::default()).await
}

/// Run a typed query with schema validation on both sides.
pub async fn run_query<R, Q, I, O>(
    runtime: &R,
    options: QueryOptions<Q, I, O>,
) -> AdapterResult<Vec<O::Output>>
where
    R: TypedRuntime<Q> + ?Sized,
    Q: Send + Sync,
    I: Schema,
    I::Output: Serialize,
    O: Schema,
{
    query_with(runtime, options, &AdapterConfig::default()).await
}

/// Run `filter` without schemas; outputs are only parsed as JSON.
///
/// Errors are plain strings. Parse failures read
/// `output_parse at index {index}: {reason}`.
pub async fn run_inferred<R, T>(runtime: &R, options: InferredOptions<T>) -> Result<Vec<Value>, String>
where
    R: DynamicRuntime + ?Sized,
    T: Serialize,
{
    inferred_with(runtime, options, &AdapterConfig::default()).await
}

pub(crate) async fn filter_with<R, I, O>(
    runtime: &R,
    options: FilterOptions<I, O>,
    config: &AdapterConfig,
) -> AdapterResult<Vec<O::Output>>
where
    R: DynamicRuntime + ?Sized,
    I: Schema,
    I::Output: Serialize,
    O: Schema,
{
    let FilterOptions {
        filter,
        input,
        input_schema,
        output_schema,
    } = options;
    let span = info_span!("jqx.filter", filter = %filter);

    async move {
        let raw_input = validate_input(&input_schema, input, config).await?;
        let outcome = runtime.run(&filter, &raw_input).await;
        let raw_results = runtime_results(outcome, config)?;
        parse_and_validate_outputs(&output_schema, raw_results).await
    }
    .instrument(span)
    .await
}

pub(crate) async fn query_with<R, Q, I, O>(
    runtime: &R,
    options: QueryOptions<Q, I, O>,
    config: &AdapterConfig,
) -> AdapterResult<Vec<O::Output>>
where
    R: TypedRuntime<Q> + ?Sized,
    Q: Send + Sync,
    I: Schema,
    I::Output: Serialize,
    O: Schema,
{
    let QueryOptions {
        query,
        input,
        input_schema,
        output_schema,
    } = options;
    let span = info_span!("jqx.query");

    async move {
        let raw_input = validate_input(&input_schema, input, config).await?;
        let outcome = runtime.run_query(&query, &raw_input).await;
        let raw_results = runtime_results(outcome, config)?;
        parse_and_validate_outputs(&output_schema, raw_results).await
    }
    .instrument(span)
    .await
}

pub(crate) async fn inferred_with<R, T>(
    runtime: &R,
    options: InferredOptions<T>,
    config: &AdapterConfig,
) -> Result<Vec<Value>, String>
where
    R: DynamicRuntime + ?Sized,
    T: Serialize,
{
    let InferredOptions { filter, input, .. } = options;
    let span = info_span!("jqx.inferred", filter = %filter);
    let raw_input =
        serde_json::to_string(&input).map_err(|err| format!("input_serialization: {err}"))?;

    async move {
        if config.log_payloads {
            event!(Level::TRACE, input = %raw_input, "runtime input");
        }
        let raw_results = runtime
            .run(&filter, &raw_input)
            .await
            .map_err(|err| {
                event!(Level::DEBUG, error = %err, "runtime failed");
                err.message().to_string()
            })?;
        parse_runtime_outputs(&raw_results)
    }
    .instrument(span)
    .await
}

/// Validate `input` and serialize the decoded value, so schema defaults
/// and transformations reach the runtime.
async fn validate_input<S>(schema: &S, input: Value, config: &AdapterConfig) -> AdapterResult<String>
where
    S: Schema,
    S::Output: Serialize,
{
    let decoded = schema.validate(input).await.map_err(|issues| {
        event!(Level::DEBUG, issues = issues.len(), "input rejected by schema");
        AdapterError::input_validation(issues)
    })?;

    let raw_input = serde_json::to_string(&decoded).map_err(|err| {
        AdapterError::input_validation(vec![Issue::root(format!(
            "validated input is not representable as JSON: {err}"
        ))])
    })?;

    if config.log_payloads {
        event!(Level::TRACE, input = %raw_input, "runtime input");
    }
    Ok(raw_input)
}

fn runtime_results(
    outcome: Result<Vec<String>, RuntimeError>,
    config: &AdapterConfig,
) -> AdapterResult<Vec<String>> {
    match outcome {
        Ok(raw_results) => {
            event!(Level::DEBUG, results = raw_results.len(), "runtime returned");
            if config.log_payloads {
                event!(Level::TRACE, outputs = ?raw_results, "runtime outputs");
            }
            Ok(raw_results)
        }
        Err(err) => {
            event!(Level::DEBUG, error = %err, "runtime failed");
            Err(AdapterError::runtime(err))
        }
    }
}

async fn parse_and_validate_outputs<S: Schema>(
    schema: &S,
    raw_values: Vec<String>,
) -> AdapterResult<Vec<S::Output>> {
    let mut validated = Vec::with_capacity(raw_values.len());
    for (index, raw) in raw_values.into_iter().enumerate() {
        let parsed: Value = match serde_json::from_str(&raw) {
            Ok(parsed) => parsed,
            Err(err) => {
                event!(Level::DEBUG, index, "output is not valid JSON");
                return Err(AdapterError::OutputParse {
                    index,
                    raw,
                    message: err.to_string(),
                });
            }
        };

        let decoded = schema.validate(parsed).await.map_err(|issues| {
            event!(Level::DEBUG, index, issues = issues.len(), "output rejected by schema");
            AdapterError::output_validation(index, issues)
        })?;
        validated.push(decoded);
    }

    event!(Level::DEBUG, outputs = validated.len(), "outputs validated");
    Ok(validated)
}

fn parse_runtime_outputs(raw_values: &[String]) -> Result<Vec<Value>, String> {
    raw_values
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            serde_json::from_str(raw).map_err(|err| format!("output_parse at index {index}: {err}"))
        })
        .collect()
}
