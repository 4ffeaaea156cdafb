use crate::core::RuntimeError;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

pub type RuntimeOutput = Result<Vec<String>, RuntimeError>;

/// A filter runtime addressed by filter source text.
///
/// `input` is a JSON document; each returned string is one JSON-encoded
/// result of the filter, in emission order.
#[async_trait]
pub trait DynamicRuntime: Send + Sync {
    async fn run(&self, filter: &str, input: &str) -> RuntimeOutput;
}

/// A filter runtime addressed by an application-defined query value
/// (a precompiled filter, a registry key, ...).
#[async_trait]
pub trait TypedRuntime<Q: Send + Sync>: Send + Sync {
    async fn run_query(&self, query: &Q, input: &str) -> RuntimeOutput;
}

#[async_trait]
impl<T: DynamicRuntime + ?Sized> DynamicRuntime for &T {
    async fn run(&self, filter: &str, input: &str) -> RuntimeOutput {
        (**self).run(filter, input).await
    }
}

#[async_trait]
impl<T: DynamicRuntime + ?Sized> DynamicRuntime for Box<T> {
    async fn run(&self, filter: &str, input: &str) -> RuntimeOutput {
        (**self).run(filter, input).await
    }
}

#[async_trait]
impl<T: DynamicRuntime + ?Sized> DynamicRuntime for Arc<T> {
    async fn run(&self, filter: &str, input: &str) -> RuntimeOutput {
        (**self).run(filter, input).await
    }
}

#[async_trait]
impl<Q: Send + Sync, T: TypedRuntime<Q> + ?Sized> TypedRuntime<Q> for &T {
    async fn run_query(&self, query: &Q, input: &str) -> RuntimeOutput {
        (**self).run_query(query, input).await
    }
}

#[async_trait]
impl<Q: Send + Sync, T: TypedRuntime<Q> + ?Sized> TypedRuntime<Q> for Box<T> {
    async fn run_query(&self, query: &Q, input: &str) -> RuntimeOutput {
        (**self).run_query(query, input).await
    }
}

#[async_trait]
impl<Q: Send + Sync, T: TypedRuntime<Q> + ?Sized> TypedRuntime<Q> for Arc<T> {
    async fn run_query(&self, query: &Q, input: &str) -> RuntimeOutput {
        (**self).run_query(query, input).await
    }
}

/// `DynamicRuntime` backed by an async closure.
///
/// # Example
/// ```ignore
/// let runtime = runtime_fn(|_filter, input| async move { Ok(vec![input]) });
/// ```
#[derive(Clone)]
pub struct RuntimeFn<F> {
    handler: F,
}

pub fn runtime_fn<F, Fut>(handler: F) -> RuntimeFn<F>
where
    F: Fn(String, String) -> Fut + Send + Sync,
    Fut: Future<Output = RuntimeOutput> + Send + 'static,
{
    RuntimeFn { handler }
}

#[async_trait]
impl<F, Fut> DynamicRuntime for RuntimeFn<F>
where
    F: Fn(String, String) -> Fut + Send + Sync,
    Fut: Future<Output = RuntimeOutput> + Send + 'static,
{
    async fn run(&self, filter: &str, input: &str) -> RuntimeOutput {
        (self.handler)(filter.to_string(), input.to_string()).await
    }
}
