//! Recommended imports grouped by use.
//!
//! `run` covers executing filters with validation; `inference` covers
//! static output shapes.

pub mod run {
    //! Executing filters and queries through a runtime.
    pub use crate::schema::{Any, Schema, Typed, typed};
    pub use crate::{
        Adapter, AdapterConfig, AdapterError, AdapterResult, DynamicRuntime, FilterOptions,
        InferredOptions, Issue, QueryOptions, RuntimeError, TypedRuntime, runtime_fn,
    };

    #[cfg(feature = "json-schema")]
    pub use crate::schema::JsonSchema;

    #[cfg(feature = "schemars")]
    pub use crate::schema::SchemaFor;
}

pub mod inference {
    //! Static output shapes of filter paths.
    pub use crate::{DescribeShape, Fallback, Shape, infer_output, infer_shape};
}
