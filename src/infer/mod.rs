//! Filter-path output inference
//!
//! - `shape.rs` - static shape descriptions of Rust types
//! - `path.rs` - path-subset parser and narrowing rules
//!
//! Inference is advisory: it never takes part in a pipeline run, and a
//! filter the parser does not understand only loses precision.

mod path;
mod shape;

pub use path::{Fallback, Segment, infer_output, infer_shape, parse_path};
pub use shape::{DescribeShape, Shape};
