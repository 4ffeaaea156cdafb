//! Filter-path parsing and output inference
//!
//! Only plain paths are understood: `.`, `.foo`, `.foo.bar`, `.foo[]`,
//! `.foo[0]` and their chains. Anything else (pipes, operators, quoting,
//! whitespace inside the filter, ...) makes the whole filter opaque and the
//! inferred output falls back to [`Fallback`].

use super::shape::{DescribeShape, Shape};
use serde::{Deserialize, Serialize};

/// Shape used when a filter cannot be narrowed statically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fallback {
    #[default]
    Unknown,
    Json,
}

impl Fallback {
    pub fn shape(self) -> Shape {
        match self {
            Fallback::Unknown => Shape::Unknown,
            Fallback::Json => Shape::Json,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Field(String),
    /// `[]` or `[n]`; the index digits are kept verbatim and never bounds-checked
    Element(Option<String>),
}

/// Parse `filter` into path segments.
///
/// Returns `None` when the filter uses anything beyond the supported path
/// subset. The identity filter `.` parses to an empty path.
pub fn parse_path(filter: &str) -> Option<Vec<Segment>> {
    let rest = filter.trim().strip_prefix('.')?;
    let bytes = rest.as_bytes();
    let mut segments = Vec::new();
    let mut pos = 0;

    // Right after the leading dot a field or a bracket may follow directly.
    let mut expect_field = true;
    while pos < bytes.len() {
        match bytes[pos] {
            b'[' => {
                let close = pos + rest[pos..].find(']')?;
                let inner = &rest[pos + 1..close];
                let index = if inner.is_empty() {
                    None
                } else if inner.bytes().all(|b| b.is_ascii_digit()) {
                    Some(inner.to_string())
                } else {
                    return None;
                };
                segments.push(Segment::Element(index));
                pos = close + 1;
                expect_field = false;
            }
            b'.' if !expect_field => {
                pos += 1;
                expect_field = true;
                // `.foo.` is not a path
                if pos == bytes.len() {
                    return None;
                }
            }
            b if is_ident_start(b) && expect_field => {
                let start = pos;
                pos += 1;
                while pos < bytes.len() && is_ident_continue(bytes[pos]) {
                    pos += 1;
                }
                segments.push(Segment::Field(rest[start..pos].to_string()));
                expect_field = false;
            }
            _ => return None,
        }
    }

    Some(segments)
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Shape of one output element of `filter` applied to a value of `input`.
pub fn infer_shape(input: &Shape, filter: &str, fallback: Fallback) -> Shape {
    let Some(segments) = parse_path(filter) else {
        return fallback.shape();
    };

    let mut current = input;
    for segment in &segments {
        let next = match segment {
            Segment::Field(name) => current.field(name),
            Segment::Element(_) => current.element(),
        };
        match next {
            Some(shape) => current = shape,
            None => return fallback.shape(),
        }
    }
    current.clone()
}

/// [`infer_shape`] for a Rust input type.
pub fn infer_output<T: DescribeShape + ?Sized>(filter: &str, fallback: Fallback) -> Shape {
    infer_shape(&T::shape(), filter, fallback)
}
