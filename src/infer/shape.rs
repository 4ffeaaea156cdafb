//! Static shape descriptions of Rust types
//!
//! A [`Shape`] is what the inference engine knows about a value before the
//! filter runs: which fields a struct declares, what a sequence holds, and
//! where nothing is known at all.

use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Null,
    Bool,
    Number,
    String,
    /// Homogeneous sequence
    Array(Box<Shape>),
    /// String-keyed map where every key holds the same shape
    Map(Box<Shape>),
    /// Structured value with a fixed set of named fields
    Object(BTreeMap<String, Shape>),
    /// Value that may also be null
    Optional(Box<Shape>),
    /// Opaque value that cannot be narrowed
    Unknown,
    /// Any JSON value
    Json,
}

impl Shape {
    pub fn array(item: Shape) -> Self {
        Shape::Array(Box::new(item))
    }

    pub fn map(value: Shape) -> Self {
        Shape::Map(Box::new(value))
    }

    pub fn optional(inner: Shape) -> Self {
        Shape::Optional(Box::new(inner))
    }

    pub fn object<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Shape)>,
    {
        Shape::Object(
            fields
                .into_iter()
                .map(|(name, shape)| (name.into(), shape))
                .collect(),
        )
    }

    /// Declared type of `name`, if this shape is statically known to have it.
    pub fn field(&self, name: &str) -> Option<&Shape> {
        match self {
            Shape::Object(fields) => fields.get(name),
            Shape::Map(value) => Some(value),
            _ => None,
        }
    }

    /// Element type, if this shape is statically known to be a sequence.
    pub fn element(&self) -> Option<&Shape> {
        match self {
            Shape::Array(item) => Some(item),
            _ => None,
        }
    }
}

/// Types with a statically known [`Shape`].
///
/// Implemented for the std types that map onto JSON and derivable for
/// structs with `#[derive(DescribeShape)]`.
pub trait DescribeShape {
    fn shape() -> Shape;
}

macro_rules! impl_scalar_shape {
    ($shape:ident => $($ty:ty),+ $(,)?) => {
        $(
            impl DescribeShape for $ty {
                fn shape() -> Shape {
                    Shape::$shape
                }
            }
        )+
    };
}

impl_scalar_shape!(Number => u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);
impl_scalar_shape!(String => String, str, char);
impl_scalar_shape!(Bool => bool);
impl_scalar_shape!(Null => ());
impl_scalar_shape!(Json => Value);

impl<T: DescribeShape> DescribeShape for Option<T> {
    fn shape() -> Shape {
        Shape::optional(T::shape())
    }
}

impl<T: DescribeShape> DescribeShape for Vec<T> {
    fn shape() -> Shape {
        Shape::array(T::shape())
    }
}

impl<T: DescribeShape> DescribeShape for [T] {
    fn shape() -> Shape {
        Shape::array(T::shape())
    }
}

impl<T: DescribeShape, const N: usize> DescribeShape for [T; N] {
    fn shape() -> Shape {
        Shape::array(T::shape())
    }
}

impl<V: DescribeShape, S> DescribeShape for HashMap<String, V, S> {
    fn shape() -> Shape {
        Shape::map(V::shape())
    }
}

impl<V: DescribeShape> DescribeShape for BTreeMap<String, V> {
    fn shape() -> Shape {
        Shape::map(V::shape())
    }
}

impl DescribeShape for serde_json::Map<String, Value> {
    fn shape() -> Shape {
        Shape::map(Shape::Json)
    }
}

macro_rules! impl_pointer_shape {
    ($($ptr:ident),+) => {
        $(
            impl<T: DescribeShape + ?Sized> DescribeShape for $ptr<T> {
                fn shape() -> Shape {
                    T::shape()
                }
            }
        )+
    };
}

impl_pointer_shape!(Box, Arc, Rc);

impl<T: DescribeShape + ?Sized> DescribeShape for &T {
    fn shape() -> Shape {
        T::shape()
    }
}
