//! Tuples, schemas, and the handful of value types the executors need.

use std::cmp::Ordering;
use std::fmt;

/// The type tag of a [`Column`]. Kept separate from [`Value`] so a
/// [`Schema`] can describe a table's shape without holding live data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Integer,
    Float,
    Varchar,
    Boolean,
    /// Fixed-dimension vector column.
    Vector(usize),
}

/// A named, typed column in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub data_type: DataType,
}

impl Column {
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// An ordered list of columns describing a tuple's shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    #[must_use]
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// A runtime value. `Vector` carries the same `Vec<f64>` representation the
/// index crate's distance kernels operate on, so no conversion happens at
/// the scan/index boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Varchar(String),
    Boolean(bool),
    Vector(Vec<f64>),
    Null,
}

impl Value {
    /// Extracts the float payload, treating an `Integer` as its float
    /// equivalent. Used by comparisons in `ORDER BY` and `LIMIT`
    /// evaluation, where a vector-distance expression always yields a
    /// `Float`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Extracts the vector payload, if this value holds one.
    #[must_use]
    pub fn as_vector(&self) -> Option<&[f64]> {
        match self {
            Self::Vector(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Varchar(s) => write!(f, "{s}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Vector(v) => write!(f, "{v:?}"),
            Self::Null => write!(f, "NULL"),
        }
    }
}

/// Compares two values for ordering. `Null` sorts as neither less nor
/// greater than anything, matching SQL's three-valued comparison logic;
/// mismatched variants likewise compare as unordered.
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Integer(x), Value::Integer(y)) => x.partial_cmp(y),
        (Value::Float(x), Value::Float(y)) => x.partial_cmp(y),
        (Value::Integer(x), Value::Float(y)) => (*x as f64).partial_cmp(y),
        (Value::Float(x), Value::Integer(y)) => x.partial_cmp(&(*y as f64)),
        (Value::Varchar(x), Value::Varchar(y)) => x.partial_cmp(y),
        (Value::Boolean(x), Value::Boolean(y)) => x.partial_cmp(y),
        _ => None,
    }
}

/// A row of values, positionally aligned with some [`Schema`].
#[derive(Debug, Clone, PartialEq)]
pub struct Tuple {
    values: Vec<Value>,
}

impl Tuple {
    #[must_use]
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Returns the value at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds for this tuple.
    #[must_use]
    pub fn get_value(&self, index: usize) -> &Value {
        &self.values[index]
    }
}
