//! Scalar expressions evaluated against a tuple: column references and
//! vector-distance projections, the two shapes `ORDER BY` and filter
//! predicates need here.

use talondb_core::{compute_distance, DistanceTag};

use crate::tuple::{Tuple, Value};

/// An expression evaluable against a single tuple.
#[derive(Debug, Clone)]
pub enum Expression {
    /// A reference to a column by its position in the tuple's schema.
    ColumnRef(usize),
    /// A constant value, independent of the tuple.
    Literal(Value),
    /// The distance from a vector column to a fixed query vector, under a
    /// chosen distance kernel. Always evaluates to `Value::Float`.
    VectorDistance {
        column: usize,
        target: Vec<f64>,
        distance_tag: DistanceTag,
    },
}

impl Expression {
    /// Evaluates this expression against `tuple`.
    ///
    /// A `VectorDistance` evaluated against a non-vector column is a
    /// programming error (the planner is responsible for only building
    /// this expression over vector columns); it is caught with a
    /// `debug_assert!` and evaluates to `Value::Null` in release builds
    /// rather than panicking.
    #[must_use]
    pub fn evaluate(&self, tuple: &Tuple) -> Value {
        match self {
            Self::ColumnRef(index) => tuple.get_value(*index).clone(),
            Self::Literal(value) => value.clone(),
            Self::VectorDistance {
                column,
                target,
                distance_tag,
            } => match tuple.get_value(*column) {
                Value::Vector(vector) => Value::Float(compute_distance(vector, target, *distance_tag)),
                _ => {
                    debug_assert!(false, "vector-distance expression evaluated against a non-vector column");
                    Value::Null
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_ref_returns_the_named_value() {
        let tuple = Tuple::new(vec![Value::Integer(7), Value::Varchar("hi".into())]);
        assert_eq!(Expression::ColumnRef(1).evaluate(&tuple), Value::Varchar("hi".into()));
    }

    #[test]
    fn vector_distance_computes_l2() {
        let tuple = Tuple::new(vec![Value::Vector(vec![3.0, 4.0])]);
        let expr = Expression::VectorDistance {
            column: 0,
            target: vec![0.0, 0.0],
            distance_tag: DistanceTag::L2,
        };
        assert_eq!(expr.evaluate(&tuple), Value::Float(25.0));
    }

    #[test]
    fn literal_ignores_the_tuple() {
        let tuple = Tuple::new(vec![Value::Null]);
        assert_eq!(Expression::Literal(Value::Integer(5)).evaluate(&tuple), Value::Integer(5));
    }
}
