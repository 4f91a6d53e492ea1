//! Decodes an extracted JSON object into a typed payload.
//!
//! Decoding is two-step: serde handles shape (presence and types of fields)
//! through a permissive wire type, then `Schema::from_wire` enforces value
//! invariants such as ranges and non-empty sections.

use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("reply does not match the expected shape: {0}")]
    Shape(#[source] serde_json::Error),

    #[error("`{field}` must be an integer, got {value}")]
    NotInteger { field: String, value: String },

    #[error("`{field}` is out of range: {value}")]
    OutOfRange { field: String, value: String },

    #[error("`{field}` must not be empty")]
    Empty { field: String },
}

/// A payload recoverable from a model reply.
pub trait Schema: Sized {
    /// What serde decodes the raw object into before validation.
    type Wire: DeserializeOwned;

    fn from_wire(wire: Self::Wire) -> Result<Self, SchemaError>;
}

pub fn decode<T: Schema>(map: Map<String, Value>) -> Result<T, SchemaError> {
    let wire: T::Wire = serde_json::from_value(Value::Object(map)).map_err(SchemaError::Shape)?;
    T::from_wire(wire)
}

/// Reads a JSON number as an integer in `min..=max`. Integral floats such as
/// `78.0` are accepted; fractional values are not.
pub fn bounded_integer(field: &str, number: &Number, min: i64, max: i64) -> Result<i64, SchemaError> {
    let out_of_range = || SchemaError::OutOfRange {
        field: field.to_string(),
        value: number.to_string(),
    };

    let value = if let Some(v) = number.as_i64() {
        v
    } else if number.is_u64() {
        return Err(out_of_range());
    } else {
        match number.as_f64() {
            Some(f) if f.fract() == 0.0 => {
                if f < min as f64 || f > max as f64 {
                    return Err(out_of_range());
                }
                f as i64
            }
            _ => {
                return Err(SchemaError::NotInteger {
                    field: field.to_string(),
                    value: number.to_string(),
                })
            }
        }
    };

    if !(min..=max).contains(&value) {
        return Err(out_of_range());
    }
    Ok(value)
}

pub fn require_non_empty<T>(field: &str, items: &[T]) -> Result<(), SchemaError> {
    if items.is_empty() {
        return Err(SchemaError::Empty {
            field: field.to_string(),
        });
    }
    Ok(())
}
