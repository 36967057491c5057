//! Dynamic cell values and column kinds
//!
//! `SeriesValue` is the tagged representation used by dynamically-typed
//! columns, where each cell carries its own kind.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::DType;

/// A single dynamically-typed cell
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub enum SeriesValue {
    /// Missing value
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl SeriesValue {
    /// Kind of this cell
    pub fn dtype(&self) -> DType {
        match self {
            SeriesValue::Null => DType::Null,
            SeriesValue::Bool(_) => DType::Bool,
            SeriesValue::Int(_) => DType::Int64,
            SeriesValue::Float(_) => DType::Float64,
            SeriesValue::String(_) => DType::String,
        }
    }

    /// True for `Null` and for a NaN float
    pub fn is_nan(&self) -> bool {
        match self {
            SeriesValue::Null => true,
            SeriesValue::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SeriesValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SeriesValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            SeriesValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            SeriesValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SeriesValue::String(v) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Hashable identity of this value, used for dedup and replace maps.
    pub fn key(&self) -> ValueKey {
        match self {
            SeriesValue::Null => ValueKey::Null,
            SeriesValue::Bool(v) => ValueKey::Bool(*v),
            SeriesValue::Int(v) => ValueKey::Int(*v),
            SeriesValue::Float(v) => ValueKey::Float(float_bits(*v)),
            SeriesValue::String(v) => ValueKey::String(v.clone()),
        }
    }
}

/// Equality follows the cell kind: `Int(1)` and `Float(1.0)` differ, and a
/// NaN float never equals anything (including itself).
impl PartialEq for SeriesValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (SeriesValue::Null, SeriesValue::Null) => true,
            (SeriesValue::Bool(a), SeriesValue::Bool(b)) => a == b,
            (SeriesValue::Int(a), SeriesValue::Int(b)) => a == b,
            (SeriesValue::Float(a), SeriesValue::Float(b)) => a == b,
            (SeriesValue::String(a), SeriesValue::String(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for SeriesValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesValue::Null => write!(f, "null"),
            SeriesValue::Bool(v) => write!(f, "{}", v),
            SeriesValue::Int(v) => write!(f, "{}", v),
            SeriesValue::Float(v) => write!(f, "{}", v),
            SeriesValue::String(v) => write!(f, "{}", v),
        }
    }
}

impl From<bool> for SeriesValue {
    fn from(v: bool) -> Self {
        SeriesValue::Bool(v)
    }
}

impl From<i64> for SeriesValue {
    fn from(v: i64) -> Self {
        SeriesValue::Int(v)
    }
}

impl From<i32> for SeriesValue {
    fn from(v: i32) -> Self {
        SeriesValue::Int(v as i64)
    }
}

impl From<f64> for SeriesValue {
    fn from(v: f64) -> Self {
        SeriesValue::Float(v)
    }
}

impl From<&str> for SeriesValue {
    fn from(v: &str) -> Self {
        SeriesValue::String(v.to_string())
    }
}

impl From<String> for SeriesValue {
    fn from(v: String) -> Self {
        SeriesValue::String(v)
    }
}

impl<T: Into<SeriesValue>> From<Option<T>> for SeriesValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(SeriesValue::Null, Into::into)
    }
}

/// Hashable value identity.
///
/// Floats are keyed by their bit pattern with `-0.0` folded into `0.0` and
/// every NaN folded into one canonical NaN.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKey {
    Null,
    Bool(bool),
    Int(i64),
    Float(u64),
    String(String),
}

fn float_bits(v: f64) -> u64 {
    if v.is_nan() {
        f64::NAN.to_bits()
    } else if v == 0.0 {
        0.0f64.to_bits()
    } else {
        v.to_bits()
    }
}
