//! Column kinds and length checks shared by series and frames

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared kind of a column's elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DType {
    Bool,
    /// Platform-sized integer
    Int,
    Int32,
    Int64,
    Float32,
    Float64,
    String,
    /// Only missing markers
    Null,
    /// Elements carry their own kind
    Dynamic,
}

impl DType {
    /// Check if type is numeric
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            DType::Int | DType::Int32 | DType::Int64 | DType::Float32 | DType::Float64
        )
    }

    /// Check if type is string
    pub fn is_string(&self) -> bool {
        matches!(self, DType::String)
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, DType::Dynamic)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DType::Bool => "bool",
            DType::Int => "int",
            DType::Int32 => "int32",
            DType::Int64 => "int64",
            DType::Float32 => "float32",
            DType::Float64 => "float64",
            DType::String => "string",
            DType::Null => "null",
            DType::Dynamic => "dynamic",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check if all columns have the same length.
///
/// Returns the common length, or `None` when there are no columns.
pub(crate) fn check_equal_lengths<I>(lengths: I) -> super::Result<Option<usize>>
where
    I: IntoIterator<Item = usize>,
{
    let mut expected = None;
    for len in lengths {
        match expected {
            None => expected = Some(len),
            Some(n) if n != len => {
                return Err(super::DataError::DimensionMismatch {
                    expected: format!("{} rows", n),
                    actual: format!("{} rows", len),
                });
            }
            _ => {}
        }
    }
    Ok(expected)
}
