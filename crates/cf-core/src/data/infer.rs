//! Type inference for raw text columns
//!
//! A column of text tokens is classified once into a single kind and every
//! token is converted to it. A token that is neither empty, boolean, nor
//! numeric makes the whole column dynamic, in which case each cell is
//! classified on its own.

use serde::{Deserialize, Serialize};

use super::*;

/// How text columns are typed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InferStrategy {
    /// Classify the whole column, then convert every token to that kind
    #[default]
    Column,
    /// Skip classification; every cell is typed independently
    PerCell,
}

/// Type inference configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferConfig {
    pub strategy: InferStrategy,
}

impl InferConfig {
    /// Classify and convert one column of tokens.
    pub fn infer<S: AsRef<str>>(&self, tokens: &[S]) -> Result<(DType, Vec<SeriesValue>)> {
        let dtype = match self.strategy {
            InferStrategy::Column => determine_type(tokens),
            InferStrategy::PerCell => DType::Dynamic,
        };
        Ok((dtype, as_type(tokens, dtype)?))
    }
}

fn is_bool_literal(token: &str) -> bool {
    matches!(token, "true" | "True" | "false" | "False")
}

/// Decide the kind of a text column.
///
/// Empty tokens never disqualify a kind. The result is, in priority order:
/// `Dynamic` if any token is foreign, `Float64` if any token is a float (or
/// `"NaN"`) and none is boolean, `Int64` if tokens are integers only, `Bool`
/// if tokens are boolean only, otherwise `Dynamic`.
pub fn determine_type<S: AsRef<str>>(tokens: &[S]) -> DType {
    let (mut has_bool, mut has_int, mut has_float) = (false, false, false);

    for token in tokens {
        let token = token.as_ref();
        if token.is_empty() {
            continue;
        }
        if is_bool_literal(token) {
            has_bool = true;
        } else if token.parse::<i64>().is_ok() {
            has_int = true;
        } else if token == "NaN" || token.parse::<f64>().is_ok() {
            has_float = true;
        } else {
            // one foreign token poisons the column
            return DType::Dynamic;
        }
    }

    if has_float && !has_bool {
        DType::Float64
    } else if has_int && !has_bool {
        DType::Int64
    } else if has_bool && !has_int && !has_float {
        DType::Bool
    } else {
        DType::Dynamic
    }
}

/// Convert every token to `dtype`.
///
/// Only `Float64`, `Int64`, `Bool` and `Dynamic` are valid targets; a token
/// that does not fit a committed kind is an error.
pub fn as_type<S: AsRef<str>>(tokens: &[S], dtype: DType) -> Result<Vec<SeriesValue>> {
    let convert: fn(&str) -> Result<SeriesValue> = match dtype {
        DType::Float64 => as_float64,
        DType::Int64 => as_int64,
        DType::Bool => as_bool,
        DType::Dynamic => |token| Ok(as_dynamic(token)),
        other => {
            return Err(DataError::Conversion {
                value: other.to_string(),
                target: "inferred column kind",
            });
        }
    };
    tokens.iter().map(|t| convert(t.as_ref())).collect()
}

fn as_float64(token: &str) -> Result<SeriesValue> {
    let v = match token {
        "" | "NaN" | "None" | "null" => f64::NAN,
        "Inf" | "inf" => f64::INFINITY,
        "-Inf" | "-inf" => f64::NEG_INFINITY,
        _ => token.parse::<f64>().map_err(|_| DataError::Parse {
            value: token.to_string(),
            target: "float64",
        })?,
    };
    Ok(SeriesValue::Float(v))
}

fn as_int64(token: &str) -> Result<SeriesValue> {
    if token.is_empty() {
        return Ok(SeriesValue::Null);
    }
    token
        .parse::<i64>()
        .map(SeriesValue::Int)
        .map_err(|_| DataError::Parse {
            value: token.to_string(),
            target: "int64",
        })
}

fn as_bool(token: &str) -> Result<SeriesValue> {
    match token {
        "true" | "True" => Ok(SeriesValue::Bool(true)),
        "false" | "False" => Ok(SeriesValue::Bool(false)),
        "" => Ok(SeriesValue::Null),
        _ => Err(DataError::Parse {
            value: token.to_string(),
            target: "bool",
        }),
    }
}

fn as_dynamic(token: &str) -> SeriesValue {
    match token {
        "" | "NaN" => SeriesValue::Float(f64::NAN),
        "true" | "True" => SeriesValue::Bool(true),
        "false" | "False" => SeriesValue::Bool(false),
        _ => {
            if let Ok(v) = token.parse::<i64>() {
                SeriesValue::Int(v)
            } else if let Ok(v) = token.parse::<f64>() {
                SeriesValue::Float(v)
            } else {
                SeriesValue::String(token.to_string())
            }
        }
    }
}
