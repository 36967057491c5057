//! Element types a Series can hold
//!
//! Every column element type implements [`Element`], which reports the
//! element's own kind, exposes it as a dynamic [`SeriesValue`] and converts it
//! into the projection targets (`isize`, `i64`, `f64`, `String`).

use super::*;

/// A value that can live inside a [`Series`]
pub trait Element: Clone + PartialEq + Send + Sync + 'static {
    /// Kind of this particular element. Missing markers report `DType::Null`.
    fn dtype(&self) -> DType;

    /// Dynamic view of this element
    fn to_value(&self) -> SeriesValue;

    /// True for missing markers and floating-point NaN
    fn is_nan(&self) -> bool {
        false
    }

    /// Text rendering used by `str()` and previews
    fn to_text(&self) -> String {
        self.to_value().to_string()
    }

    /// Convert for the `Int64` projection
    fn to_i64(&self) -> Result<i64> {
        value_to_i64(&self.to_value())
    }

    /// Convert for the `Float64` projection
    fn to_f64(&self) -> Result<f64> {
        value_to_f64(&self.to_value())
    }

    /// Convert for the `Int` projection
    fn to_isize(&self) -> Result<isize> {
        let v = self.to_i64()?;
        isize::try_from(v).map_err(|_| DataError::Conversion {
            value: v.to_string(),
            target: "int",
        })
    }
}

/// Integer projection of a dynamic value.
///
/// Floats truncate toward zero, text is parsed as a base-10 integer, booleans
/// and missing markers are not convertible.
pub(crate) fn value_to_i64(value: &SeriesValue) -> Result<i64> {
    match value {
        SeriesValue::Int(v) => Ok(*v),
        SeriesValue::Float(v) => float_to_i64(*v),
        SeriesValue::String(s) => s.parse::<i64>().map_err(|_| DataError::Parse {
            value: s.clone(),
            target: "int64",
        }),
        SeriesValue::Bool(_) | SeriesValue::Null => Err(DataError::Conversion {
            value: value.to_string(),
            target: "int64",
        }),
    }
}

/// Truncating float to integer conversion.
///
/// NaN, infinities and values outside the `i64` range have no integer value
/// and are rejected instead of saturating.
pub(crate) fn float_to_i64(v: f64) -> Result<i64> {
    // `i64::MAX as f64` rounds up to 2^63, which is itself out of range.
    if v.is_finite() && v >= i64::MIN as f64 && v < i64::MAX as f64 {
        Ok(v as i64)
    } else {
        Err(DataError::Conversion {
            value: v.to_string(),
            target: "int64",
        })
    }
}

/// Float projection of a dynamic value. Missing markers become NaN.
pub(crate) fn value_to_f64(value: &SeriesValue) -> Result<f64> {
    match value {
        SeriesValue::Int(v) => Ok(*v as f64),
        SeriesValue::Float(v) => Ok(*v),
        SeriesValue::Null => Ok(f64::NAN),
        SeriesValue::String(s) => s.parse::<f64>().map_err(|_| DataError::Parse {
            value: s.clone(),
            target: "float64",
        }),
        SeriesValue::Bool(_) => Err(DataError::Conversion {
            value: value.to_string(),
            target: "float64",
        }),
    }
}

impl Element for i64 {
    fn dtype(&self) -> DType {
        DType::Int64
    }

    fn to_value(&self) -> SeriesValue {
        SeriesValue::Int(*self)
    }

    fn to_text(&self) -> String {
        self.to_string()
    }

    fn to_i64(&self) -> Result<i64> {
        Ok(*self)
    }

    fn to_f64(&self) -> Result<f64> {
        Ok(*self as f64)
    }
}

impl Element for i32 {
    fn dtype(&self) -> DType {
        DType::Int32
    }

    fn to_value(&self) -> SeriesValue {
        SeriesValue::Int(*self as i64)
    }

    fn to_text(&self) -> String {
        self.to_string()
    }

    fn to_i64(&self) -> Result<i64> {
        Ok(*self as i64)
    }

    fn to_f64(&self) -> Result<f64> {
        Ok(*self as f64)
    }
}

impl Element for isize {
    fn dtype(&self) -> DType {
        DType::Int
    }

    fn to_value(&self) -> SeriesValue {
        SeriesValue::Int(*self as i64)
    }

    fn to_text(&self) -> String {
        self.to_string()
    }

    fn to_i64(&self) -> Result<i64> {
        Ok(*self as i64)
    }

    fn to_f64(&self) -> Result<f64> {
        Ok(*self as f64)
    }

    fn to_isize(&self) -> Result<isize> {
        Ok(*self)
    }
}

impl Element for f64 {
    fn dtype(&self) -> DType {
        DType::Float64
    }

    fn to_value(&self) -> SeriesValue {
        SeriesValue::Float(*self)
    }

    fn is_nan(&self) -> bool {
        f64::is_nan(*self)
    }

    fn to_text(&self) -> String {
        self.to_string()
    }

    fn to_i64(&self) -> Result<i64> {
        float_to_i64(*self)
    }

    fn to_f64(&self) -> Result<f64> {
        Ok(*self)
    }
}

impl Element for f32 {
    fn dtype(&self) -> DType {
        DType::Float32
    }

    fn to_value(&self) -> SeriesValue {
        SeriesValue::Float(*self as f64)
    }

    fn is_nan(&self) -> bool {
        f32::is_nan(*self)
    }

    fn to_text(&self) -> String {
        self.to_string()
    }

    fn to_i64(&self) -> Result<i64> {
        float_to_i64(*self as f64)
    }

    fn to_f64(&self) -> Result<f64> {
        Ok(*self as f64)
    }
}

impl Element for bool {
    fn dtype(&self) -> DType {
        DType::Bool
    }

    fn to_value(&self) -> SeriesValue {
        SeriesValue::Bool(*self)
    }

    fn to_text(&self) -> String {
        self.to_string()
    }
}

impl Element for String {
    fn dtype(&self) -> DType {
        DType::String
    }

    fn to_value(&self) -> SeriesValue {
        SeriesValue::String(self.clone())
    }

    fn to_text(&self) -> String {
        self.clone()
    }

    fn to_i64(&self) -> Result<i64> {
        self.parse::<i64>().map_err(|_| DataError::Parse {
            value: self.clone(),
            target: "int64",
        })
    }

    fn to_f64(&self) -> Result<f64> {
        self.parse::<f64>().map_err(|_| DataError::Parse {
            value: self.clone(),
            target: "float64",
        })
    }
}

impl Element for SeriesValue {
    fn dtype(&self) -> DType {
        SeriesValue::dtype(self)
    }

    fn to_value(&self) -> SeriesValue {
        self.clone()
    }

    fn is_nan(&self) -> bool {
        SeriesValue::is_nan(self)
    }
}

// Missing markers for homogeneous columns
impl<T: Element> Element for Option<T> {
    fn dtype(&self) -> DType {
        match self {
            Some(v) => v.dtype(),
            None => DType::Null,
        }
    }

    fn to_value(&self) -> SeriesValue {
        match self {
            Some(v) => v.to_value(),
            None => SeriesValue::Null,
        }
    }

    fn is_nan(&self) -> bool {
        match self {
            Some(v) => v.is_nan(),
            None => true,
        }
    }

    fn to_text(&self) -> String {
        match self {
            Some(v) => v.to_text(),
            None => SeriesValue::Null.to_string(),
        }
    }
}

impl<T: Element> Element for Box<T> {
    fn dtype(&self) -> DType {
        (**self).dtype()
    }

    fn to_value(&self) -> SeriesValue {
        (**self).to_value()
    }

    fn is_nan(&self) -> bool {
        (**self).is_nan()
    }

    fn to_text(&self) -> String {
        (**self).to_text()
    }

    fn to_i64(&self) -> Result<i64> {
        (**self).to_i64()
    }

    fn to_f64(&self) -> Result<f64> {
        (**self).to_f64()
    }
}
