//! Core data structures for ColFrame
//!
//! This module provides the columnar data model: typed [`Series`], the
//! [`DataFrame`] that groups equal-length series under unique names, the
//! location resolver used for positional selection, and the type inference
//! engine that turns raw text into typed columns.

mod builder;
mod dataframe;
mod element;
mod index;
mod infer;
mod selector;
mod series;
mod stats;
mod traits;
mod utils;
mod value;

#[cfg(test)]
mod tests;

// Re-exports
pub use builder::{
    DataFrameBuilder, read_columns, read_columns_with, read_map, read_map_with,
};
pub use dataframe::{DataFrame, Renamer};
pub use element::Element;
pub use index::{NameIndex, NameSet};
pub use infer::{InferConfig, InferStrategy, as_type, determine_type};
pub use selector::{ColumnKey, PositionSet, Selector};
pub use series::Series;
pub use stats::SeriesStats;
pub use traits::{AsMatrix, DataView};
pub use utils::DType;
pub use value::{SeriesValue, ValueKey};

/// Dense numeric matrix handed to numeric consumers
pub type Matrix = ndarray::Array2<f64>;

/// Error types specific to data operations
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    #[error("Index out of bounds: index {index}, length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("Invalid location expression: '{0}'")]
    InvalidSelector(String),

    #[error("Cannot convert '{value}' to {target}")]
    Conversion { value: String, target: &'static str },

    #[error("Cannot parse '{value}' as {target}")]
    Parse { value: String, target: &'static str },
}

/// Result type for data operations
pub type Result<T> = std::result::Result<T, DataError>;
