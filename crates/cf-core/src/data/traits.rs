//! Traits for data operations

use super::*;

/// Element-agnostic read access to tabular data.
///
/// Encoders work against this trait so they can handle a frame of any
/// element type behind `&dyn DataView`.
pub trait DataView: Send + Sync {
    /// Get the shape of the data
    fn shape(&self) -> (usize, usize);

    /// Get column names
    fn column_names(&self) -> Vec<&str>;

    /// Kind of the column at a position
    fn column_dtype(&self, col: usize) -> Option<DType>;

    /// Dynamic value of a cell
    fn cell_value(&self, row: usize, col: usize) -> Option<SeriesValue>;

    /// Text form of a cell, as written by encoders
    fn cell_text(&self, row: usize, col: usize) -> Option<String>;

    /// Text form of every cell of a row
    fn row_text(&self, row: usize) -> Option<Vec<String>> {
        let (_, ncols) = self.shape();
        (0..ncols).map(|col| self.cell_text(row, col)).collect()
    }
}

impl<E: Element> DataView for DataFrame<E> {
    fn shape(&self) -> (usize, usize) {
        self.shape()
    }

    fn column_names(&self) -> Vec<&str> {
        self.names()
    }

    fn column_dtype(&self, col: usize) -> Option<DType> {
        self.get_by_index(col).ok().map(Series::dtype)
    }

    fn cell_value(&self, row: usize, col: usize) -> Option<SeriesValue> {
        self.val(row, col).ok().map(Element::to_value)
    }

    fn cell_text(&self, row: usize, col: usize) -> Option<String> {
        self.val(row, col).ok().map(Element::to_text)
    }
}

/// Trait for converting to a dense numeric matrix
pub trait AsMatrix {
    /// Row-major `(nrows, ncols)` matrix of the float projection
    fn as_matrix(&self) -> Result<Matrix>;

    /// Get dimensions
    fn dim(&self) -> (usize, usize);

    /// Check if matrix is empty
    fn is_empty(&self) -> bool {
        let (rows, cols) = self.dim();
        rows == 0 || cols == 0
    }
}

impl<E: Element> AsMatrix for DataFrame<E> {
    fn as_matrix(&self) -> Result<Matrix> {
        let floats = self.float64()?;
        let mut matrix = Matrix::zeros(self.shape());
        for (j, series) in floats.columns().enumerate() {
            for (i, &v) in series.iter().enumerate() {
                matrix[[i, j]] = v;
            }
        }
        Ok(matrix)
    }

    fn dim(&self) -> (usize, usize) {
        self.shape()
    }
}
