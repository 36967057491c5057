//! DataFrame implementation for tabular data
//!
//! A DataFrame is an ordered collection of equal-length, uniquely-named
//! columns. Columns are held behind `Arc`: transforms that leave a column
//! untouched share it with the source frame instead of copying it, and a
//! column is never mutated while another frame can still see it.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use super::*;
use super::utils::check_equal_lengths;

/// Main DataFrame structure
#[derive(Clone, Debug)]
pub struct DataFrame<E> {
    columns: Vec<Arc<Series<E>>>,
    // Derived from `columns` by `reindex`; shared by shallow copies and projections
    index: Arc<NameIndex>,
}

impl<E> Default for DataFrame<E> {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            index: Arc::default(),
        }
    }
}

impl<E: Element> DataFrame<E> {
    /// Create DataFrame from columns.
    ///
    /// All columns must have the same length and distinct names.
    pub fn new<I>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = Series<E>>,
    {
        let mut builder = DataFrameBuilder::new();

        for series in columns.into_iter() {
            builder = builder.with_series(series)?;
        }

        builder.build()
    }

    /// Create an empty DataFrame
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_shared(columns: Vec<Arc<Series<E>>>) -> Result<Self> {
        check_equal_lengths(columns.iter().map(|s| s.len()))?;
        let mut df = Self {
            columns,
            index: Arc::default(),
        };
        df.reindex()?;
        Ok(df)
    }

    /// Recompute the name → position map from the current column order.
    ///
    /// Fails if two columns share a name; the previous index is then kept.
    pub fn reindex(&mut self) -> Result<()> {
        self.index = Arc::new(NameIndex::build(self.columns.iter().map(|s| s.name()))?);
        log::trace!("reindexed {} columns", self.columns.len());
        Ok(())
    }

    /// Get the shape of the DataFrame (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }

    /// Get the number of rows
    pub fn nrows(&self) -> usize {
        self.columns.first().map_or(0, |s| s.len())
    }

    /// Get the number of columns
    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    /// Get column names
    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|s| s.name()).collect()
    }

    /// Name of the column at a position
    pub fn name(&self, idx: usize) -> Result<&str> {
        self.get_by_index(idx).map(Series::name)
    }

    /// Position of a named column
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name)
    }

    /// Check if column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains(name)
    }

    /// Declared kind of every column, in order
    pub fn dtypes(&self) -> Vec<DType> {
        self.columns.iter().map(|s| s.dtype()).collect()
    }

    /// Get a column by name; `None` for an unknown name
    pub fn get(&self, name: &str) -> Option<&Series<E>> {
        self.index.get(name).map(|i| self.columns[i].as_ref())
    }

    /// Get a column by position
    pub fn get_by_index(&self, idx: usize) -> Result<&Series<E>> {
        self.columns
            .get(idx)
            .map(Arc::as_ref)
            .ok_or(DataError::IndexOutOfBounds {
                index: idx,
                len: self.columns.len(),
            })
    }

    /// Shared handle of the column at a position
    pub fn shared(&self, idx: usize) -> Option<&Arc<Series<E>>> {
        self.columns.get(idx)
    }

    /// The first column, if any
    pub fn series(&self) -> Option<&Series<E>> {
        self.columns.first().map(Arc::as_ref)
    }

    /// Iterate over the columns in order
    pub fn columns(&self) -> impl Iterator<Item = &Series<E>> + '_ {
        self.columns.iter().map(Arc::as_ref)
    }

    /// Value at `row` of the column addressed by position or name
    pub fn val(&self, row: usize, col: impl Into<ColumnKey>) -> Result<&E> {
        let col = self.resolve(&col.into())?;
        self.columns[col].get(row)
    }

    fn resolve(&self, key: &ColumnKey) -> Result<usize> {
        match key {
            ColumnKey::Position(i) if *i < self.columns.len() => Ok(*i),
            ColumnKey::Position(i) => Err(DataError::IndexOutOfBounds {
                index: *i,
                len: self.columns.len(),
            }),
            ColumnKey::Name(name) => self
                .index
                .get(name)
                .ok_or_else(|| DataError::ColumnNotFound(name.clone())),
        }
    }

    /// Select rows and columns by location expressions.
    ///
    /// ```
    /// # use cf_core::data::{DataFrame, Series};
    /// let df = DataFrame::new(vec![
    ///     Series::new("a", vec![1i64, 2, 3]),
    ///     Series::new("b", vec![4i64, 5, 6]),
    ///     Series::new("c", vec![7i64, 8, 9]),
    /// ])
    /// .unwrap();
    ///
    /// let sub = df.location(vec![2usize, 0], "1:").unwrap();
    /// assert_eq!(sub.names(), vec!["b", "c"]);
    /// assert_eq!(sub.get("b").unwrap().as_slice(), &[4, 6]);
    /// ```
    ///
    /// Retained columns keep their original left-to-right order, and retained
    /// rows keep their original top-to-bottom order.
    pub fn location(&self, rows: impl Into<Selector>, cols: impl Into<Selector>) -> Result<Self> {
        let rows = rows.into().resolve(self.nrows())?;
        let cols = cols.into().resolve(self.ncols())?;

        let columns = self
            .columns
            .iter()
            .enumerate()
            .filter(|(i, _)| cols.contains(i))
            .map(|(_, series)| Arc::new(series.sub_series_by_indexer(&rows)))
            .collect();

        let df = Self::from_shared(columns)?;
        log::debug!("location selected {} rows × {} cols", df.nrows(), df.ncols());
        Ok(df)
    }

    /// New frame without one column; other columns are shared.
    pub fn drop_column(&self, key: impl Into<ColumnKey>) -> Result<Self> {
        let idx = self.resolve(&key.into())?;
        let mut columns = self.columns.clone();
        columns.remove(idx);
        Self::from_shared(columns)
    }

    /// Remove one column from this frame.
    pub fn drop_column_inplace(&mut self, key: impl Into<ColumnKey>) -> Result<&mut Self> {
        let idx = self.resolve(&key.into())?;
        self.columns.remove(idx);
        self.reindex()?;
        Ok(self)
    }

    /// New frame with columns renamed; unmapped columns are shared.
    pub fn rename(&self, renamer: &Renamer) -> Result<Self> {
        let columns = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, series)| match renamer.lookup(i, series.name()) {
                Some(name) => Arc::new(series.renamed(name)),
                None => Arc::clone(series),
            })
            .collect();
        Self::from_shared(columns)
    }

    /// Rename columns of this frame.
    ///
    /// A renamed column that is still shared with another frame is copied
    /// first, so the other frame keeps the old name. On a name collision the
    /// frame is left unchanged.
    pub fn rename_inplace(&mut self, renamer: &Renamer) -> Result<&mut Self> {
        let index = NameIndex::build(
            self.columns
                .iter()
                .enumerate()
                .map(|(i, s)| renamer.lookup(i, s.name()).unwrap_or(s.name())),
        )?;

        for (i, column) in self.columns.iter_mut().enumerate() {
            if let Some(name) = renamer.lookup(i, column.name()) {
                Arc::make_mut(column).set_name(name);
            }
        }
        self.index = Arc::new(index);
        Ok(self)
    }

    /// New frame with `series` inserted at column `position`
    pub fn insert(&self, position: usize, series: Series<E>) -> Result<Self> {
        if self.has_column(series.name()) {
            return Err(DataError::DuplicateColumn(series.name().to_string()));
        }
        if position > self.ncols() {
            return Err(DataError::IndexOutOfBounds {
                index: position,
                len: self.ncols(),
            });
        }

        let mut columns = self.columns.clone();
        columns.insert(position, Arc::new(series));
        let df = Self::from_shared(columns)?;
        log::debug!("inserted column at {}, now {} cols", position, df.ncols());
        Ok(df)
    }

    /// Horizontal join of two frames with equal row counts and distinct
    /// column names
    pub fn concat(&self, other: &DataFrame<E>) -> Result<Self> {
        if self.nrows() != other.nrows() {
            return Err(DataError::DimensionMismatch {
                expected: format!("{} rows", self.nrows()),
                actual: format!("{} rows", other.nrows()),
            });
        }

        let names = NameSet::new(self.names());
        if let Some(name) = names.contains_any(other.names()) {
            return Err(DataError::DuplicateColumn(name.to_string()));
        }

        let columns = self
            .columns
            .iter()
            .chain(other.columns.iter())
            .cloned()
            .collect();
        let df = Self::from_shared(columns)?;
        log::debug!("concatenated into {} cols", df.ncols());
        Ok(df)
    }

    /// Swap rows and columns.
    ///
    /// Column `i` of the result is row `i` of this frame, named `"i"`. The
    /// original column names are discarded, so transposing twice does not
    /// restore them.
    pub fn transpose(&self) -> Result<Self> {
        let columns = (0..self.nrows())
            .map(|row| {
                let values = self
                    .columns
                    .iter()
                    .map(|s| s.as_slice()[row].clone())
                    .collect::<Vec<E>>();
                Arc::new(Series::new(row.to_string(), values))
            })
            .collect();
        let df = Self::from_shared(columns)?;
        log::debug!("transposed into {} rows × {} cols", df.nrows(), df.ncols());
        Ok(df)
    }

    /// Shallow copy sharing every column and the name index
    pub fn shallow_copy(&self) -> Self {
        self.clone()
    }

    /// Platform-integer projection of every column
    pub fn int(&self) -> Result<DataFrame<isize>> {
        self.project(Series::int)
    }

    /// 64-bit integer projection of every column
    pub fn int64(&self) -> Result<DataFrame<i64>> {
        self.project(Series::int64)
    }

    /// 64-bit float projection of every column
    pub fn float64(&self) -> Result<DataFrame<f64>> {
        self.project(Series::float64)
    }

    /// Text projection of every column
    pub fn str(&self) -> DataFrame<String> {
        DataFrame {
            columns: self.columns.iter().map(|s| Arc::new(s.str())).collect(),
            index: Arc::clone(&self.index),
        }
    }

    /// Dynamic projection of every column
    pub fn to_dynamic(&self) -> DataFrame<SeriesValue> {
        DataFrame {
            columns: self.columns.iter().map(|s| Arc::new(s.to_dynamic())).collect(),
            index: Arc::clone(&self.index),
        }
    }

    // Column names and order are unchanged, so the index is reused as is.
    fn project<T, F>(&self, convert: F) -> Result<DataFrame<T>>
    where
        F: Fn(&Series<E>) -> Result<Series<T>>,
    {
        let columns = self
            .columns
            .iter()
            .map(|s| convert(s).map(Arc::new))
            .collect::<Result<Vec<_>>>()?;
        Ok(DataFrame {
            columns,
            index: Arc::clone(&self.index),
        })
    }

    /// Column-major copy of every value
    pub fn to_columns(&self) -> Vec<Vec<E>> {
        self.columns.iter().map(|s| s.to_vec()).collect()
    }

    /// Row-major copy of every value
    pub fn to_rows(&self) -> Result<Vec<Vec<E>>> {
        Ok(self.transpose()?.to_columns())
    }
}

impl<E: Element> fmt::Display for DataFrame<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DataFrame({} rows × {} cols)", self.nrows(), self.ncols())?;
        for series in self.columns() {
            write!(f, "\n{}\t{}", series.name(), series.dtype())?;
        }
        Ok(())
    }
}

/// Column renaming plan keyed by position or by name.
///
/// For each column a position key takes priority over a name key.
///
/// ```
/// # use cf_core::data::{ColumnKey, Renamer};
/// let renamer: Renamer = [(ColumnKey::from(0usize), "first"), (ColumnKey::from("b"), "second")]
///     .into_iter()
///     .collect();
/// assert_eq!(renamer.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Renamer {
    mapping: IndexMap<ColumnKey, String>,
}

impl Renamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rename the column at `idx`
    pub fn position(mut self, idx: usize, name: impl Into<String>) -> Self {
        self.mapping.insert(ColumnKey::Position(idx), name.into());
        self
    }

    /// Rename the column called `old`
    pub fn name(mut self, old: impl Into<String>, new: impl Into<String>) -> Self {
        self.mapping.insert(ColumnKey::Name(old.into()), new.into());
        self
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    fn lookup(&self, idx: usize, name: &str) -> Option<&str> {
        self.mapping
            .get(&ColumnKey::Position(idx))
            .or_else(|| self.mapping.get(&ColumnKey::Name(name.to_string())))
            .map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for Renamer
where
    K: Into<ColumnKey>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            mapping: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
