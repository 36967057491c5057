//! Builder pattern and text readers for constructing DataFrames

use std::sync::Arc;

use super::*;

/// Builder for creating DataFrames
///
/// Columns are validated as they are added: names must be unique and every
/// column must have the same length as the first one.
#[derive(Debug)]
pub struct DataFrameBuilder<E> {
    columns: Vec<Arc<Series<E>>>,
    names: NameSet,
    nrows: Option<usize>,
}

impl<E: Element> DataFrameBuilder<E> {
    /// Create a new DataFrameBuilder
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            names: NameSet::default(),
            nrows: None,
        }
    }

    /// Add a named column from its values
    pub fn with_column<S, V>(self, name: S, values: V) -> Result<Self>
    where
        S: Into<String>,
        V: Into<Vec<E>>,
    {
        self.with_series(Series::new(name, values))
    }

    /// Add a series as the next column
    pub fn with_series(self, series: Series<E>) -> Result<Self> {
        self.with_shared(Arc::new(series))
    }

    /// Add a column that may already be referenced by another frame
    pub(crate) fn with_shared(mut self, series: Arc<Series<E>>) -> Result<Self> {
        if self.names.contains(series.name()) {
            return Err(DataError::DuplicateColumn(series.name().to_string()));
        }

        // Check dimension consistency
        match self.nrows {
            Some(n) if series.len() != n => {
                return Err(DataError::DimensionMismatch {
                    expected: format!("{} rows", n),
                    actual: format!("{} rows", series.len()),
                });
            }
            None => {
                self.nrows = Some(series.len());
            }
            _ => {}
        }

        self.names.add(series.name());
        self.columns.push(series);
        Ok(self)
    }

    /// Build the DataFrame
    pub fn build(self) -> Result<DataFrame<E>> {
        DataFrame::from_shared(self.columns)
    }
}

impl<E: Element> Default for DataFrameBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a dynamic frame from column-major text.
///
/// Each inner slice is one column. With `has_header` the first token of each
/// column is its name; otherwise columns are named by position (`"0"`,
/// `"1"`, ...). Every column goes through type inference.
pub fn read_columns<C, S>(columns: &[C], has_header: bool) -> Result<DataFrame<SeriesValue>>
where
    C: AsRef<[S]>,
    S: AsRef<str>,
{
    read_columns_with(columns, has_header, &InferConfig::default())
}

/// [`read_columns`] with an explicit inference configuration
pub fn read_columns_with<C, S>(
    columns: &[C],
    has_header: bool,
    config: &InferConfig,
) -> Result<DataFrame<SeriesValue>>
where
    C: AsRef<[S]>,
    S: AsRef<str>,
{
    let mut builder = DataFrameBuilder::new();

    for (i, column) in columns.iter().enumerate() {
        let tokens = column.as_ref();
        let (name, tokens) = if has_header {
            match tokens.split_first() {
                Some((header, rest)) => (header.as_ref().to_string(), rest),
                None => {
                    return Err(DataError::DimensionMismatch {
                        expected: format!("a header token in column {}", i),
                        actual: "empty column".to_string(),
                    });
                }
            }
        } else {
            (i.to_string(), tokens)
        };

        builder = builder.with_series(infer_series(name, tokens, config)?)?;
    }

    builder.build()
}

/// Build a dynamic frame from `(name, tokens)` pairs, in iteration order.
pub fn read_map<I, K, V, S>(data: I) -> Result<DataFrame<SeriesValue>>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: AsRef<[S]>,
    S: AsRef<str>,
{
    read_map_with(data, &InferConfig::default())
}

/// [`read_map`] with an explicit inference configuration
pub fn read_map_with<I, K, V, S>(data: I, config: &InferConfig) -> Result<DataFrame<SeriesValue>>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: AsRef<[S]>,
    S: AsRef<str>,
{
    let mut builder = DataFrameBuilder::new();
    for (name, tokens) in data {
        builder = builder.with_series(infer_series(name.into(), tokens.as_ref(), config)?)?;
    }
    builder.build()
}

fn infer_series<S: AsRef<str>>(
    name: String,
    tokens: &[S],
    config: &InferConfig,
) -> Result<Series<SeriesValue>> {
    let (dtype, values) = config.infer(tokens)?;
    log::debug!("inferred column '{}' as {} ({} rows)", name, dtype, values.len());
    Ok(Series::new(name, values))
}
