//! Series data structure for holding one named column
//!
//! A Series is a named, ordered sequence of elements of one Rust type `E`.
//! Homogeneous columns use a primitive element type (`i64`, `f64`, `bool`,
//! `String`, ...); dynamic columns use [`SeriesValue`], where each cell
//! carries its own kind. It's the building block of DataFrames.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::OnceLock;

use super::*;

/// A named, ordered column of elements
#[derive(Clone, Debug)]
pub struct Series<E> {
    name: String,
    elements: Vec<E>,
    // Lazily computed; only set when every non-missing element shares a kind
    dtype: OnceLock<DType>,
}

impl<E> Series<E> {
    /// Create a new series
    pub fn new(name: impl Into<String>, elements: impl Into<Vec<E>>) -> Self {
        Self {
            name: name.into(),
            elements: elements.into(),
            dtype: OnceLock::new(),
        }
    }

    /// Name of the series
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Relabel in place. Uniqueness is the owning frame's concern.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Get the length of the series
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Get the element at a position
    pub fn get(&self, idx: usize) -> Result<&E> {
        self.elements.get(idx).ok_or(DataError::IndexOutOfBounds {
            index: idx,
            len: self.elements.len(),
        })
    }

    /// All elements in order
    pub fn as_slice(&self) -> &[E] {
        &self.elements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.elements.iter()
    }

    pub fn into_vec(self) -> Vec<E> {
        self.elements
    }

    /// Visit every element with its position
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(usize, &E),
    {
        for (i, e) in self.elements.iter().enumerate() {
            f(i, e);
        }
    }

    fn invalidate_dtype(&mut self) {
        self.dtype = OnceLock::new();
    }
}

impl<E: Element> Series<E> {
    /// Get the declared kind of the series.
    ///
    /// Missing markers are skipped. A single shared kind is cached; mixed
    /// kinds, or a column with no non-missing element, report
    /// `DType::Dynamic` and are recomputed on every call.
    pub fn dtype(&self) -> DType {
        if let Some(dtype) = self.dtype.get() {
            return *dtype;
        }

        let mut kind = None;
        for e in &self.elements {
            let t = e.dtype();
            if t == DType::Null {
                continue;
            }
            match kind {
                None => kind = Some(t),
                Some(k) if k != t => return DType::Dynamic,
                _ => {}
            }
        }

        match kind {
            Some(k) => *self.dtype.get_or_init(|| k),
            None => DType::Dynamic,
        }
    }

    pub fn to_vec(&self) -> Vec<E> {
        self.elements.clone()
    }

    /// Copy of the series under a new name
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            elements: self.elements.clone(),
            dtype: self.dtype.clone(),
        }
    }

    /// New series with `values` appended; the receiver is unchanged.
    pub fn append<I>(&self, values: I) -> Self
    where
        I: IntoIterator<Item = E>,
    {
        let mut elements = self.elements.clone();
        elements.extend(values);
        Series::new(self.name.clone(), elements)
    }

    /// Append `values` to this series.
    pub fn append_inplace<I>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = E>,
    {
        self.elements.extend(values);
        self.invalidate_dtype();
        self
    }

    /// New series with the elements of `other` appended
    pub fn concat(&self, other: &Series<E>) -> Self {
        self.append(other.elements.iter().cloned())
    }

    /// Append the elements of `other` to this series.
    pub fn concat_inplace(&mut self, other: &Series<E>) -> &mut Self {
        self.append_inplace(other.elements.iter().cloned())
    }

    /// Dynamic copy of the series with `values` appended
    pub fn append_any<I, V>(&self, values: I) -> Series<SeriesValue>
    where
        I: IntoIterator<Item = V>,
        V: Into<SeriesValue>,
    {
        let mut elements: Vec<SeriesValue> = self.elements.iter().map(Element::to_value).collect();
        elements.extend(values.into_iter().map(Into::into));
        Series::new(self.name.clone(), elements)
    }

    /// Map every element, keeping the element type
    pub fn apply<F>(&self, mut mapper: F) -> Self
    where
        F: FnMut(usize, &E) -> E,
    {
        let elements = self
            .elements
            .iter()
            .enumerate()
            .map(|(i, e)| mapper(i, e))
            .collect::<Vec<_>>();
        Series::new(self.name.clone(), elements)
    }

    /// Map every element into a dynamic value
    pub fn apply_any<F>(&self, mut mapper: F) -> Series<SeriesValue>
    where
        F: FnMut(usize, &E) -> SeriesValue,
    {
        let elements = self
            .elements
            .iter()
            .enumerate()
            .map(|(i, e)| mapper(i, e))
            .collect::<Vec<_>>();
        Series::new(self.name.clone(), elements)
    }

    /// Substitute every element matching a mapping key.
    ///
    /// Keys are matched by value identity ([`ValueKey`]), so a NaN key
    /// matches NaN elements. Unmatched elements pass through unchanged.
    pub fn replace<I, K, V>(&self, mapping: I) -> Series<SeriesValue>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<SeriesValue>,
        V: Into<SeriesValue>,
    {
        let mapping: HashMap<ValueKey, SeriesValue> = mapping
            .into_iter()
            .map(|(k, v)| (Into::<SeriesValue>::into(k).key(), v.into()))
            .collect();

        self.apply_any(|_, e| {
            let value = e.to_value();
            match mapping.get(&value.key()) {
                Some(replacement) => replacement.clone(),
                None => value,
            }
        })
    }

    /// Contiguous half-open slice `[from, to)`
    pub fn sub_series(&self, from: usize, to: usize) -> Result<Self> {
        if to > self.len() {
            return Err(DataError::IndexOutOfBounds {
                index: to,
                len: self.len(),
            });
        }
        if from > to {
            return Err(DataError::IndexOutOfBounds {
                index: from,
                len: to,
            });
        }
        Ok(Series::new(self.name.clone(), &self.elements[from..to]))
    }

    /// Keep the elements at the given positions, in original order
    pub fn sub_series_by_indexes(&self, indexes: &[usize]) -> Self {
        let indexer: PositionSet = indexes.iter().copied().collect();
        self.sub_series_by_indexer(&indexer)
    }

    /// Keep the elements whose original position is in `indexer`.
    ///
    /// The result is always in ascending original position, whatever the
    /// order the set was built or iterated in. Positions past the end are
    /// ignored.
    pub fn sub_series_by_indexer(&self, indexer: &PositionSet) -> Self {
        let elements = self
            .elements
            .iter()
            .enumerate()
            .filter(|(i, _)| indexer.contains(i))
            .map(|(_, e)| e.clone())
            .collect::<Vec<_>>();
        Series::new(self.name.clone(), elements)
    }

    /// Keep the elements satisfying `predicate`, preserving order
    pub fn filter<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(usize, &E) -> bool,
    {
        let elements = self
            .elements
            .iter()
            .enumerate()
            .filter(|(i, e)| predicate(*i, e))
            .map(|(_, e)| e.clone())
            .collect::<Vec<_>>();
        Series::new(self.name.clone(), elements)
    }

    /// Left fold seeded with the first element; `None` when empty
    pub fn reduce<F>(&self, mut reducer: F) -> Option<E>
    where
        F: FnMut(&E, &E) -> E,
    {
        let (first, rest) = self.elements.split_first()?;
        Some(rest.iter().fold(first.clone(), |acc, e| reducer(&acc, e)))
    }

    /// Left fold over the `Float64` projection; `None` when empty
    pub fn reduce_f64<F>(&self, mut reducer: F) -> Result<Option<f64>>
    where
        F: FnMut(f64, f64) -> f64,
    {
        let mut acc: Option<f64> = None;
        for e in &self.elements {
            let v = e.to_f64()?;
            acc = Some(match acc {
                None => v,
                Some(a) => reducer(a, v),
            });
        }
        Ok(acc)
    }

    /// Smallest value of the `Float64` projection. NaN propagates.
    pub fn min(&self) -> Result<Option<f64>> {
        self.reduce_f64(|a, b| if a.is_nan() || b.is_nan() { f64::NAN } else { a.min(b) })
    }

    /// Largest value of the `Float64` projection. NaN propagates.
    pub fn max(&self) -> Result<Option<f64>> {
        self.reduce_f64(|a, b| if a.is_nan() || b.is_nan() { f64::NAN } else { a.max(b) })
    }

    /// Remove every element equal to `value`
    pub fn drop_value(&self, value: &E) -> Self {
        self.filter(|_, e| e != value)
    }

    /// Keep the first occurrence of each distinct value, in order
    pub fn drop_duplicates(&self) -> Self {
        let mut seen = HashSet::new();
        self.filter(|_, e| seen.insert(e.to_value().key()))
    }

    /// Remove missing markers and NaN floats
    pub fn drop_nan(&self) -> Self {
        self.filter(|_, e| !e.is_nan())
    }

    /// Platform-integer projection
    pub fn int(&self) -> Result<Series<isize>> {
        self.project(Element::to_isize)
    }

    /// 64-bit integer projection
    pub fn int64(&self) -> Result<Series<i64>> {
        self.project(Element::to_i64)
    }

    /// 64-bit float projection
    pub fn float64(&self) -> Result<Series<f64>> {
        self.project(Element::to_f64)
    }

    /// Text projection; never fails
    pub fn str(&self) -> Series<String> {
        let elements = self.elements.iter().map(Element::to_text).collect::<Vec<_>>();
        Series::new(self.name.clone(), elements)
    }

    /// Dynamic projection; never fails
    pub fn to_dynamic(&self) -> Series<SeriesValue> {
        let elements = self.elements.iter().map(Element::to_value).collect::<Vec<_>>();
        Series::new(self.name.clone(), elements)
    }

    fn project<T, F>(&self, convert: F) -> Result<Series<T>>
    where
        F: Fn(&E) -> Result<T>,
    {
        let elements = self
            .elements
            .iter()
            .map(convert)
            .collect::<Result<Vec<T>>>()?;
        Ok(Series::new(self.name.clone(), elements))
    }

    /// Render a head/tail preview.
    ///
    /// When the series is longer than `limit`, only the first and last
    /// `limit / 2` rows are shown around a `...` line. Positions are
    /// left-aligned, values right-aligned to the widest shown value.
    pub fn print(&self, limit: usize, include_footer: bool) -> String {
        let len = self.len();
        let half = limit / 2;
        let truncated = len > limit;

        let positions: Vec<usize> = if truncated {
            (0..half).chain(len - half..len).collect()
        } else {
            (0..len).collect()
        };

        let labels: Vec<String> = positions.iter().map(|i| i.to_string()).collect();
        let values: Vec<String> = positions
            .iter()
            .map(|&i| self.elements[i].to_text())
            .collect();

        let label_width = labels.iter().map(|s| s.chars().count()).max().unwrap_or(0);
        let value_width = values
            .iter()
            .map(|s| s.chars().count())
            .max()
            .unwrap_or(0)
            .max("...".len());

        let line = |label: &str, value: &str| {
            format!("{:<lw$}\t{:>vw$}\n", label, value, lw = label_width, vw = value_width)
        };

        let head = if truncated { half } else { values.len() };
        let mut buf = String::new();
        for (label, value) in labels.iter().zip(&values).take(head) {
            buf.push_str(&line(label.as_str(), value.as_str()));
        }
        if truncated {
            buf.push_str(&line("", "..."));
        }
        for (label, value) in labels.iter().zip(&values).skip(head) {
            buf.push_str(&line(label.as_str(), value.as_str()));
        }

        if include_footer {
            buf.push_str(&format!("Length: {}, dtype: {}", len, self.dtype()));
        }
        buf
    }
}

impl<E: PartialEq> PartialEq for Series<E> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.elements == other.elements
    }
}

impl<E: Element> fmt::Display for Series<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.print(10, true))
    }
}

impl<'a, E> IntoIterator for &'a Series<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
