//! Name index structures for DataFrames

use std::collections::{HashMap, HashSet};

use super::*;

/// Name → position map of a frame's columns.
///
/// Always derived from the column order by [`NameIndex::build`]; it is never
/// edited in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameIndex {
    positions: HashMap<String, usize>,
}

impl NameIndex {
    /// Build the index from column names in order.
    ///
    /// Fails on the first duplicated name.
    pub fn build<'a, I>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut positions = HashMap::new();
        for (i, name) in names.into_iter().enumerate() {
            if positions.insert(name.to_string(), i).is_some() {
                return Err(DataError::DuplicateColumn(name.to_string()));
            }
        }
        Ok(Self { positions })
    }

    /// Position of a name
    pub fn get(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Membership set of column names
#[derive(Debug, Clone, Default)]
pub struct NameSet {
    values: HashSet<String>,
}

impl NameSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains(name)
    }

    /// First of `names` already in the set
    pub fn contains_any<'a, I>(&self, names: I) -> Option<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names.into_iter().find(|name| self.values.contains(*name))
    }

    /// Add a name, returning false if it was already present
    pub fn add(&mut self, name: impl Into<String>) -> bool {
        self.values.insert(name.into())
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.values.remove(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
