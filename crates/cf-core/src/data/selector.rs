//! Location expressions for row and column selection
//!
//! A selector is a single position, a set of positions, or a `"from:to"`
//! slice string. Resolution always yields a [`PositionSet`]; the order in
//! which positions were supplied carries no meaning.

use std::collections::{BTreeSet, HashSet};

use super::*;

/// Set of absolute positions on one axis
pub type PositionSet = HashSet<usize>;

/// Row or column selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Position(usize),
    Positions(PositionSet),
    /// `"<from>:<to>"`, half-open, either bound may be empty
    Slice(String),
}

impl Selector {
    /// Every position on the axis
    pub fn all() -> Self {
        Selector::Slice(":".to_string())
    }

    /// Resolve against an axis of `len` positions.
    pub fn resolve(&self, len: usize) -> Result<PositionSet> {
        match self {
            Selector::Position(i) => Ok(PositionSet::from([*i])),
            Selector::Positions(set) => Ok(set.clone()),
            Selector::Slice(expr) => {
                let (from, to) = parse_slice(expr, len)?;
                Ok((from..to.min(len)).collect())
            }
        }
    }
}

fn parse_slice(expr: &str, len: usize) -> Result<(usize, usize)> {
    let mut parts = expr.split(':');
    let (from, to) = match (parts.next(), parts.next(), parts.next()) {
        (Some(from), Some(to), None) => (from, to),
        _ => return Err(DataError::InvalidSelector(expr.to_string())),
    };

    let bound = |s: &str, default: usize| -> Result<usize> {
        if s.is_empty() {
            return Ok(default);
        }
        s.parse::<usize>()
            .map_err(|_| DataError::InvalidSelector(expr.to_string()))
    };

    Ok((bound(from, 0)?, bound(to, len)?))
}

impl From<usize> for Selector {
    fn from(i: usize) -> Self {
        Selector::Position(i)
    }
}

impl From<Vec<usize>> for Selector {
    fn from(v: Vec<usize>) -> Self {
        Selector::Positions(v.into_iter().collect())
    }
}

impl From<&[usize]> for Selector {
    fn from(v: &[usize]) -> Self {
        Selector::Positions(v.iter().copied().collect())
    }
}

impl<const N: usize> From<[usize; N]> for Selector {
    fn from(v: [usize; N]) -> Self {
        Selector::Positions(v.into_iter().collect())
    }
}

impl From<PositionSet> for Selector {
    fn from(set: PositionSet) -> Self {
        Selector::Positions(set)
    }
}

impl From<BTreeSet<usize>> for Selector {
    fn from(set: BTreeSet<usize>) -> Self {
        Selector::Positions(set.into_iter().collect())
    }
}

impl From<&str> for Selector {
    fn from(expr: &str) -> Self {
        Selector::Slice(expr.to_string())
    }
}

impl From<String> for Selector {
    fn from(expr: String) -> Self {
        Selector::Slice(expr)
    }
}

/// Column addressed by position or by name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnKey {
    Position(usize),
    Name(String),
}

impl From<usize> for ColumnKey {
    fn from(i: usize) -> Self {
        ColumnKey::Position(i)
    }
}

impl From<&str> for ColumnKey {
    fn from(name: &str) -> Self {
        ColumnKey::Name(name.to_string())
    }
}

impl From<String> for ColumnKey {
    fn from(name: String) -> Self {
        ColumnKey::Name(name)
    }
}

impl From<&String> for ColumnKey {
    fn from(name: &String) -> Self {
        ColumnKey::Name(name.clone())
    }
}

impl std::fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnKey::Position(i) => write!(f, "{}", i),
            ColumnKey::Name(name) => write!(f, "{}", name),
        }
    }
}
