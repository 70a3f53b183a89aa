//! Client-side filter engine
//!
//! Resources declare a table of named criteria, each with an expected value
//! shape and a predicate. Callers pass a [`FilterMap`]; the engine type-checks
//! every recognised criterion before looking at a single object, then keeps
//! the objects that satisfy all supplied predicates. Unknown criteria are
//! ignored.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::error::ScmError;

/// Expected shape of a filter value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    StrList,
    IntList,
    Str,
    Int,
    GeoRange,
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::StrList => "a list of strings",
            Self::IntList => "a list of integers",
            Self::Str => "a string",
            Self::Int => "an integer",
            Self::GeoRange => "a latitude/longitude range",
        };
        f.write_str(text)
    }
}

/// Inclusive numeric bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Geographic bounding box used by region filters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoRange {
    pub latitude: Bounds,
    pub longitude: Bounds,
}

/// A caller-supplied filter value
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Str(String),
    Int(i64),
    StrList(Vec<String>),
    IntList(Vec<i64>),
    GeoRange(GeoRange),
}

impl FilterValue {
    /// Name of the supplied shape, for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Int(_) => "integer",
            Self::StrList(_) => "list of strings",
            Self::IntList(_) => "list of integers",
            Self::GeoRange(_) => "latitude/longitude range",
        }
    }

    /// True if the value has the shape `kind` expects
    ///
    /// An empty list carries no element type, so it satisfies either list kind.
    pub fn conforms_to(&self, kind: FilterKind) -> bool {
        match (self, kind) {
            (Self::StrList(_), FilterKind::StrList)
            | (Self::IntList(_), FilterKind::IntList)
            | (Self::Str(_), FilterKind::Str)
            | (Self::Int(_), FilterKind::Int)
            | (Self::GeoRange(_), FilterKind::GeoRange) => true,
            (Self::StrList(v), FilterKind::IntList) => v.is_empty(),
            (Self::IntList(v), FilterKind::StrList) => v.is_empty(),
            _ => false,
        }
    }

    /// String list contents, or an empty slice for any other shape
    pub fn strings(&self) -> &[String] {
        match self {
            Self::StrList(v) => v,
            _ => &[],
        }
    }

    /// Integer list contents, or an empty slice for any other shape
    pub fn integers(&self) -> &[i64] {
        match self {
            Self::IntList(v) => v,
            _ => &[],
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_geo_range(&self) -> Option<&GeoRange> {
        match self {
            Self::GeoRange(v) => Some(v),
            _ => None,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(value: Vec<String>) -> Self {
        Self::StrList(value)
    }
}

impl From<Vec<&str>> for FilterValue {
    fn from(value: Vec<&str>) -> Self {
        Self::StrList(value.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for FilterValue {
    fn from(value: [&str; N]) -> Self {
        Self::StrList(value.iter().map(|s| (*s).to_string()).collect())
    }
}

impl From<Vec<i64>> for FilterValue {
    fn from(value: Vec<i64>) -> Self {
        Self::IntList(value)
    }
}

impl<const N: usize> From<[i64; N]> for FilterValue {
    fn from(value: [i64; N]) -> Self {
        Self::IntList(value.to_vec())
    }
}

impl From<GeoRange> for FilterValue {
    fn from(value: GeoRange) -> Self {
        Self::GeoRange(value)
    }
}

/// Criteria supplied to a `list` call, keyed by criterion name
pub type FilterMap = BTreeMap<String, FilterValue>;

/// One named criterion in a resource's filter table
pub struct FilterSpec<T> {
    pub name: &'static str,
    pub kind: FilterKind,
    pub predicate: fn(&T, &FilterValue) -> bool,
}

impl<T> FilterSpec<T> {
    pub const fn new(
        name: &'static str,
        kind: FilterKind,
        predicate: fn(&T, &FilterValue) -> bool,
    ) -> Self {
        Self {
            name,
            kind,
            predicate,
        }
    }
}

impl<T> Clone for FilterSpec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FilterSpec<T> {}

impl<T> fmt::Debug for FilterSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterSpec")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Type-check every recognised criterion, in table order
///
/// Returns the active `(entry, value)` pairs. The first mismatch aborts the
/// whole call, even if other criteria are well-formed.
pub fn validate_filters<'a, T>(
    criteria: &'a FilterMap,
    table: &'a [FilterSpec<T>],
) -> Result<Vec<(&'a FilterSpec<T>, &'a FilterValue)>, ScmError> {
    let mut active = Vec::new();
    for entry in table {
        if let Some(value) = criteria.get(entry.name) {
            if !value.conforms_to(entry.kind) {
                return Err(ScmError::InvalidFilterType {
                    criterion: entry.name.to_string(),
                    expected: entry.kind,
                    actual: value.type_name(),
                });
            }
            active.push((entry, value));
        }
    }

    for name in criteria.keys() {
        if !table.iter().any(|entry| entry.name == name.as_str()) {
            debug!("Ignoring unknown filter criterion '{}'", name);
        }
    }

    Ok(active)
}

/// Narrow `objects` to those matching every supplied criterion
pub fn apply_filters<T>(
    objects: Vec<T>,
    criteria: &FilterMap,
    table: &[FilterSpec<T>],
) -> Result<Vec<T>, ScmError> {
    let active = validate_filters(criteria, table)?;
    if active.is_empty() {
        return Ok(objects);
    }

    Ok(objects
        .into_iter()
        .filter(|object| {
            active
                .iter()
                .all(|(entry, value)| (entry.predicate)(object, value))
        })
        .collect())
}

/// `value` is one of `wanted`
pub fn in_list(value: Option<&str>, wanted: &[String]) -> bool {
    value.is_some_and(|v| wanted.iter().any(|w| w == v))
}

/// At least one of `values` is in `wanted`
pub fn intersects(values: Option<&[String]>, wanted: &[String]) -> bool {
    values.is_some_and(|vs| vs.iter().any(|v| wanted.contains(v)))
}
