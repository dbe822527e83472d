// crates/domain/src/record.rs
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};
use year_range_filter_shared_kernel::{DomainError, DomainResult};

/// A single attribute value as a host layer stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum AttributeValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Real(f64),
    Text(String),
}

impl AttributeValue {
    /// Coerces the value to an integer year.
    ///
    /// `Null` and blank text are absent. Reals must be whole. Anything else that
    /// does not parse as an integer is [`DomainError::MalformedValue`].
    pub fn as_year(&self, field: &str) -> DomainResult<Option<i64>> {
        match self {
            Self::Null => Ok(None),
            Self::Int(v) => Ok(Some(*v)),
            Self::Real(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 9.0e15 => {
                #[allow(clippy::cast_possible_truncation)]
                Ok(Some(*v as i64))
            }
            Self::Text(s) if s.trim().is_empty() => Ok(None),
            Self::Text(s) => s.trim().parse::<i64>().map(Some).map_err(|_| malformed(field, self)),
            Self::Real(_) | Self::Bool(_) => Err(malformed(field, self)),
        }
    }
}

fn malformed(field: &str, value: &AttributeValue) -> DomainError {
    DomainError::MalformedValue { field: field.to_string(), value: value.to_string() }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Real(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<AttributeValue>> From<Option<T>> for AttributeValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Ordered attribute table for one feature.
pub type AttributeMap = BTreeMap<String, AttributeValue>;

/// Capability a candidate record must expose to be range-filtered.
pub trait Record {
    /// Integer value of `field`, `Ok(None)` when the record does not carry it.
    fn optional_int(&self, field: &str) -> DomainResult<Option<i64>>;
}

impl Record for BTreeMap<String, AttributeValue> {
    fn optional_int(&self, field: &str) -> DomainResult<Option<i64>> {
        self.get(field).map_or(Ok(None), |v| v.as_year(field))
    }
}

impl<S: std::hash::BuildHasher> Record for HashMap<String, AttributeValue, S> {
    fn optional_int(&self, field: &str) -> DomainResult<Option<i64>> {
        self.get(field).map_or(Ok(None), |v| v.as_year(field))
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn optional_int(&self, field: &str) -> DomainResult<Option<i64>> {
        (**self).optional_int(field)
    }
}
