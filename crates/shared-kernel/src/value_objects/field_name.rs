// crates/shared-kernel/src/value_objects/field_name.rs
use std::{borrow::Borrow, fmt, ops::Deref};

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Name of an attribute on a host record. Guaranteed non-empty after trimming.
///
/// The text is kept verbatim: it is neither trimmed nor escaped when it is later
/// quoted into a subset predicate.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldName(String);

impl FieldName {
    /// Validates `name`; `role` names the field in the error (e.g. "begin").
    pub fn parse(name: impl Into<String>, role: &str) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::EmptyFieldName { role: role.to_string() });
        }
        Ok(Self(name))
    }

    /// Wraps a compile-time constant such as a default field name.
    pub fn from_static(name: &'static str) -> Self {
        debug_assert!(!name.trim().is_empty(), "static field name must not be blank");
        Self(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for FieldName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value, "attribute")
    }
}

impl TryFrom<&str> for FieldName {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value, "attribute")
    }
}

impl From<FieldName> for String {
    fn from(value: FieldName) -> Self {
        value.0
    }
}

impl Deref for FieldName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for FieldName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for FieldName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
