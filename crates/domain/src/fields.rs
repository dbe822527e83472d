// crates/domain/src/fields.rs
use serde::{Deserialize, Serialize};
use year_range_filter_shared_kernel::{DomainResult, FieldName};

pub const DEFAULT_BEGIN_FIELD: &str = "beginjaar";
pub const DEFAULT_END_FIELD: &str = "eindjaar";

/// The pair of attributes that bound a record's valid year range.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RangeFields {
    pub begin: FieldName,
    pub end: FieldName,
}

impl RangeFields {
    pub fn new(begin: FieldName, end: FieldName) -> Self {
        Self { begin, end }
    }

    pub fn parse(begin: &str, end: &str) -> DomainResult<Self> {
        Ok(Self {
            begin: FieldName::parse(begin, "begin")?,
            end: FieldName::parse(end, "end")?,
        })
    }

    /// Fields from this pair that are absent from `available`, in begin/end order.
    pub fn missing_from<'a, I>(&self, available: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let available: Vec<&str> = available.into_iter().collect();
        [&self.begin, &self.end]
            .into_iter()
            .filter(|field| !available.contains(&field.as_str()))
            .map(|field| field.to_string())
            .collect()
    }
}

impl Default for RangeFields {
    fn default() -> Self {
        Self {
            begin: FieldName::from_static(DEFAULT_BEGIN_FIELD),
            end: FieldName::from_static(DEFAULT_END_FIELD),
        }
    }
}
