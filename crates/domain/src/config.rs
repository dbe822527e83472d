// crates/domain/src/config.rs
use serde::{Deserialize, Serialize};
use year_range_filter_shared_kernel::DomainResult;

use crate::{
    fields::RangeFields,
    interval::{YearBounds, YearInterval},
    policy::InvertedRangePolicy,
};

/// Resolved settings for a filter session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    pub fields: RangeFields,
    /// When `false` the field names are fixed to `fields` for the whole session.
    pub fields_editable: bool,
    pub bounds: YearBounds,
    pub initial: YearInterval,
    pub inverted_policy: InvertedRangePolicy,
}

impl FilterSettings {
    pub fn validate(&self) -> DomainResult<()> {
        self.bounds.validate()
    }

    /// Initial interval pulled into `bounds`.
    pub fn initial_interval(&self) -> YearInterval {
        self.bounds.clamp_interval(self.initial)
    }
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            fields: RangeFields::default(),
            fields_editable: false,
            bounds: YearBounds::default(),
            initial: YearInterval::default(),
            inverted_policy: InvertedRangePolicy::default(),
        }
    }
}
