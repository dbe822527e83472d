// crates/usecase/src/dto.rs
use chrono::{DateTime, Local};
use serde::Serialize;
use year_range_filter_domain::{RangeWarning, SubsetPredicate, YearInterval};
use year_range_filter_shared_kernel::FeatureCount;

/// What happened when a year filter was installed on a layer.
#[derive(Debug, Clone, Serialize)]
pub struct ApplyOutcome {
    pub layer: String,
    pub predicate: SubsetPredicate,
    /// Interval the predicate was built from, after the inverted-range policy.
    pub interval: YearInterval,
    pub matched: FeatureCount,
    pub skipped: FeatureCount,
    pub warning: Option<RangeWarning>,
    pub applied_at: DateTime<Local>,
}

impl ApplyOutcome {
    /// Status line in the style of the host message bar.
    pub fn message(&self) -> String {
        format!("Filter applied to layer '{}': {} features match.", self.layer, self.matched)
    }
}

/// What happened when the subset filter was removed.
#[derive(Debug, Clone, Serialize)]
pub struct ResetOutcome {
    pub layer: String,
    pub visible: FeatureCount,
}

impl ResetOutcome {
    pub fn message(&self) -> String {
        format!("Filter reset for layer: {}", self.layer)
    }
}
