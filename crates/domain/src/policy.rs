// crates/domain/src/policy.rs
use std::fmt;

use serde::{Deserialize, Serialize};
use year_range_filter_shared_kernel::{DomainError, DomainResult};

use crate::interval::YearInterval;

/// What to do when the query interval has `from > to`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvertedRangePolicy {
    /// Warn and build the predicate with the bounds exactly as given.
    /// The overlap test is then usually unsatisfiable and matches nothing.
    #[default]
    Literal,
    /// Warn and swap the bounds before building the predicate.
    Swap,
    /// Refuse with [`DomainError::InvalidRange`].
    Reject,
}

impl InvertedRangePolicy {
    pub fn resolve(self, interval: YearInterval) -> DomainResult<ResolvedInterval> {
        if !interval.is_inverted() {
            return Ok(ResolvedInterval { interval, warning: None });
        }

        let (from, to) = (interval.from, interval.to);
        match self {
            Self::Literal => Ok(ResolvedInterval {
                interval,
                warning: Some(RangeWarning::Inverted { from, to }),
            }),
            Self::Swap => Ok(ResolvedInterval {
                interval: interval.normalized(),
                warning: Some(RangeWarning::Swapped { from, to }),
            }),
            Self::Reject => Err(DomainError::InvalidRange { from, to }),
        }
    }
}

impl fmt::Display for InvertedRangePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Literal => "literal",
            Self::Swap => "swap",
            Self::Reject => "reject",
        })
    }
}

/// Interval after the policy ran, plus the non-fatal warning the caller should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedInterval {
    pub interval: YearInterval,
    pub warning: Option<RangeWarning>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RangeWarning {
    /// Kept as given; likely yields zero matches.
    Inverted { from: i64, to: i64 },
    /// Bounds were exchanged.
    Swapped { from: i64, to: i64 },
}

impl fmt::Display for RangeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inverted { from, to } => write!(
                f,
                "From year ({from}) is greater than to year ({to}); the filter may match nothing"
            ),
            Self::Swapped { from, to } => write!(
                f,
                "From year ({from}) is greater than to year ({to}); using {to}-{from} instead"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INVERTED: YearInterval = YearInterval::new(1900, 1842);

    #[test]
    fn ordered_interval_passes_untouched() {
        for policy in [InvertedRangePolicy::Literal, InvertedRangePolicy::Swap, InvertedRangePolicy::Reject] {
            let resolved = policy.resolve(YearInterval::new(1842, 1900)).unwrap();
            assert_eq!(resolved.interval, YearInterval::new(1842, 1900));
            assert!(resolved.warning.is_none());
        }
    }

    #[test]
    fn literal_keeps_bounds_and_warns() {
        let resolved = InvertedRangePolicy::Literal.resolve(INVERTED).unwrap();
        assert_eq!(resolved.interval, INVERTED);
        assert_eq!(resolved.warning, Some(RangeWarning::Inverted { from: 1900, to: 1842 }));
    }

    #[test]
    fn swap_normalizes_and_warns() {
        let resolved = InvertedRangePolicy::Swap.resolve(INVERTED).unwrap();
        assert_eq!(resolved.interval, YearInterval::new(1842, 1900));
        assert!(matches!(resolved.warning, Some(RangeWarning::Swapped { .. })));
    }

    #[test]
    fn reject_fails() {
        assert_eq!(
            InvertedRangePolicy::Reject.resolve(INVERTED),
            Err(DomainError::InvalidRange { from: 1900, to: 1842 })
        );
    }

    #[test]
    fn equal_bounds_are_not_inverted() {
        let resolved = InvertedRangePolicy::Reject.resolve(YearInterval::new(1870, 1870)).unwrap();
        assert!(resolved.warning.is_none());
    }

    #[test]
    fn policy_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&InvertedRangePolicy::Swap).unwrap(), "\"swap\"");
    }
}
