// crates/domain/src/interval.rs
use std::fmt;

use serde::{Deserialize, Serialize};
use year_range_filter_shared_kernel::{DomainError, DomainResult};

/// Lowest year the year controls accept by default.
pub const DEFAULT_MIN_YEAR: i64 = 1000;
/// Highest year the year controls accept by default.
pub const DEFAULT_MAX_YEAR: i64 = 3000;
/// Default query start (first cadastral survey year).
pub const DEFAULT_FROM_YEAR: i64 = 1842;
/// Default query end.
pub const DEFAULT_TO_YEAR: i64 = 1900;

/// Query interval `[from, to]`, both inclusive.
///
/// No ordering is enforced: `from > to` is representable and is handled by
/// [`InvertedRangePolicy`](crate::policy::InvertedRangePolicy) at apply time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearInterval {
    pub from: i64,
    pub to: i64,
}

impl YearInterval {
    #[inline]
    pub const fn new(from: i64, to: i64) -> Self {
        Self { from, to }
    }

    #[inline]
    pub const fn is_inverted(self) -> bool {
        self.from > self.to
    }

    /// Returns the interval with its bounds in ascending order.
    #[inline]
    pub const fn normalized(self) -> Self {
        if self.is_inverted() { Self::new(self.to, self.from) } else { self }
    }

    /// Moves both bounds by `delta`; a bound already at the edge of `bounds` stays put.
    pub fn shifted(self, delta: i64, bounds: YearBounds) -> Self {
        Self::new(bounds.step(self.from, delta), bounds.step(self.to, delta))
    }
}

impl Default for YearInterval {
    fn default() -> Self {
        Self::new(DEFAULT_FROM_YEAR, DEFAULT_TO_YEAR)
    }
}

impl fmt::Display for YearInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// Domain accepted by the year controls (spin-box range).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearBounds {
    pub min: i64,
    pub max: i64,
}

impl YearBounds {
    pub fn new(min: i64, max: i64) -> DomainResult<Self> {
        let bounds = Self { min, max };
        bounds.validate()?;
        Ok(bounds)
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.min > self.max {
            return Err(DomainError::RangeValidation {
                field: "year bounds".to_string(),
                min: self.min.to_string(),
                max: self.max.to_string(),
            });
        }
        Ok(())
    }

    #[inline]
    pub fn contains(&self, year: i64) -> bool {
        (self.min..=self.max).contains(&year)
    }

    #[inline]
    pub fn clamp(&self, year: i64) -> i64 {
        year.clamp(self.min, self.max)
    }

    pub fn clamp_interval(&self, interval: YearInterval) -> YearInterval {
        YearInterval::new(self.clamp(interval.from), self.clamp(interval.to))
    }

    fn step(&self, year: i64, delta: i64) -> i64 {
        if (delta > 0 && year >= self.max) || (delta < 0 && year <= self.min) {
            return year;
        }
        self.clamp(year.saturating_add(delta))
    }
}

impl Default for YearBounds {
    fn default() -> Self {
        Self { min: DEFAULT_MIN_YEAR, max: DEFAULT_MAX_YEAR }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_swaps_only_inverted() {
        assert_eq!(YearInterval::new(1900, 1842).normalized(), YearInterval::new(1842, 1900));
        assert_eq!(YearInterval::new(1842, 1900).normalized(), YearInterval::new(1842, 1900));
    }

    #[test]
    fn shift_stops_each_bound_at_its_edge() {
        let bounds = YearBounds::default();
        let up = YearInterval::new(2999, 3000).shifted(1, bounds);
        assert_eq!(up, YearInterval::new(3000, 3000));

        let down = YearInterval::new(1000, 1001).shifted(-1, bounds);
        assert_eq!(down, YearInterval::new(1000, 1000));
    }

    #[test]
    fn shift_moves_both_bounds() {
        let shifted = YearInterval::default().shifted(1, YearBounds::default());
        assert_eq!(shifted, YearInterval::new(1843, 1901));
    }

    #[test]
    fn bounds_reject_inverted_domain() {
        assert!(YearBounds::new(3000, 1000).is_err());
        assert!(YearBounds::new(1000, 1000).is_ok());
    }

    #[test]
    fn clamp_interval_pulls_into_domain() {
        let bounds = YearBounds::default();
        assert_eq!(
            bounds.clamp_interval(YearInterval::new(500, 5000)),
            YearInterval::new(1000, 3000)
        );
    }

    #[test]
    fn display_uses_dash() {
        assert_eq!(YearInterval::new(1842, 1900).to_string(), "1842-1900");
    }
}
