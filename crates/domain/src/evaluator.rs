// crates/domain/src/evaluator.rs
//! Year-range overlap filter.
//!
//! A record with range `[begin, end]` overlaps the query `[from, to]` iff
//! `begin <= to && end >= from`. The same test is available as a host predicate
//! string ([`RangeFilter::predicate`]) and as direct evaluation over in-memory
//! records ([`RangeFilter::matches`]).

use year_range_filter_shared_kernel::DomainResult;

use crate::{
    fields::RangeFields,
    interval::YearInterval,
    policy::{InvertedRangePolicy, RangeWarning},
    predicate::SubsetPredicate,
    record::Record,
};

/// Interval overlap test on already-coerced values.
#[inline]
pub const fn overlaps(begin: i64, end: i64, interval: YearInterval) -> bool {
    begin <= interval.to && end >= interval.from
}

/// Builds the host predicate for the given field names and bounds.
pub fn predicate(
    begin_field: &str,
    end_field: &str,
    from_year: i64,
    to_year: i64,
) -> DomainResult<SubsetPredicate> {
    let fields = RangeFields::parse(begin_field, end_field)?;
    Ok(RangeFilter::new(fields, YearInterval::new(from_year, to_year)).predicate())
}

/// Evaluates the overlap test directly against `record`.
pub fn matches<R: Record + ?Sized>(
    record: &R,
    begin_field: &str,
    end_field: &str,
    from_year: i64,
    to_year: i64,
) -> DomainResult<bool> {
    let fields = RangeFields::parse(begin_field, end_field)?;
    RangeFilter::new(fields, YearInterval::new(from_year, to_year)).matches(record)
}

/// A ready-to-use filter: field names plus the (possibly inverted) interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeFilter {
    fields: RangeFields,
    interval: YearInterval,
}

/// A filter together with the warning raised while resolving its interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFilter {
    pub filter: RangeFilter,
    pub warning: Option<RangeWarning>,
}

impl RangeFilter {
    pub fn new(fields: RangeFields, interval: YearInterval) -> Self {
        Self { fields, interval }
    }

    /// Resolves `interval` through `policy` and builds the filter.
    pub fn plan(
        fields: RangeFields,
        interval: YearInterval,
        policy: InvertedRangePolicy,
    ) -> DomainResult<PlannedFilter> {
        let resolved = policy.resolve(interval)?;
        Ok(PlannedFilter { filter: Self::new(fields, resolved.interval), warning: resolved.warning })
    }

    pub fn fields(&self) -> &RangeFields {
        &self.fields
    }

    pub fn interval(&self) -> YearInterval {
        self.interval
    }

    pub fn predicate(&self) -> SubsetPredicate {
        SubsetPredicate::year_overlap(&self.fields, self.interval)
    }

    /// `false` when either field is absent; an error when either is malformed.
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> DomainResult<bool> {
        let begin = record.optional_int(self.fields.begin.as_str())?;
        let end = record.optional_int(self.fields.end.as_str())?;
        Ok(match (begin, end) {
            (Some(begin), Some(end)) => overlaps(begin, end, self.interval),
            _ => false,
        })
    }

    /// Records that match, in input order. Stops at the first malformed value.
    pub fn select<'a, R: Record>(&self, records: &'a [R]) -> DomainResult<Vec<&'a R>> {
        let mut selected = Vec::new();
        for record in records {
            if self.matches(record)? {
                selected.push(record);
            }
        }
        Ok(selected)
    }

    /// Number of matching records. Stops at the first malformed value.
    pub fn count<'a, R, I>(&self, records: I) -> DomainResult<usize>
    where
        R: Record + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        records.into_iter().try_fold(0usize, |acc, record| {
            Ok(if self.matches(record)? { acc + 1 } else { acc })
        })
    }
}

#[cfg(test)]
mod tests {
    use year_range_filter_shared_kernel::DomainError;

    use super::*;
    use crate::record::{AttributeMap, AttributeValue};

    fn record(begin: Option<i64>, end: Option<i64>) -> AttributeMap {
        let mut attrs = AttributeMap::new();
        if let Some(b) = begin {
            attrs.insert("beginjaar".into(), b.into());
        }
        if let Some(e) = end {
            attrs.insert("eindjaar".into(), e.into());
        }
        attrs
    }

    fn query(from: i64, to: i64) -> RangeFilter {
        RangeFilter::new(RangeFields::default(), YearInterval::new(from, to))
    }

    #[test]
    fn predicate_matches_reference_string() {
        let predicate = predicate("beginjaar", "eindjaar", 1842, 1900).unwrap();
        assert_eq!(predicate.as_str(), r#""beginjaar" <= 1900 AND "eindjaar" >= 1842"#);
    }

    #[test]
    fn predicate_rejects_empty_field() {
        assert_eq!(
            predicate("", "eindjaar", 1842, 1900),
            Err(DomainError::EmptyFieldName { role: "begin".into() })
        );
    }

    #[test]
    fn interval_relations_truth_table() {
        let filter = query(1850, 1900);
        let cases = [
            ("disjoint before", 1800, 1849, false),
            ("disjoint after", 1901, 1950, false),
            ("exact match", 1850, 1900, true),
            ("partial overlap left", 1820, 1860, true),
            ("partial overlap right", 1880, 1920, true),
            ("record contains query", 1800, 1950, true),
            ("query contains record", 1860, 1870, true),
            ("touching start", 1800, 1850, true),
            ("touching end", 1900, 1990, true),
        ];
        for (name, begin, end, expected) in cases {
            assert_eq!(
                filter.matches(&record(Some(begin), Some(end))).unwrap(),
                expected,
                "{name}"
            );
        }
    }

    #[test]
    fn missing_field_never_matches() {
        let filter = query(1000, 3000);
        assert!(!filter.matches(&record(None, Some(1900))).unwrap());
        assert!(!filter.matches(&record(Some(1842), None)).unwrap());
        assert!(!filter.matches(&record(None, None)).unwrap());
    }

    #[test]
    fn malformed_value_is_reported() {
        let mut attrs = record(None, Some(1900));
        attrs.insert("beginjaar".into(), AttributeValue::from("onbekend"));
        let err = query(1842, 1900).matches(&attrs).unwrap_err();
        assert!(matches!(err, DomainError::MalformedValue { ref field, .. } if field == "beginjaar"));
    }

    #[test]
    fn inverted_literal_interval_matches_nothing_contained() {
        let filter = query(1900, 1842);
        assert!(!filter.matches(&record(Some(1860), Some(1870))).unwrap());
    }

    #[test]
    fn plan_applies_policy() {
        let planned = RangeFilter::plan(
            RangeFields::default(),
            YearInterval::new(1900, 1842),
            InvertedRangePolicy::Swap,
        )
        .unwrap();
        assert_eq!(planned.filter.interval(), YearInterval::new(1842, 1900));
        assert!(planned.warning.is_some());
    }

    #[test]
    fn select_and_count_keep_order() {
        let records = vec![
            record(Some(1800), Some(1820)),
            record(Some(1840), Some(1850)),
            record(None, Some(1870)),
            record(Some(1890), Some(1950)),
        ];
        let filter = query(1842, 1900);
        let selected = filter.select(&records).unwrap();
        assert_eq!(selected.len(), 2);
        assert!(std::ptr::eq(selected[0], &records[1]));
        assert!(std::ptr::eq(selected[1], &records[3]));
        assert_eq!(filter.count(&records).unwrap(), 2);
    }

    #[test]
    fn free_matches_uses_given_names() {
        let mut attrs = AttributeMap::new();
        attrs.insert("van".into(), 1850.into());
        attrs.insert("tot".into(), 1860.into());
        assert!(matches(&attrs, "van", "tot", 1855, 1855).unwrap());
        assert!(!matches(&attrs, "beginjaar", "eindjaar", 1855, 1855).unwrap());
    }
}
