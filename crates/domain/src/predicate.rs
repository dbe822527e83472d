// crates/domain/src/predicate.rs
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{fields::RangeFields, interval::YearInterval};

/// Declarative filter expression in the host's subset-string grammar.
///
/// An empty predicate means "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubsetPredicate(String);

impl SubsetPredicate {
    /// `"<begin>" <= <to> AND "<end>" >= <from>`.
    ///
    /// Field names are quoted verbatim. Quotes inside a name are not escaped, so a
    /// hostile name can change the meaning of the expression; callers that accept
    /// free-text names own that risk.
    pub fn year_overlap(fields: &RangeFields, interval: YearInterval) -> Self {
        Self(format!(
            "{} <= {} AND {} >= {}",
            quote_identifier(fields.begin.as_str()),
            interval.to,
            quote_identifier(fields.end.as_str()),
            interval.from,
        ))
    }

    /// Predicate that removes any subset filter.
    pub fn cleared() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

fn quote_identifier(name: &str) -> String {
    format!("\"{name}\"")
}

impl fmt::Display for SubsetPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SubsetPredicate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_reference_expression() {
        let predicate =
            SubsetPredicate::year_overlap(&RangeFields::default(), YearInterval::new(1842, 1900));
        assert_eq!(predicate.as_str(), r#""beginjaar" <= 1900 AND "eindjaar" >= 1842"#);
    }

    #[test]
    fn inverted_bounds_are_inserted_literally() {
        let predicate =
            SubsetPredicate::year_overlap(&RangeFields::default(), YearInterval::new(1900, 1842));
        assert_eq!(predicate.as_str(), r#""beginjaar" <= 1842 AND "eindjaar" >= 1900"#);
    }

    #[test]
    fn names_are_not_escaped() {
        let fields = RangeFields::parse("we\"ird", "end year").unwrap();
        let predicate = SubsetPredicate::year_overlap(&fields, YearInterval::new(1, 2));
        assert_eq!(predicate.as_str(), r#""we"ird" <= 2 AND "end year" >= 1"#);
    }

    #[test]
    fn cleared_is_empty() {
        assert!(SubsetPredicate::cleared().is_empty());
        assert_eq!(SubsetPredicate::cleared().as_str(), "");
    }
}
