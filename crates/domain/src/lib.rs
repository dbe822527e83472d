// crates/domain/src/lib.rs
//! # Domain
//!
//! Year-range filtering rules, free of any host or I/O concern.
//!
//! - [`interval`]: query interval and the accepted year domain
//! - [`fields`]: the begin/end attribute pair
//! - [`policy`]: handling of inverted intervals
//! - [`record`]: attribute values and the [`Record`] capability
//! - [`predicate`]: host subset-string predicate
//! - [`evaluator`]: [`RangeFilter`], the overlap test in both forms
//! - [`config`]: session settings

#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod evaluator;
pub mod fields;
pub mod interval;
pub mod policy;
pub mod predicate;
pub mod record;

pub use config::FilterSettings;
pub use evaluator::{PlannedFilter, RangeFilter, matches, overlaps, predicate};
pub use fields::RangeFields;
pub use interval::{YearBounds, YearInterval};
pub use policy::{InvertedRangePolicy, RangeWarning, ResolvedInterval};
pub use predicate::SubsetPredicate;
pub use record::{AttributeMap, AttributeValue, Record};
