//! # Use Cases
//!
//! Application-level orchestration logic.
//!
//! This crate coordinates domain logic and host ports:
//!
//! - [`session`]: the year-filter session (what the dialog drives)
//! - [`dto`]: outcomes returned to the presentation layer
//!
//! Use cases depend on both domain and ports, but not on infrastructure.

#![allow(clippy::multiple_crate_versions)]

pub mod dto;
pub mod session;

pub use dto::{ApplyOutcome, ResetOutcome};
pub use session::YearFilterSession;
