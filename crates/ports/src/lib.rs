// crates/ports/src/lib.rs
//! # Ports
//!
//! Interface definitions for the collaborators the filter talks to.
//!
//! - [`layers`]: the host's layer collection, selection, and subset filtering
//! - [`diagnostics`]: an injected observer for log messages
//!
//! These ports allow the domain and application layers to remain
//! independent of a specific host application.

#![allow(clippy::multiple_crate_versions)]

pub mod diagnostics;
pub mod layers;
