// crates/infra/src/lib.rs
#![allow(clippy::multiple_crate_versions)]

pub mod diagnostics;
pub mod layer;
pub mod persistence;
pub mod project;
pub mod subset;

pub use diagnostics::{LogDiagnostics, MemoryDiagnostics};
pub use layer::{Feature, MemoryLayer};
pub use persistence::{load_layer, load_settings, parse_layer};
pub use project::MemoryProject;
pub use subset::{CompiledSubset, Verdict};
