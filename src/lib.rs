// src/lib.rs
pub mod app;
pub mod cli;
pub mod presentation;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
