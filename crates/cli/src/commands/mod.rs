//! Subcommand implementations.
//!
//! Results are reported through `tracing` at info level.

pub mod account;
pub mod admin;
pub mod catalog;
pub mod deposits;
pub mod orders;
pub mod seed;
