//! CLI command handlers for `TeachPricing`.
//!
//! Each command is implemented in its own submodule.

pub mod catalog;
pub mod config;
pub mod proposal;
pub mod quote;
