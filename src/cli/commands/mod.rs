//! CLI command handlers for `gradebook`.
//!
//! Each command is implemented in its own submodule.

pub mod config;
pub mod policy;
