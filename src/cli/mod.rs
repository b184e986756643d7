//! CLI module
//!
//! Command-line interface for the features operations.
//!
//! # Commands
//!
//! - `list-features` - Stream features page by page, optionally stopping early
//! - `get-feature` - Show one feature
//! - `register-feature` - Register a feature for the subscription
//! - `parse-enum` - Look up a value in a known string enumeration

mod commands;
mod runner;

pub use commands::{Cli, Commands, EnumKind, OutputFormat};
pub use runner::Runner;
