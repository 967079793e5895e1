//! CLI module
//!
//! Command-line interface for the photo service.
//!
//! # Commands
//!
//! - `list` - Page through a listing and print photos with signed media URLs
//! - `sign` - Print the authenticated URL for one media path
//! - `config` - Print the resolved configuration

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
