//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the likeness binary.

mod commands;
mod generate;
mod media;
mod output;
mod profile;

pub use commands::{Cli, Commands, OutputFormat, ProfileCommands};
pub use generate::{GenerateOptions, analyze, generate, identity, quality, refine, validate};
pub use profile::{emotions, flags, handle_profile_command};
