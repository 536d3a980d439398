//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the storyteller binary.

mod commands;
mod run;
mod serve;
mod status;
mod voices;

pub use commands::{Cli, Commands};
pub use run::run_story;
pub use serve::serve_command;
pub use status::task_status;
pub use voices::list_voices;
