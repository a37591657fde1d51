//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Resolves configuration and merges CLI flags over it
//! 2. Calls into the loader or core modules
//! 3. Formats and displays output
//!
//! Handlers own no loading logic themselves.

mod classify;
mod completion;
mod config_cmd;
mod load;

// Re-export command functions for testing and direct invocation
pub use classify::classify;
pub use completion::completion;
pub use config_cmd::show as config_show;
pub use load::load;

use crate::cli::args::{Command, ConfigAction};
use crate::cli::Context;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Load(args) => load::load(ctx, &args),
        Command::Classify {
            identities,
            dir,
            json,
        } => classify::classify(ctx, &identities, dir.as_deref(), json),
        Command::Config { action } => match action {
            ConfigAction::Show { dir } => config_cmd::show(ctx, dir.as_deref()),
        },
        Command::Completion { shell } => completion::completion(shell),
    }
}
