//! CLI module for reel.
//!
//! The CLI dispatcher should be called early in main() to handle
//! informational flags before initializing the TUI:
//!
//! ```ignore
//! use reel::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args())?;
//! let Some(options) = run_cli_command(command) else {
//!     return Ok(());
//! };
//! // continue to TUI with `options`
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, CliCommand, RunOptions};
pub use version::{version_string, USAGE, VERSION};

/// Run informational commands.
///
/// Returns the run options when the TUI should start, `None` when the
/// command was handled here.
pub fn run_cli_command(command: CliCommand) -> Option<RunOptions> {
    match command {
        CliCommand::Version => {
            println!("{}", version_string());
            None
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            None
        }
        CliCommand::Run(options) => Some(options),
    }
}
