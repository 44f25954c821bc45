//! Command-line argument parsing for reel.
//!
//! This module handles parsing command-line arguments and determining
//! which CLI command to execute.

use std::path::PathBuf;

use crate::error::ConfigError;

/// Options for running the TUI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunOptions {
    /// Overrides the data directory from config and environment
    pub data_dir: Option<PathBuf>,
    /// Config file to load instead of the default location
    pub config: Option<PathBuf>,
    /// Open directly on the episodes of this series
    pub series: Option<String>,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Run the TUI application (default)
    Run(RunOptions),
}

/// Parse command-line arguments and return the appropriate command.
///
/// `--version` and `--help` win over everything else. Both `--flag value`
/// and `--flag=value` are accepted.
///
/// # Examples
///
/// ```
/// use reel::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["reel".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()).unwrap(), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ConfigError>
where
    I: Iterator<Item = String>,
{
    let mut options = RunOptions::default();
    // Skip the program name
    let mut args = args.skip(1);
    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };
        let mut value = |name: &str| -> Result<String, ConfigError> {
            inline
                .clone()
                .or_else(|| args.next())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ConfigError::MissingValue(name.to_string()))
        };
        match flag.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--data-dir" => options.data_dir = Some(PathBuf::from(value("--data-dir")?)),
            "--config" => options.config = Some(PathBuf::from(value("--config")?)),
            "--series" => options.series = Some(value("--series")?),
            _ => return Err(ConfigError::UnknownArgument(arg)),
        }
    }
    Ok(CliCommand::Run(options))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliCommand, ConfigError> {
        let args: Vec<String> = std::iter::once("reel")
            .chain(args.iter().copied())
            .map(str::to_string)
            .collect();
        parse_args(args.into_iter())
    }

    #[test]
    fn test_no_args_runs_tui() {
        assert_eq!(parse(&[]).unwrap(), CliCommand::Run(RunOptions::default()));
    }

    #[test]
    fn test_parse_version_flags() {
        assert_eq!(parse(&["--version"]).unwrap(), CliCommand::Version);
        assert_eq!(parse(&["-V"]).unwrap(), CliCommand::Version);
        assert_eq!(parse(&["--data-dir", "/tmp", "-V"]).unwrap(), CliCommand::Version);
    }

    #[test]
    fn test_parse_help_flag() {
        assert_eq!(parse(&["-h"]).unwrap(), CliCommand::Help);
    }

    #[test]
    fn test_parse_run_options() {
        let command = parse(&["--data-dir", "/media/reel", "--config=/etc/reel.json", "--series", "s-1"]).unwrap();
        assert_eq!(
            command,
            CliCommand::Run(RunOptions {
                data_dir: Some(PathBuf::from("/media/reel")),
                config: Some(PathBuf::from("/etc/reel.json")),
                series: Some("s-1".to_string()),
            })
        );
    }

    #[test]
    fn test_missing_value() {
        let err = parse(&["--series"]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingValue(ref flag) if flag == "--series"));
    }

    #[test]
    fn test_unknown_argument() {
        let err = parse(&["--sync"]).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownArgument(ref arg) if arg == "--sync"));
    }
}
