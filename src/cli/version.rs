//! Version and usage output for reel.

/// The current version of reel, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const USAGE: &str = "\
Usage: reel [OPTIONS]

Browse, play and delete downloaded movies and series.

Options:
      --data-dir <DIR>   Directory holding downloads.json and the media files
      --config <FILE>    Config file (default: <config dir>/reel/config.json)
      --series <ID>      Open on the episodes of one series
  -h, --help             Print this help
  -V, --version          Print version

Environment:
  REEL_DATA_DIR          Same as --data-dir
  REEL_LOG               Log filter, e.g. \"reel=debug\"";

pub fn version_string() -> String {
    format!("reel {}", VERSION)
}
