//! RecordRecs Library
//!
//! Turns a listener's most recently saved Spotify albums into discovery album
//! recommendations. The engine reads five seed albums, averages their audio features,
//! asks Spotify for recommendations steered by those averages, and samples a few
//! distinct full-length albums per seed.
//!
//! # Modules
//!
//! - `api` - HTTP handlers of the web app (login, callback, recommendations)
//! - `cli` - Command-line entry points (`serve`, `recs`)
//! - `config` - Configuration management and environment variables
//! - `error` - Error taxonomy and the outcomes shown to the user
//! - `management` - Session store and the credential handed to the engine
//! - `recommend` - The recommendation traversal engine
//! - `server` - Router and server bootstrap
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod recommend;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for host plumbing that may fail in many ways.
///
/// Uses a boxed dynamic error with Send + Sync bounds so it can cross `.await`
/// points and task boundaries.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for unrecoverable errors at the binary entry point. Library and handler code
/// must return errors instead.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues, such as a seed album that had to be skipped.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
