//! Spotify Top Tracks Library
//!
//! This library authorizes a user against Spotify with an interactive OAuth
//! handshake and turns the user's top tracks (or the track listing of a fixed
//! album) into a flat list of records ready for display.
//!
//! # Modules
//!
//! - `api` - HTTP handler for the OAuth redirect callback
//! - `cli` - Command-line rendering of the track list
//! - `config` - Configuration structure and environment loading
//! - `error` - Error types for configuration, authorization and fetching
//! - `management` - The auth flow controller and its observable session state
//! - `server` - Short-lived local HTTP listener for the OAuth redirect
//! - `spotify` - Spotify authorization and track endpoints
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use toptracks::{config, management::AuthFlowController};
//!
//! #[tokio::main]
//! async fn main() -> toptracks::Res<()> {
//!     config::load_env().await?;
//!     let config = config::AuthConfig::from_env()?;
//!     let controller = AuthFlowController::from_config(&config);
//!     controller.trigger_auth().await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used at the outer edges of the application (startup, CLI plumbing) where
/// the concrete error type does not matter. Keeps Send + Sync bounds for
/// async contexts.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Opening the Spotify consent page...");
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Loaded {} tracks", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for the binary's startup path. The authorization and fetch flow
/// never exits the process; it reports through [`warning!`] and state instead.
///
/// # Example
///
/// ```
/// error!("Cannot load configuration. Err: {}", e);
/// // Program exits here
/// ```
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
/// Used for recoverable failures: a cancelled consent page, a failed token
/// exchange, a rejected track request.
///
/// # Example
///
/// ```
/// warning!("Track request failed: {}", e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
