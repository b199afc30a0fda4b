//! Related-artist discovery on top of the Spotify Web API.
//!
//! The API tier this crate targets has no "related artists" endpoint, so the
//! library synthesizes one from search primitives, and caches per-artist data
//! so repeated lookups stay off the network.
//!
//! # Modules
//!
//! - `spotify` - token handling, authenticated requests and typed catalog calls
//! - `discovery` - related-artist resolution from genre and name search
//! - `management` - the two-tier artist data cache and its durable stores
//! - `search` - debounced free-text artist search
//! - `api` / `server` - local token proxy keeping the client secret server-side
//! - `cli` - command-line front end
//! - `config` - environment-based configuration
//! - `error` - the error taxonomy
//! - `types` - data structures and table rows
//! - `utils` - ranking, dedup and credential helpers
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use artistdig::{config, discovery::RelatedArtistResolver, spotify::CatalogClient};
//!
//! #[tokio::main]
//! async fn main() -> artistdig::Res<()> {
//!     config::load_env().await?;
//!     let settings = config::Settings::from_env()?;
//!     let catalog = Arc::new(CatalogClient::from_settings(&settings)?);
//!     let related = RelatedArtistResolver::new(catalog)
//!         .get_related_artists("4Z8W4fKeB5YxbusRsdQVPb")
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod management;
pub mod search;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::{CatalogError, Result};

/// A convenient Result type alias for top-level glue code.
///
/// Boxed so CLI commands can mix library errors with I/O and formatting
/// errors while keeping Send + Sync for async contexts.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Resolving related artists for {}", artist_id);
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
/// Only for fatal errors in the binary. Library code returns errors instead.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
