//! # CLI Module
//!
//! User-facing commands of artistdig. Each command wires the library pieces
//! it needs from [`crate::config::Settings`], shows a spinner while the
//! network is busy and prints results as tables.
//!
//! ## Commands
//!
//! - [`search`] - debounced free-text artist search
//! - [`artist`] - image URL and top-track ids through the artist cache
//! - [`related`] - ranked related artists for a seed artist
//! - [`serve`] - local token proxy holding the client secret
//!
//! ## Error Handling
//!
//! Fatal errors (missing configuration, failed seed lookup, rejected
//! credentials) end the process through the `error!` macro with a readable
//! message. Degraded lookups are reported by the library through `log` and
//! the command still prints what it has.
//!
//! ## Usage Patterns
//!
//! ```bash
//! artistdig search "Radiohead"
//! artistdig artist 4Z8W4fKeB5YxbusRsdQVPb
//! artistdig related 4Z8W4fKeB5YxbusRsdQVPb
//! artistdig serve
//! ```

use std::{sync::Arc, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{config::Settings, error, spotify::CatalogClient};

mod artist;
mod related;
mod search;
mod serve;

pub use artist::artist;
pub use related::related;
pub use search::search;
pub use serve::serve;

fn settings() -> Settings {
    match Settings::from_env() {
        Ok(s) => s,
        Err(e) => error!("Cannot load settings. Err: {}", e),
    }
}

fn catalog(settings: &Settings) -> Arc<CatalogClient> {
    match CatalogClient::from_settings(settings) {
        Ok(c) => Arc::new(c),
        Err(e) => error!("Cannot build catalog client. Err: {}", e),
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
