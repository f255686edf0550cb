//! Podcast client styling shell
//!
//! Host-side glue around the styling runtime: configuration loading,
//! logging setup, screen styles and the startup call that installs the
//! process-wide runtime.
//!
//! # Startup
//!
//! ```rust,no_run
//! use podcast_app::{bootstrap, config::StylingConfig, logging};
//!
//! logging::init_logging("info");
//! let runtime = bootstrap(StylingConfig::load("styling.json")?)?;
//! runtime.on_viewport_resize(390.0);
//! # Ok::<(), anyhow::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod logging;
pub mod screens;

use anyhow::{Context, Result};
use app_state::{global, StyleRuntime};
use config::StylingConfig;
use std::sync::Arc;

pub use app_state;
pub use app_ui;

/// Validate `config` and install it as the process-wide runtime.
///
/// Fails on a malformed breakpoint table, an unknown initial theme or a
/// second call without [`app_state::global::reset`].
pub fn bootstrap(config: StylingConfig) -> Result<Arc<StyleRuntime>> {
    let runtime = global::init(config.into_runtime_config())
        .context("Failed to start the styling runtime")?;
    tracing::info!(
        theme = %runtime.active_key(),
        breakpoints = runtime.breakpoints().entries().len(),
        "styling ready"
    );
    Ok(runtime)
}
