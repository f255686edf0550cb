//! Styling configuration
//!
//! The JSON document the host hands to [`crate::bootstrap`]. Every field is
//! optional; omitted fields take the shipped defaults.
//!
//! ```json
//! {
//!   "initial_theme": "dark",
//!   "breakpoints": [
//!     { "name": "xs", "min_width": 0 },
//!     { "name": "md", "min_width": 500 }
//!   ],
//!   "transition": { "duration_ms": 300, "easing": "ease-out" }
//! }
//! ```

use anyhow::{Context, Result};
use app_state::{RuntimeConfig, TransitionConfig};
use app_ui::theme::{default_themes, Theme, LIGHT};
use app_ui::tokens::{breakpoints, duration, Breakpoint, Easing};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Theme transition settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionSettings {
    /// Transition length in milliseconds
    pub duration_ms: u64,
    /// Easing curve
    pub easing: Easing,
}

impl Default for TransitionSettings {
    fn default() -> Self {
        Self {
            duration_ms: duration::THEME_TRANSITION_MS,
            easing: Easing::default(),
        }
    }
}

/// Startup configuration of the styling runtime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StylingConfig {
    /// Theme active at startup
    pub initial_theme: String,
    /// Breakpoint table, narrowest first
    pub breakpoints: Vec<Breakpoint>,
    /// Registered themes
    pub themes: Vec<Theme>,
    /// Theme transition settings
    pub transition: TransitionSettings,
}

impl Default for StylingConfig {
    fn default() -> Self {
        Self {
            initial_theme: LIGHT.to_string(),
            breakpoints: breakpoints::defaults(),
            themes: default_themes(),
            transition: TransitionSettings::default(),
        }
    }
}

impl StylingConfig {
    /// Parse a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid styling configuration")
    }

    /// Read and parse a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read styling config {}", path.display()))?;
        let config = Self::from_json_str(&text)
            .with_context(|| format!("Failed to parse styling config {}", path.display()))?;

        tracing::debug!(
            path = %path.display(),
            themes = config.themes.len(),
            breakpoints = config.breakpoints.len(),
            "styling config loaded"
        );
        Ok(config)
    }

    /// Serialize as pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize styling configuration")
    }

    /// Convert into the runtime's configuration.
    ///
    /// No validation happens here; [`app_state::StyleRuntime::new`] rejects
    /// bad tables and unknown keys.
    pub fn into_runtime_config(self) -> RuntimeConfig {
        RuntimeConfig {
            themes: self.themes,
            initial_theme: self.initial_theme,
            breakpoints: self.breakpoints,
            transition: TransitionConfig {
                duration: Duration::from_millis(self.transition.duration_ms),
                easing: self.transition.easing,
            },
        }
    }
}
