//! Design tokens for the podcast client
//!
//! This module provides the breakpoint table, animation durations and
//! easing curves used by the styling runtime.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Breakpoint Tokens
// =============================================================================

/// Name of a viewport-width range (e.g. `"md"`)
pub type BreakpointName = String;

/// A named lower bound on viewport width
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    /// Breakpoint name
    pub name: BreakpointName,
    /// Smallest width (inclusive) that selects this breakpoint
    pub min_width: f32,
}

impl Breakpoint {
    /// Create a breakpoint
    pub fn new(name: impl Into<BreakpointName>, min_width: f32) -> Self {
        Self {
            name: name.into(),
            min_width,
        }
    }
}

/// Malformed breakpoint table
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BreakpointConfigError {
    /// No breakpoints were supplied
    #[error("Breakpoint table is empty")]
    Empty,

    /// The first breakpoint does not start at width 0
    #[error("First breakpoint {name:?} must start at 0 (got {min_width})")]
    MissingZeroThreshold {
        /// Name of the first breakpoint
        name: String,
        /// Its threshold
        min_width: f32,
    },

    /// Thresholds are not strictly increasing
    #[error("Breakpoint {name:?} ({min_width}) does not exceed {previous:?} ({previous_min_width})")]
    NotIncreasing {
        /// Offending breakpoint
        name: String,
        /// Its threshold
        min_width: f32,
        /// The breakpoint before it
        previous: String,
        /// The previous threshold
        previous_min_width: f32,
    },

    /// A threshold is negative, infinite or NaN
    #[error("Breakpoint {0:?} has an invalid threshold")]
    InvalidThreshold(String),

    /// A breakpoint has an empty name
    #[error("Breakpoint names must not be empty")]
    EmptyName,

    /// Two breakpoints share a name
    #[error("Duplicate breakpoint name: {0}")]
    DuplicateName(String),
}

/// Validated, ascending table of breakpoints
///
/// The first entry always starts at 0, so every width resolves to exactly
/// one breakpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakpointTable {
    entries: Vec<Breakpoint>,
}

impl BreakpointTable {
    /// Validate and build a table
    pub fn new(entries: Vec<Breakpoint>) -> Result<Self, BreakpointConfigError> {
        let first = entries.first().ok_or(BreakpointConfigError::Empty)?;
        if first.min_width != 0.0 {
            return Err(BreakpointConfigError::MissingZeroThreshold {
                name: first.name.clone(),
                min_width: first.min_width,
            });
        }

        for (i, bp) in entries.iter().enumerate() {
            if bp.name.is_empty() {
                return Err(BreakpointConfigError::EmptyName);
            }
            if !bp.min_width.is_finite() || bp.min_width < 0.0 {
                return Err(BreakpointConfigError::InvalidThreshold(bp.name.clone()));
            }
            if entries[..i].iter().any(|other| other.name == bp.name) {
                return Err(BreakpointConfigError::DuplicateName(bp.name.clone()));
            }
            if let Some(previous) = i.checked_sub(1).map(|p| &entries[p]) {
                if bp.min_width <= previous.min_width {
                    return Err(BreakpointConfigError::NotIncreasing {
                        name: bp.name.clone(),
                        min_width: bp.min_width,
                        previous: previous.name.clone(),
                        previous_min_width: previous.min_width,
                    });
                }
            }
        }

        Ok(Self { entries })
    }

    /// Build a table from `(name, min_width)` pairs
    pub fn from_pairs<N: Into<BreakpointName>>(
        pairs: impl IntoIterator<Item = (N, f32)>,
    ) -> Result<Self, BreakpointConfigError> {
        Self::new(
            pairs
                .into_iter()
                .map(|(name, min_width)| Breakpoint::new(name, min_width))
                .collect(),
        )
    }

    /// Resolve a viewport width to its breakpoint.
    ///
    /// Picks the entry with the greatest `min_width <= width`. Negative and
    /// NaN widths resolve like 0.
    pub fn resolve(&self, width: f32) -> &Breakpoint {
        let width = if width >= 0.0 { width } else { 0.0 };
        let upper = self.entries.partition_point(|bp| bp.min_width <= width);
        // upper >= 1 because the first threshold is 0
        &self.entries[upper.saturating_sub(1)]
    }

    /// Look up a breakpoint by name
    pub fn get(&self, name: &str) -> Option<&Breakpoint> {
        self.entries.iter().find(|bp| bp.name == name)
    }

    /// Position of a breakpoint in the table (0 = narrowest)
    pub fn rank(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|bp| bp.name == name)
    }

    /// All breakpoints, narrowest first
    pub fn entries(&self) -> &[Breakpoint] {
        &self.entries
    }
}

impl Default for BreakpointTable {
    fn default() -> Self {
        Self {
            entries: breakpoints::defaults(),
        }
    }
}

/// Default breakpoint thresholds
pub mod breakpoints {
    use super::Breakpoint;

    /// Extra small (0px)
    pub const XS: f32 = 0.0;
    /// Small (300px)
    pub const SM: f32 = 300.0;
    /// Medium (500px)
    pub const MD: f32 = 500.0;
    /// Large (800px)
    pub const LG: f32 = 800.0;
    /// Extra large (1200px)
    pub const XL: f32 = 1200.0;

    /// The default table entries
    pub fn defaults() -> Vec<Breakpoint> {
        vec![
            Breakpoint::new("xs", XS),
            Breakpoint::new("sm", SM),
            Breakpoint::new("md", MD),
            Breakpoint::new("lg", LG),
            Breakpoint::new("xl", XL),
        ]
    }
}

// =============================================================================
// Animation Tokens
// =============================================================================

/// Animation duration tokens (in milliseconds)
pub mod duration {
    /// Color transition when the active theme changes (200ms)
    pub const THEME_TRANSITION_MS: u64 = 200;
}

/// Easing curve applied to transition progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Constant speed
    #[default]
    Linear,
    /// Cubic ease out (fast start, slow finish)
    EaseOut,
    /// Cubic ease in and out
    EaseInOut,
}

impl Easing {
    /// Apply the easing function to a progress value (0.0 to 1.0)
    ///
    /// Input is clamped; `apply(0) == 0` and `apply(1) == 1` exactly.
    pub fn apply(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Easing::Linear => t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}
