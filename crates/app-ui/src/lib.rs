//! Design system for the podcast client
//!
//! This crate provides the pure, stateless half of the styling layer:
//! colors, theme records, design tokens, typography, style descriptors and
//! the style factories of the shared themed components. Mutable state
//! (active theme, viewport, transitions) lives in `app-state`.
//!
//! # Modules
//!
//! - [`color`] - Hex colors and channel-wise interpolation
//! - [`theme`] - Theme records and the shipped light/dark themes
//! - [`tokens`] - Breakpoint table, durations and easing curves
//! - [`typography`] - Font weight and text size scales
//! - [`style`] - Style descriptors and style factories
//! - [`components`] - Style factories of the themed components
//!
//! # Example
//!
//! ```rust
//! use app_ui::components::custom_link;
//! use app_ui::theme::light_theme;
//! use app_ui::tokens::BreakpointTable;
//!
//! let table = BreakpointTable::default();
//! let breakpoint = table.resolve(650.0);
//! assert_eq!(breakpoint.name, "md");
//!
//! let style = custom_link().apply(&light_theme(), breakpoint);
//! assert!(style.get("borderColor").is_some());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod color;
pub mod components;
pub mod style;
pub mod theme;
pub mod tokens;
pub mod typography;

// Re-export commonly used types
pub use color::{Color, ColorParseError};

pub use theme::{
    dark_theme, default_themes, light_theme, FontId, FontRole, ScaleTransforms, SharedTheme,
    Theme, ThemeBuilder, ThemeKey,
};

pub use tokens::{
    breakpoints, duration, Breakpoint, BreakpointConfigError, BreakpointName, BreakpointTable,
    Easing,
};

pub use typography::{FontWeight, TextSize};

pub use style::{FactoryId, StyleDescriptor, StyleFactory, StyleValue};
