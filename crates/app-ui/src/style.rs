//! Style descriptors and style factories
//!
//! A [`StyleFactory`] is a pure function from a theme (and optionally the
//! current breakpoint) to a [`StyleDescriptor`]. Factories carry an explicit
//! [`FactoryId`] for logging and cache lookup; cloning a factory shares its
//! function, and only factories sharing a function share cached results.
//!
//! Colors taken from a theme are recorded as [`StyleValue::ThemeColor`] so
//! that an in-flight theme transition can substitute its interpolated value
//! for the token. Everything else (fonts, sizes, keywords) always comes from
//! the active theme and therefore switches instantly.
//!
//! ```rust
//! use app_ui::style::{StyleDescriptor, StyleFactory, StyleValue};
//! use app_ui::theme::{light_theme, tokens};
//! use app_ui::tokens::Breakpoint;
//!
//! let card = StyleFactory::new("card", |theme| {
//!     StyleDescriptor::new()
//!         .theme_color("backgroundColor", theme, tokens::SURFACE)
//!         .number("padding", theme.gap(8.0))
//! });
//!
//! let style = card.apply(&light_theme(), &Breakpoint::new("xs", 0.0));
//! assert_eq!(style.get("padding"), Some(&StyleValue::Number(16.0)));
//! ```

use crate::color::Color;
use crate::theme::{FontId, FontRole, Theme};
use crate::tokens::Breakpoint;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

// =============================================================================
// Style Values
// =============================================================================

/// A resolved style property value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum StyleValue {
    /// Literal color
    Color(Color),
    /// Color read from a theme token (animatable)
    ThemeColor {
        /// Theme color token the value came from
        token: String,
        /// Resolved color
        color: Color,
    },
    /// Plain number (pixels, flex factor, opacity, ...)
    Number(f32),
    /// Percentage of the parent dimension (100.0 = full)
    Percent(f32),
    /// Font family
    Font(FontId),
    /// Enumerated keyword (e.g. `"center"`)
    Keyword(String),
    /// Two-dimensional offset (shadows)
    Offset {
        /// Horizontal offset
        width: f32,
        /// Vertical offset
        height: f32,
    },
}

impl StyleValue {
    /// Resolved color, for literal and theme colors
    pub fn as_color(&self) -> Option<Color> {
        match self {
            StyleValue::Color(color) | StyleValue::ThemeColor { color, .. } => Some(*color),
            _ => None,
        }
    }

    /// Numeric value, for numbers and percentages
    pub fn as_number(&self) -> Option<f32> {
        match self {
            StyleValue::Number(value) | StyleValue::Percent(value) => Some(*value),
            _ => None,
        }
    }

    /// Theme token backing this value, if any
    pub fn token(&self) -> Option<&str> {
        match self {
            StyleValue::ThemeColor { token, .. } => Some(token),
            _ => None,
        }
    }
}

// =============================================================================
// Style Descriptor
// =============================================================================

/// Mapping from property name to resolved value
///
/// Descriptors are value objects: equal inputs produce structurally equal
/// descriptors, which is what the evaluator cache relies on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleDescriptor {
    properties: BTreeMap<String, StyleValue>,
}

impl StyleDescriptor {
    /// Create an empty descriptor
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property
    pub fn with(mut self, property: impl Into<String>, value: StyleValue) -> Self {
        self.insert(property, value);
        self
    }

    /// Set a property in place
    pub fn insert(&mut self, property: impl Into<String>, value: StyleValue) {
        self.properties.insert(property.into(), value);
    }

    /// Set a literal color
    pub fn color(self, property: impl Into<String>, color: Color) -> Self {
        self.with(property, StyleValue::Color(color))
    }

    /// Set a color bound to a theme token.
    ///
    /// A token the theme does not define leaves the property unset.
    pub fn theme_color(self, property: impl Into<String>, theme: &Theme, token: &str) -> Self {
        let property = property.into();
        match theme.color(token) {
            Some(color) => self.with(
                property,
                StyleValue::ThemeColor {
                    token: token.to_string(),
                    color,
                },
            ),
            None => {
                tracing::warn!(
                    theme = %theme.key,
                    token,
                    property = %property,
                    "theme has no such color token"
                );
                self
            }
        }
    }

    /// Set a number
    pub fn number(self, property: impl Into<String>, value: f32) -> Self {
        self.with(property, StyleValue::Number(value))
    }

    /// Set a percentage
    pub fn percent(self, property: impl Into<String>, value: f32) -> Self {
        self.with(property, StyleValue::Percent(value))
    }

    /// Set a keyword
    pub fn keyword(self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.with(property, StyleValue::Keyword(value.into()))
    }

    /// Set an offset
    pub fn offset(self, property: impl Into<String>, width: f32, height: f32) -> Self {
        self.with(property, StyleValue::Offset { width, height })
    }

    /// Set the font family for a role of the given theme
    pub fn font(self, property: impl Into<String>, theme: &Theme, role: FontRole) -> Self {
        match theme.font(role) {
            Some(font) => self.with(property, StyleValue::Font(font.to_string())),
            None => self,
        }
    }

    /// Get a property
    pub fn get(&self, property: &str) -> Option<&StyleValue> {
        self.properties.get(property)
    }

    /// Get a property's resolved color
    pub fn get_color(&self, property: &str) -> Option<Color> {
        self.get(property).and_then(StyleValue::as_color)
    }

    /// Number of properties
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Whether no properties are set
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Iterate properties in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Theme color tokens referenced by this descriptor
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.properties.values().filter_map(StyleValue::token)
    }

    /// Layer `other` on top of this descriptor (later wins, like style arrays)
    pub fn merge(mut self, other: &StyleDescriptor) -> Self {
        for (property, value) in &other.properties {
            self.properties.insert(property.clone(), value.clone());
        }
        self
    }

    /// Replace theme-bound colors with per-frame values.
    ///
    /// Only [`StyleValue::ThemeColor`] entries whose token appears in
    /// `overrides` change; all other properties are returned as-is.
    pub fn with_color_overrides(&self, overrides: &BTreeMap<String, Color>) -> Self {
        let mut result = self.clone();
        for value in result.properties.values_mut() {
            if let StyleValue::ThemeColor { token, color } = value {
                if let Some(frame_color) = overrides.get(token.as_str()) {
                    *color = *frame_color;
                }
            }
        }
        result
    }
}

// =============================================================================
// Style Factory
// =============================================================================

/// Name of a style factory, used in cache keys and logs
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactoryId(String);

impl FactoryId {
    /// Create a factory id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FactoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

type FactoryFn = dyn Fn(&Theme, &Breakpoint) -> StyleDescriptor + Send + Sync;

/// Pure function `(theme, breakpoint) -> StyleDescriptor` with an identity
#[derive(Clone)]
pub struct StyleFactory {
    id: FactoryId,
    responsive: bool,
    build: Arc<FactoryFn>,
}

impl StyleFactory {
    /// Create a factory that only depends on the theme
    pub fn new<F>(id: impl Into<String>, build: F) -> Self
    where
        F: Fn(&Theme) -> StyleDescriptor + Send + Sync + 'static,
    {
        Self {
            id: FactoryId::new(id),
            responsive: false,
            build: Arc::new(move |theme, _| build(theme)),
        }
    }

    /// Create a factory that branches on the current breakpoint
    pub fn responsive<F>(id: impl Into<String>, build: F) -> Self
    where
        F: Fn(&Theme, &Breakpoint) -> StyleDescriptor + Send + Sync + 'static,
    {
        Self {
            id: FactoryId::new(id),
            responsive: true,
            build: Arc::new(build),
        }
    }

    /// Factory identity
    pub fn id(&self) -> &FactoryId {
        &self.id
    }

    /// Whether both factories run the same function.
    ///
    /// True for clones of one factory, false for separately built factories
    /// even when they carry the same id.
    pub fn same_function(&self, other: &StyleFactory) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.build) as *const (),
            Arc::as_ptr(&other.build) as *const (),
        )
    }

    /// Whether breakpoint changes affect the output
    pub fn depends_on_breakpoint(&self) -> bool {
        self.responsive
    }

    /// Run the factory
    pub fn apply(&self, theme: &Theme, breakpoint: &Breakpoint) -> StyleDescriptor {
        (self.build)(theme, breakpoint)
    }
}

impl fmt::Debug for StyleFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleFactory")
            .field("id", &self.id)
            .field("responsive", &self.responsive)
            .finish_non_exhaustive()
    }
}
