//! Theme records for the podcast client
//!
//! A [`Theme`] is an immutable bundle of color tokens, font tokens and scale
//! transforms. Themes are defined once at startup; switching themes only
//! changes which key is active in the runtime, never the records themselves.
//!
//! # Themes
//!
//! Two themes ship with the app:
//! - `light`: white surfaces with black primary text
//! - `dark`: black surfaces with white primary text
//!
//! # Usage
//!
//! ```rust
//! use app_ui::theme::{dark_theme, tokens};
//! use app_ui::color::Color;
//!
//! let theme = dark_theme();
//! assert_eq!(theme.color(tokens::PRIMARY), Some(Color::WHITE));
//! assert_eq!(theme.gap(4.0), 8.0);
//! ```

use crate::color::Color;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

// =============================================================================
// Theme Keys
// =============================================================================

/// Unique name of a registered theme (e.g. `"light"`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeKey(String);

impl ThemeKey {
    /// Create a theme key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ThemeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ThemeKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for ThemeKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl Borrow<str> for ThemeKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ThemeKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ThemeKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// =============================================================================
// Token Names
// =============================================================================

/// Color token names shared by the shipped themes
pub mod tokens {
    /// Primary foreground (text, outlines)
    pub const PRIMARY: &str = "primary";
    /// Secondary foreground
    pub const SECONDARY: &str = "secondary";
    /// Screen background
    pub const BACKGROUND: &str = "background";
    /// Body text
    pub const TEXT: &str = "text";
    /// Muted body text
    pub const TEXT_SECONDARY: &str = "text_secondary";
    /// Card / sheet surface
    pub const SURFACE: &str = "surface";
    /// Navigation and themed container background
    pub const PRIMARY_BACKGROUND: &str = "primary_background";
    /// Secondary navigation background
    pub const SECONDARY_BACKGROUND: &str = "secondary_background";
    /// Navigation title text
    pub const PRIMARY_TEXT: &str = "primary_text";
    /// Inactive tab icon
    pub const TAB_ICON: &str = "tab_icon";
    /// Active tab icon
    pub const TAB_ICON_ACTIVE: &str = "tab_icon_active";
}

/// Font family identifiers bundled with the app
pub mod fonts {
    /// Roboto Black
    pub const ROBOTO_BLACK: &str = "Roboto-Black";
    /// Roboto Bold
    pub const ROBOTO_BOLD: &str = "Roboto-Bold";
    /// Roboto Light
    pub const ROBOTO_LIGHT: &str = "Roboto-Light";
    /// Roboto Medium
    pub const ROBOTO_MEDIUM: &str = "Roboto-Medium";
    /// Roboto Regular
    pub const ROBOTO_REGULAR: &str = "Roboto-Regular";
}

// =============================================================================
// Fonts and Scale
// =============================================================================

/// Font family identifier (e.g. `"Roboto-Regular"`)
pub type FontId = String;

/// Role a font plays in the type ramp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontRole {
    /// Heaviest weight
    Black,
    /// Bold weight
    Bold,
    /// Light weight
    Light,
    /// Medium weight
    Medium,
    /// Regular weight
    Regular,
}

impl FontRole {
    /// All font roles
    pub const ALL: [FontRole; 5] = [
        FontRole::Black,
        FontRole::Bold,
        FontRole::Light,
        FontRole::Medium,
        FontRole::Regular,
    ];
}

/// Numeric transforms carried by a theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleTransforms {
    /// Multiplier applied by [`ScaleTransforms::gap`]
    pub gap_factor: f32,
}

impl Default for ScaleTransforms {
    fn default() -> Self {
        Self { gap_factor: 2.0 }
    }
}

impl ScaleTransforms {
    /// Scale a spacing value
    pub fn gap(&self, value: f32) -> f32 {
        value * self.gap_factor
    }
}

// =============================================================================
// Theme
// =============================================================================

/// Immutable named bundle of color and font tokens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Theme key
    pub key: ThemeKey,
    /// Color tokens by name
    pub colors: BTreeMap<String, Color>,
    /// Font families by role
    #[serde(default)]
    pub fonts: BTreeMap<FontRole, FontId>,
    /// Numeric transforms
    #[serde(default)]
    pub scale: ScaleTransforms,
}

impl Theme {
    /// Start building a theme
    pub fn builder(key: impl Into<ThemeKey>) -> ThemeBuilder {
        ThemeBuilder {
            theme: Theme {
                key: key.into(),
                colors: BTreeMap::new(),
                fonts: BTreeMap::new(),
                scale: ScaleTransforms::default(),
            },
        }
    }

    /// Look up a color token
    pub fn color(&self, name: &str) -> Option<Color> {
        self.colors.get(name).copied()
    }

    /// Look up the font family for a role
    pub fn font(&self, role: FontRole) -> Option<&str> {
        self.fonts.get(&role).map(String::as_str)
    }

    /// Scale a spacing value with this theme's gap transform
    pub fn gap(&self, value: f32) -> f32 {
        self.scale.gap(value)
    }

    /// Whether the background is darker than the text
    pub fn is_dark(&self) -> bool {
        match (self.color(tokens::BACKGROUND), self.color(tokens::TEXT)) {
            (Some(bg), Some(text)) => bg.luminance() < text.luminance(),
            _ => false,
        }
    }
}

/// Builder for [`Theme`]
#[derive(Debug, Clone)]
pub struct ThemeBuilder {
    theme: Theme,
}

impl ThemeBuilder {
    /// Set a color token
    pub fn color(mut self, name: impl Into<String>, color: Color) -> Self {
        self.theme.colors.insert(name.into(), color);
        self
    }

    /// Set the font family for a role
    pub fn font(mut self, role: FontRole, font: impl Into<FontId>) -> Self {
        self.theme.fonts.insert(role, font.into());
        self
    }

    /// Set the gap multiplier
    pub fn gap_factor(mut self, factor: f32) -> Self {
        self.theme.scale.gap_factor = factor;
        self
    }

    /// Finish the theme
    pub fn build(self) -> Theme {
        self.theme
    }
}

fn with_roboto(builder: ThemeBuilder) -> ThemeBuilder {
    builder
        .font(FontRole::Black, fonts::ROBOTO_BLACK)
        .font(FontRole::Bold, fonts::ROBOTO_BOLD)
        .font(FontRole::Light, fonts::ROBOTO_LIGHT)
        .font(FontRole::Medium, fonts::ROBOTO_MEDIUM)
        .font(FontRole::Regular, fonts::ROBOTO_REGULAR)
}

// =============================================================================
// Shipped Themes
// =============================================================================

/// Key of the light theme
pub const LIGHT: &str = "light";

/// Key of the dark theme
pub const DARK: &str = "dark";

/// Light theme
pub fn light_theme() -> Theme {
    with_roboto(Theme::builder(LIGHT))
        .color(tokens::PRIMARY, Color::from_rgb24(0x000000))
        .color(tokens::SECONDARY, Color::from_rgb24(0xFFFFFF))
        .color(tokens::BACKGROUND, Color::from_rgb24(0xFFFFFF))
        .color(tokens::TEXT, Color::from_rgb24(0x000000))
        .color(tokens::TEXT_SECONDARY, Color::from_rgb24(0x666666))
        .color(tokens::SURFACE, Color::from_rgb24(0xF5F5F5))
        .color(tokens::PRIMARY_BACKGROUND, Color::from_rgb24(0xFFFFFF))
        .color(tokens::SECONDARY_BACKGROUND, Color::from_rgb24(0xF5F5F5))
        .color(tokens::PRIMARY_TEXT, Color::from_rgb24(0x000000))
        .color(tokens::TAB_ICON, Color::from_rgb24(0x666666))
        .color(tokens::TAB_ICON_ACTIVE, Color::from_rgb24(0x007AFF))
        .build()
}

/// Dark theme
pub fn dark_theme() -> Theme {
    with_roboto(Theme::builder(DARK))
        .color(tokens::PRIMARY, Color::from_rgb24(0xFFFFFF))
        .color(tokens::SECONDARY, Color::from_rgb24(0x000000))
        .color(tokens::BACKGROUND, Color::from_rgb24(0x000000))
        .color(tokens::TEXT, Color::from_rgb24(0xFFFFFF))
        .color(tokens::TEXT_SECONDARY, Color::from_rgb24(0xCCCCCC))
        .color(tokens::SURFACE, Color::from_rgb24(0x1A1A1A))
        .color(tokens::PRIMARY_BACKGROUND, Color::from_rgb24(0x000000))
        .color(tokens::SECONDARY_BACKGROUND, Color::from_rgb24(0x1A1A1A))
        .color(tokens::PRIMARY_TEXT, Color::from_rgb24(0xFFFFFF))
        .color(tokens::TAB_ICON, Color::from_rgb24(0xCCCCCC))
        .color(tokens::TAB_ICON_ACTIVE, Color::from_rgb24(0x007AFF))
        .build()
}

/// All shipped themes, light first
pub fn default_themes() -> Vec<Theme> {
    vec![light_theme(), dark_theme()]
}

/// Shared handle to an immutable theme
pub type SharedTheme = Arc<Theme>;
