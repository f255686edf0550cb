//! Style factories for the shared themed components
//!
//! These are the building blocks every screen composes: themed text, themed
//! views and scroll views, and the bordered navigation link. Each function
//! hands out clones of one shared [`StyleFactory`] per component (per variant
//! for text), so the runtime evaluates a given component style at most once
//! per theme no matter how often the function is called.
//!
//! Backgrounds bind to the `primary_background` token and text binds to
//! `primary`; both are [`StyleValue::ThemeColor`](crate::style::StyleValue)
//! values and animate during a theme transition. Fonts snap.
//!
//! # Available Components
//!
//! - [`themed_text`] - Text with weight and size variants
//! - [`themed_view`] - Full-height container with animated background
//! - [`themed_scroll_view_container`] / [`themed_scroll_view_content`] - Scroll view parts
//! - [`custom_link`] - Bordered navigation link

use crate::style::{StyleDescriptor, StyleFactory};
use crate::theme::tokens;
use crate::typography::{FontWeight, TextSize};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Color token used for animated component backgrounds
pub const ANIMATED_BACKGROUND: &str = tokens::PRIMARY_BACKGROUND;

// =============================================================================
// Text
// =============================================================================

/// Style of themed text for a weight and size variant.
///
/// Later layers win, in the order: base (primary color, regular font),
/// weight font, animated background, size metrics.
pub fn themed_text(weight: FontWeight, size: TextSize) -> StyleFactory {
    static VARIANTS: OnceLock<Mutex<HashMap<(FontWeight, TextSize), StyleFactory>>> =
        OnceLock::new();
    VARIANTS
        .get_or_init(Default::default)
        .lock()
        .entry((weight, size))
        .or_insert_with(|| build_themed_text(weight, size))
        .clone()
}

fn build_themed_text(weight: FontWeight, size: TextSize) -> StyleFactory {
    let id = format!("themed_text.{}.{}", weight.as_str(), size.as_str());
    StyleFactory::new(id, move |theme| {
        let base = StyleDescriptor::new()
            .theme_color("color", theme, tokens::PRIMARY)
            .font("fontFamily", theme, FontWeight::Normal.role());
        let weighted = StyleDescriptor::new().font("fontFamily", theme, weight.role());
        let animated =
            StyleDescriptor::new().theme_color("backgroundColor", theme, ANIMATED_BACKGROUND);
        let sized = StyleDescriptor::new()
            .number("fontSize", size.font_size())
            .number("lineHeight", size.line_height());

        base.merge(&weighted).merge(&animated).merge(&sized)
    })
}

// =============================================================================
// Containers
// =============================================================================

/// Full-height, centered container with an animated background
pub fn themed_view() -> StyleFactory {
    static FACTORY: OnceLock<StyleFactory> = OnceLock::new();
    FACTORY
        .get_or_init(|| {
            StyleFactory::new("themed_view", |theme| {
                StyleDescriptor::new()
                    .theme_color("backgroundColor", theme, ANIMATED_BACKGROUND)
                    .percent("height", 100.0)
                    .keyword("alignItems", "center")
            })
        })
        .clone()
}

/// Outer part of a themed scroll view
pub fn themed_scroll_view_container() -> StyleFactory {
    static FACTORY: OnceLock<StyleFactory> = OnceLock::new();
    FACTORY
        .get_or_init(|| {
            StyleFactory::new("themed_scroll_view.container", |theme| {
                StyleDescriptor::new()
                    .theme_color("backgroundColor", theme, ANIMATED_BACKGROUND)
                    .percent("height", 100.0)
            })
        })
        .clone()
}

/// Content part of a themed scroll view
pub fn themed_scroll_view_content() -> StyleFactory {
    static FACTORY: OnceLock<StyleFactory> = OnceLock::new();
    FACTORY
        .get_or_init(|| {
            StyleFactory::new("themed_scroll_view.content", |_| {
                StyleDescriptor::new().keyword("alignItems", "center")
            })
        })
        .clone()
}

// =============================================================================
// Links
// =============================================================================

/// Bordered link used for in-app navigation
pub fn custom_link() -> StyleFactory {
    static FACTORY: OnceLock<StyleFactory> = OnceLock::new();
    FACTORY
        .get_or_init(|| {
            StyleFactory::new("custom_link", |theme| {
                StyleDescriptor::new()
                    .theme_color("borderColor", theme, tokens::PRIMARY)
                    .number("borderWidth", 1.0)
                    .number("padding", 4.0)
                    .number("marginTop", theme.gap(4.0))
            })
        })
        .clone()
}
