//! Screen-level styles and actions
//!
//! Styles for the navigation chrome (stack headers, bottom tabs) and the
//! account screen, plus the theme toggle the account screen exposes.

use app_state::{Result, StyleRuntime};
use app_ui::style::{StyleDescriptor, StyleFactory};
use app_ui::theme::{tokens, ThemeKey, DARK, LIGHT};
use app_ui::tokens::breakpoints;

/// Height of the bottom tab bar
pub const BOTTOM_NAV_BAR_HEIGHT: f32 = 60.0;

/// A bottom navigation tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BottomTab {
    /// Route name
    pub name: &'static str,
    /// Visible title
    pub title: &'static str,
}

/// Tabs of the bottom navigation, left to right
pub const BOTTOM_TABS: [BottomTab; 4] = [
    BottomTab {
        name: "index",
        title: "Start",
    },
    BottomTab {
        name: "radio",
        title: "Radio",
    },
    BottomTab {
        name: "podcasts",
        title: "Podcasty",
    },
    BottomTab {
        name: "account",
        title: "Konto",
    },
];

// =============================================================================
// Navigation Chrome
// =============================================================================

/// Header of modal stack screens
pub fn stack_header() -> StyleFactory {
    StyleFactory::new("stack_header", |theme| {
        StyleDescriptor::new()
            .theme_color("backgroundColor", theme, tokens::PRIMARY_BACKGROUND)
            .theme_color("headerTintColor", theme, tokens::PRIMARY_TEXT)
    })
}

/// Root container of the bottom tabs layout
pub fn bottom_tabs_container() -> StyleFactory {
    StyleFactory::new("bottom_tabs.container", |theme| {
        StyleDescriptor::new()
            .number("flex", 1.0)
            .theme_color("backgroundColor", theme, tokens::BACKGROUND)
    })
}

/// Header title of tab screens
pub fn bottom_tabs_header_title() -> StyleFactory {
    StyleFactory::new("bottom_tabs.header_title", |theme| {
        StyleDescriptor::new()
            .theme_color("color", theme, tokens::PRIMARY_TEXT)
            .keyword("headerTitleAlign", "center")
    })
}

/// The tab bar itself
pub fn bottom_tab_bar() -> StyleFactory {
    StyleFactory::new("bottom_tabs.tab_bar", |theme| {
        StyleDescriptor::new()
            .theme_color("backgroundColor", theme, tokens::PRIMARY_BACKGROUND)
            .number("height", BOTTOM_NAV_BAR_HEIGHT)
    })
}

/// Active and inactive tab colors
pub fn bottom_tab_tints() -> StyleFactory {
    StyleFactory::new("bottom_tabs.tints", |theme| {
        StyleDescriptor::new()
            .theme_color("activeBackgroundColor", theme, tokens::PRIMARY_BACKGROUND)
            .theme_color("inactiveBackgroundColor", theme, tokens::BACKGROUND)
            .theme_color("activeTintColor", theme, tokens::TAB_ICON_ACTIVE)
            .theme_color("inactiveTintColor", theme, tokens::TAB_ICON)
    })
}

// =============================================================================
// Account Screen
// =============================================================================

/// Account screen container; roomier padding from `md` up
pub fn account_container() -> StyleFactory {
    StyleFactory::responsive("account.container", |theme, breakpoint| {
        let padding = if breakpoint.min_width >= breakpoints::MD {
            16.0
        } else {
            10.0
        };
        StyleDescriptor::new()
            .number("flex", 1.0)
            .number("padding", theme.gap(padding))
    })
}

/// A settings section
pub fn account_section() -> StyleFactory {
    StyleFactory::new("account.section", |_| {
        StyleDescriptor::new().number("marginBottom", 30.0)
    })
}

/// Title of a settings section
pub fn account_section_title() -> StyleFactory {
    StyleFactory::new("account.section_title", |_| {
        StyleDescriptor::new().number("marginBottom", 15.0)
    })
}

/// The theme toggle button
pub fn account_theme_button() -> StyleFactory {
    StyleFactory::new("account.theme_button", |theme| {
        StyleDescriptor::new()
            .number("padding", 15.0)
            .number("borderRadius", 10.0)
            .keyword("alignItems", "center")
            .number("borderWidth", 1.0)
            .theme_color("borderColor", theme, tokens::SECONDARY)
            .theme_color("shadowColor", theme, tokens::TEXT)
            .offset("shadowOffset", 0.0, 2.0)
            .number("shadowOpacity", 0.1)
            .number("shadowRadius", 4.0)
            .number("elevation", 2.0)
    })
}

/// Theme the toggle switches to from `current`
pub fn toggle_target(current: &ThemeKey) -> &'static str {
    if current.as_str() == LIGHT {
        DARK
    } else {
        LIGHT
    }
}

/// Label of the theme toggle button
pub fn toggle_label(current: &ThemeKey) -> &'static str {
    if toggle_target(current) == DARK {
        "Przełącz na ciemny motyw"
    } else {
        "Przełącz na jasny motyw"
    }
}

/// Switch between the light and dark themes; returns the new key.
pub fn toggle_theme(runtime: &StyleRuntime) -> Result<ThemeKey> {
    let target = toggle_target(&runtime.active_key());
    runtime.switch(target)?;
    Ok(ThemeKey::from(target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_state::{ManualClock, RuntimeConfig};
    use app_ui::color::Color;
    use app_ui::style::StyleValue;
    use app_ui::theme::{dark_theme, light_theme};
    use app_ui::tokens::Breakpoint;
    use std::sync::Arc;

    fn xs() -> Breakpoint {
        Breakpoint::new("xs", 0.0)
    }

    #[test]
    fn test_tab_bar_height_and_background() {
        let style = bottom_tab_bar().apply(&dark_theme(), &xs());
        assert_eq!(style.get("height"), Some(&StyleValue::Number(60.0)));
        assert_eq!(style.get_color("backgroundColor"), Some(Color::BLACK));
    }

    #[test]
    fn test_tab_tints() {
        let style = bottom_tab_tints().apply(&light_theme(), &xs());
        assert_eq!(
            style.get_color("activeTintColor"),
            Some(Color::from_rgb24(0x007AFF))
        );
        assert_eq!(
            style.get_color("inactiveTintColor"),
            Some(Color::from_rgb24(0x666666))
        );
        assert_eq!(style.tokens().count(), 4);
    }

    #[test]
    fn test_stack_header_binds_tokens() {
        let style = stack_header().apply(&light_theme(), &xs());
        assert_eq!(
            style.get("headerTintColor").and_then(StyleValue::token),
            Some(tokens::PRIMARY_TEXT)
        );
        assert!(bottom_tabs_container().apply(&light_theme(), &xs()).get("flex").is_some());
        assert_eq!(
            bottom_tabs_header_title()
                .apply(&dark_theme(), &xs())
                .get_color("color"),
            Some(Color::WHITE)
        );
    }

    #[test]
    fn test_account_container_is_responsive() {
        let factory = account_container();
        assert!(factory.depends_on_breakpoint());

        let narrow = factory.apply(&light_theme(), &Breakpoint::new("sm", 300.0));
        let wide = factory.apply(&light_theme(), &Breakpoint::new("md", 500.0));
        assert_eq!(narrow.get("padding"), Some(&StyleValue::Number(20.0)));
        assert_eq!(wide.get("padding"), Some(&StyleValue::Number(32.0)));
    }

    #[test]
    fn test_account_theme_button() {
        let style = account_theme_button().apply(&dark_theme(), &xs());
        assert_eq!(style.get_color("borderColor"), Some(Color::BLACK));
        assert_eq!(style.get_color("shadowColor"), Some(Color::WHITE));
        assert_eq!(
            style.get("shadowOffset"),
            Some(&StyleValue::Offset {
                width: 0.0,
                height: 2.0
            })
        );
        assert_eq!(
            account_section().apply(&dark_theme(), &xs()).get("marginBottom"),
            Some(&StyleValue::Number(30.0))
        );
        assert_eq!(
            account_section_title()
                .apply(&dark_theme(), &xs())
                .get("marginBottom"),
            Some(&StyleValue::Number(15.0))
        );
    }

    #[test]
    fn test_toggle_theme_round_trip() {
        let runtime =
            StyleRuntime::with_clock(RuntimeConfig::default(), Arc::new(ManualClock::new()))
                .unwrap();

        assert_eq!(toggle_label(&runtime.active_key()), "Przełącz na ciemny motyw");
        assert_eq!(toggle_theme(&runtime).unwrap(), ThemeKey::from(DARK));
        assert_eq!(runtime.active_key(), ThemeKey::from(DARK));
        assert_eq!(toggle_label(&runtime.active_key()), "Przełącz na jasny motyw");

        assert_eq!(toggle_theme(&runtime).unwrap(), ThemeKey::from(LIGHT));
        assert!(runtime.is_transitioning());
    }

    #[test]
    fn test_bottom_tabs() {
        let names: Vec<_> = BOTTOM_TABS.iter().map(|tab| tab.name).collect();
        assert_eq!(names, vec!["index", "radio", "podcasts", "account"]);
    }
}
