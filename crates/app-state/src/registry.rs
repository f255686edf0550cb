//! Theme registry
//!
//! Holds the fixed set of themes and the key of the active one. The set is
//! frozen at construction; only the active key changes afterwards.

use crate::error::{Result, StyleError};
use app_ui::theme::{SharedTheme, Theme, ThemeKey};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Fixed theme set plus the active theme key
///
/// Invariant: `active` is always one of the registered themes.
#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    themes: BTreeMap<ThemeKey, SharedTheme>,
    active: SharedTheme,
}

impl ThemeRegistry {
    /// Register `themes` and activate `initial`
    pub fn new(themes: impl IntoIterator<Item = Theme>, initial: &str) -> Result<Self> {
        let mut map = BTreeMap::new();
        for theme in themes {
            let key = theme.key.clone();
            if map.insert(key.clone(), Arc::new(theme)).is_some() {
                return Err(StyleError::DuplicateTheme(key.to_string()));
            }
        }
        if map.is_empty() {
            return Err(StyleError::NoThemes);
        }

        let active = map
            .get(initial)
            .cloned()
            .ok_or_else(|| StyleError::UnknownTheme(initial.to_string()))?;

        Ok(Self {
            themes: map,
            active,
        })
    }

    /// Look up a theme by key
    pub fn get(&self, key: &str) -> Result<SharedTheme> {
        self.themes
            .get(key)
            .cloned()
            .ok_or_else(|| StyleError::UnknownTheme(key.to_string()))
    }

    /// The active theme
    pub fn active(&self) -> SharedTheme {
        self.active.clone()
    }

    /// Key of the active theme
    pub fn active_key(&self) -> &ThemeKey {
        &self.active.key
    }

    /// Registered keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &ThemeKey> {
        self.themes.keys()
    }

    /// Whether a theme is registered under `key`
    pub fn contains(&self, key: &str) -> bool {
        self.themes.contains_key(key)
    }

    /// Make `key` the active theme, returning the previously active theme.
    pub fn set_active(&mut self, key: &str) -> Result<SharedTheme> {
        let next = self.get(key)?;
        Ok(std::mem::replace(&mut self.active, next))
    }
}
