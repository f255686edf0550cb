//! Typography scale for themed text
//!
//! Font families come from the active theme (see [`FontRole`]); sizes and
//! line heights are fixed across themes.

use crate::theme::FontRole;
use serde::{Deserialize, Serialize};

/// Font weight variants of themed text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Light
    Light,
    /// Regular
    #[default]
    Normal,
    /// Medium
    Medium,
    /// Bold
    Bold,
    /// Black
    Black,
}

impl FontWeight {
    /// The theme font role used for this weight
    pub fn role(&self) -> FontRole {
        match self {
            FontWeight::Light => FontRole::Light,
            FontWeight::Normal => FontRole::Regular,
            FontWeight::Medium => FontRole::Medium,
            FontWeight::Bold => FontRole::Bold,
            FontWeight::Black => FontRole::Black,
        }
    }

    /// Lowercase name, used in style factory ids
    pub fn as_str(&self) -> &'static str {
        match self {
            FontWeight::Light => "light",
            FontWeight::Normal => "normal",
            FontWeight::Medium => "medium",
            FontWeight::Bold => "bold",
            FontWeight::Black => "black",
        }
    }
}

/// Font size variants of themed text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TextSize {
    /// 12 / 16
    #[serde(rename = "xs")]
    Xs,
    /// 14 / 20
    #[serde(rename = "sm")]
    Sm,
    /// 16 / 24
    #[default]
    #[serde(rename = "base")]
    Base,
    /// 18 / 28
    #[serde(rename = "lg")]
    Lg,
    /// 20 / 28
    #[serde(rename = "xl")]
    Xl,
    /// 24 / 32
    #[serde(rename = "2xl")]
    Xxl,
}

impl TextSize {
    /// All sizes, smallest first
    pub const ALL: [TextSize; 6] = [
        TextSize::Xs,
        TextSize::Sm,
        TextSize::Base,
        TextSize::Lg,
        TextSize::Xl,
        TextSize::Xxl,
    ];

    /// Font size in pixels
    pub fn font_size(&self) -> f32 {
        match self {
            TextSize::Xs => 12.0,
            TextSize::Sm => 14.0,
            TextSize::Base => 16.0,
            TextSize::Lg => 18.0,
            TextSize::Xl => 20.0,
            TextSize::Xxl => 24.0,
        }
    }

    /// Line height in pixels
    pub fn line_height(&self) -> f32 {
        match self {
            TextSize::Xs => 16.0,
            TextSize::Sm => 20.0,
            TextSize::Base => 24.0,
            TextSize::Lg | TextSize::Xl => 28.0,
            TextSize::Xxl => 32.0,
        }
    }

    /// Short name, used in style factory ids
    pub fn as_str(&self) -> &'static str {
        match self {
            TextSize::Xs => "xs",
            TextSize::Sm => "sm",
            TextSize::Base => "base",
            TextSize::Lg => "lg",
            TextSize::Xl => "xl",
            TextSize::Xxl => "2xl",
        }
    }
}
