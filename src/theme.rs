//! Theme identifiers.
//!
//! The set is fixed: anything read from storage or from a control's
//! `data-theme` attribute must parse to one of these or it is ignored.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Theme options
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeId {
    #[serde(rename = "theme-teal")]
    Teal,
    #[serde(rename = "theme-coral")]
    Coral,
    #[serde(rename = "theme-sand")]
    Sand,
    #[serde(rename = "theme-ocean")]
    Ocean,
    #[serde(rename = "theme-sunset")]
    Sunset,
    #[serde(rename = "theme-night")]
    Night,
}

impl ThemeId {
    /// Every theme, in menu order.
    pub const ALL: [ThemeId; 6] = [
        ThemeId::Teal,
        ThemeId::Coral,
        ThemeId::Sand,
        ThemeId::Ocean,
        ThemeId::Sunset,
        ThemeId::Night,
    ];

    /// Identifier as stored and as used for the body class marker.
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeId::Teal => "theme-teal",
            ThemeId::Coral => "theme-coral",
            ThemeId::Sand => "theme-sand",
            ThemeId::Ocean => "theme-ocean",
            ThemeId::Sunset => "theme-sunset",
            ThemeId::Night => "theme-night",
        }
    }

    /// Exact match only. Unknown, empty, or differently-cased values yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "theme-teal" => Some(ThemeId::Teal),
            "theme-coral" => Some(ThemeId::Coral),
            "theme-sand" => Some(ThemeId::Sand),
            "theme-ocean" => Some(ThemeId::Ocean),
            "theme-sunset" => Some(ThemeId::Sunset),
            "theme-night" => Some(ThemeId::Night),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ThemeId::Teal => "Teal",
            ThemeId::Coral => "Coral",
            ThemeId::Sand => "Sand",
            ThemeId::Ocean => "Ocean",
            ThemeId::Sunset => "Sunset",
            ThemeId::Night => "Night",
        }
    }

    /// CSS class applied to the document body
    pub fn css_class(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
