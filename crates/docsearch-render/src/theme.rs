//! Stylesheet theme variants.
//!
//! The site ships one stylesheet per theme, named `just-the-docs-<theme>.css`. The active
//! theme is read back from the stylesheet link's href.

use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::error::ThemeError;

/// Stylesheet file name prefix.
const STYLESHEET_PREFIX: &str = "just-the-docs-";

/// Stylesheet file extension, including the dot.
const STYLESHEET_EXTENSION: &str = ".css";

/// A site color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// The default theme.
    #[default]
    Default,
    /// Light theme.
    Light,
    /// Dark theme.
    Dark,
}

impl Theme {
    /// All variants.
    pub const ALL: [Self; 3] = [Self::Default, Self::Light, Self::Dark];

    /// Theme name as used in stylesheet file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Reads the theme from a stylesheet href.
    ///
    /// The name is the text after the last `-`, minus the four-character `.css` suffix.
    pub fn from_href(href: &str) -> Result<Self, ThemeError> {
        let start = href.rfind('-').map_or(0, |at| at + 1);
        let end = href.len().saturating_sub(STYLESHEET_EXTENSION.len());
        let name = href.get(start..end).unwrap_or_default();
        name.parse()
    }

    /// Builds the stylesheet href for this theme under `stylesheet_base`.
    pub fn href(&self, stylesheet_base: &str) -> String {
        format!(
            "{stylesheet_base}{STYLESHEET_PREFIX}{}{STYLESHEET_EXTENSION}",
            self.as_str()
        )
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|theme| theme.as_str() == s)
            .ok_or_else(|| ThemeError::Unknown(s.to_string()))
    }
}
