//! Display color handed to the rendering layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Color specification: `#RRGGBB` hex or a named color such as `gray`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    /// Neutral color used when the styling lookup fails.
    pub const FALLBACK: &'static str = "gray";

    pub fn new(spec: impl Into<String>) -> Self {
        Self(spec.into())
    }

    pub fn fallback() -> Self {
        Self::new(Self::FALLBACK)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Accepts `#RRGGBB` or a non-empty ASCII alphabetic name.
    pub fn is_valid_spec(spec: &str) -> bool {
        match spec.strip_prefix('#') {
            Some(hex) => hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()),
            None => !spec.is_empty() && spec.chars().all(|c| c.is_ascii_alphabetic()),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::fallback()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
