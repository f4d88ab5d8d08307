/// Font and tab-size value types shared by the session, the config file and the UI.
use std::fmt;

use serde::{Deserialize, Serialize};

/// Practical font sizes offered by the font dialog.
pub const FONT_SIZES: [u8; 6] = [8, 9, 10, 11, 12, 14];

/// A font family name plus a point size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    pub size: u8,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: u8) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }

    /// Returns the closest entry of [`FONT_SIZES`] (ties go to the smaller size).
    pub fn snap_size(size: u8) -> u8 {
        FONT_SIZES
            .iter()
            .copied()
            .min_by_key(|s| (s.abs_diff(size), *s))
            .unwrap_or(12)
    }

    /// Substitutes the first installed family when this one is missing and
    /// snaps the size onto the practical set.
    pub fn resolve(&self, installed: &[String]) -> Self {
        let family = if installed.iter().any(|f| *f == self.family) {
            self.family.clone()
        } else {
            installed
                .first()
                .cloned()
                .unwrap_or_else(|| self.family.clone())
        };
        Self {
            family,
            size: Self::snap_size(self.size),
        }
    }
}

impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.family, self.size)
    }
}

/// Width of a tab stop, in spaces. Always within `1..=8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct TabSize(u8);

impl TabSize {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 8;
    pub const DEFAULT: TabSize = TabSize(4);

    pub fn new(n: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&n).then_some(Self(n))
    }

    /// Clamps any value into the valid range.
    pub fn clamped(n: u8) -> Self {
        Self(n.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for TabSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for TabSize {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Self::new(n).ok_or_else(|| {
            format!(
                "tab size {n} out of range {}..={}",
                Self::MIN,
                Self::MAX
            )
        })
    }
}

impl From<TabSize> for u8 {
    fn from(t: TabSize) -> u8 {
        t.0
    }
}

impl fmt::Display for TabSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
