//! CSS color values as stored in design documents.
//!
//! Documents are opaque JSON to persistence, so a color keeps the exact text
//! it was loaded with (`#fff`, `red`, `rgba(255, 0, 0, 0.5)`, ...). Parsing
//! into an RGBA value only happens when a renderer asks for one.

use peniko::Color as PenikoColor;
use peniko::color::{Srgb, parse_color};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// A CSS color string. Equality is textual.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(Cow<'static, str>);

impl Color {
    /// `#rrggbb`, or `#rrggbbaa` when not opaque.
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        let hex = if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        };
        Self(Cow::Owned(hex))
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self(Cow::Borrowed("#000000"))
    }

    pub const fn white() -> Self {
        Self(Cow::Borrowed("#ffffff"))
    }

    pub const fn transparent() -> Self {
        Self(Cow::Borrowed("#00000000"))
    }

    /// Accept any CSS color the renderer understands, keeping its text.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        parse_color(value).ok()?;
        Some(Self(Cow::Owned(value.to_string())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve to an sRGB color for drawing. `None` for text no renderer
    /// could interpret.
    pub fn to_peniko(&self) -> Option<PenikoColor> {
        parse_color(self.0.trim())
            .ok()
            .map(|color| color.to_alpha_color::<Srgb>())
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Color {
    fn from(value: String) -> Self {
        Self(Cow::Owned(value))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.0.into_owned()
    }
}

impl From<PenikoColor> for Color {
    fn from(color: PenikoColor) -> Self {
        let rgba = color.to_rgba8();
        Self::new(rgba.r, rgba.g, rgba.b, rgba.a)
    }
}
