#![forbid(unsafe_code)]

//! Color leaf values.
//!
//! A theme document marks a leaf as a color purely by its `#` prefix; the
//! remaining characters are carried through untouched. [`HexColor`] keeps
//! that raw value (it is what lands on the clipboard and in the swatch
//! background) and offers a best-effort decode to [`Rgb`] for legibility
//! hints. A value that does not decode is still a color.

use std::fmt;

/// A `#`-prefixed color string taken verbatim from the theme document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HexColor(String);

impl HexColor {
    /// Wrap `raw` if it looks like a color (starts with `#`).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        raw.starts_with('#').then(|| Self(raw.to_owned()))
    }

    /// The value exactly as the document supplied it.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The value uppercased, as shown on a card label.
    #[must_use]
    pub fn display_hex(&self) -> String {
        self.0.to_uppercase()
    }

    /// Decode `#RGB`, `#RRGGBB` or `#RRGGBBAA`. Alpha is dropped.
    #[must_use]
    pub fn to_rgb(&self) -> Option<Rgb> {
        let hex = &self.0[1..];
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        match hex.len() {
            3 => Some(Rgb::new(
                channel(0..1)? * 17,
                channel(1..2)? * 17,
                channel(2..3)? * 17,
            )),
            6 | 8 => Some(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            _ => None,
        }
    }

    /// Which label ink reads best on this swatch, if the color decodes.
    #[must_use]
    pub fn ink(&self) -> Option<Ink> {
        self.to_rgb().map(|rgb| {
            if rgb.relative_luminance() > INK_LUMINANCE_THRESHOLD {
                Ink::Dark
            } else {
                Ink::Light
            }
        })
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Luminance at which black and white text have equal contrast.
const INK_LUMINANCE_THRESHOLD: f64 = 0.179;

/// Label ink hint for a swatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ink {
    /// Light text on a dark swatch.
    Light,
    /// Dark text on a light swatch.
    Dark,
}

impl Ink {
    /// Value used for the card's `data-ink` attribute.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// 24-bit sRGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// WCAG 2.x relative luminance in `[0.0, 1.0]`.
    #[must_use]
    pub fn relative_luminance(self) -> f64 {
        fn linear(channel: u8) -> f64 {
            let c = f64::from(channel) / 255.0;
            if c <= 0.039_28 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * linear(self.r) + 0.7152 * linear(self.g) + 0.0722 * linear(self.b)
    }
}
