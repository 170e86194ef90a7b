#![forbid(unsafe_code)]

//! Card layout strategies and the swatch card model.
//!
//! Two strategies place the flattened colors on the page:
//!
//! - [`LayoutStrategy::RandomSway`]: scattered offsets and gaps. Pairs with
//!   the scroll-driven [`SwayAnimator`](crate::sway::SwayAnimator).
//! - [`LayoutStrategy::SCurve`]: offsets follow `A * sin(index * 0.6)` with
//!   fixed gaps, and no scroll animation.
//!
//! Both draw the card rotation from the injected RNG. The viewport is
//! sampled once per card when it is built; resizes never re-lay cards.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::{HexColor, Ink};
use crate::flatten::FlatEntry;
use crate::naming::display_name;

/// Viewports narrower than this (px) use the compact ranges.
pub const NARROW_BREAKPOINT_PX: f64 = 768.0;

const ROTATION_SPAN_DEG: f64 = 40.0;
const SWAY_RANGE_NARROW_PX: f64 = 50.0;
const SWAY_RANGE_WIDE_PX: f64 = 150.0;
const SWAY_GAP_MIN_PX: f64 = 60.0;
const SWAY_GAP_SPREAD_PX: f64 = 80.0;
const S_CURVE_FREQUENCY: f64 = 0.6;
const S_CURVE_AMPLITUDE_NARROW_PX: f64 = 30.0;
const S_CURVE_AMPLITUDE_WIDE_PX: f64 = 120.0;
const S_CURVE_GAP_NARROW_PX: f64 = 50.0;
const S_CURVE_GAP_WIDE_PX: f64 = 80.0;

/// Width of the page at the moment a card is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub narrow_breakpoint: f64,
}

impl Viewport {
    #[must_use]
    pub const fn new(width: f64) -> Self {
        Self {
            width,
            narrow_breakpoint: NARROW_BREAKPOINT_PX,
        }
    }

    #[must_use]
    pub const fn with_breakpoint(mut self, breakpoint: f64) -> Self {
        self.narrow_breakpoint = breakpoint;
        self
    }

    #[must_use]
    pub fn is_narrow(&self) -> bool {
        self.width < self.narrow_breakpoint
    }
}

/// How cards are spread down the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutStrategy {
    #[default]
    RandomSway,
    SCurve,
}

impl LayoutStrategy {
    /// Whether this strategy runs the scroll animator.
    #[must_use]
    pub const fn animates_on_scroll(self) -> bool {
        matches!(self, Self::RandomSway)
    }

    /// Compute the placement for the card at `index`.
    pub fn place<R: Rng + ?Sized>(
        self,
        index: usize,
        viewport: Viewport,
        rng: &mut R,
    ) -> CardPlacement {
        let narrow = viewport.is_narrow();
        let rotate_deg = rng.random::<f64>() * ROTATION_SPAN_DEG - ROTATION_SPAN_DEG / 2.0;
        match self {
            Self::RandomSway => {
                let range = if narrow {
                    SWAY_RANGE_NARROW_PX
                } else {
                    SWAY_RANGE_WIDE_PX
                };
                let offset_x_px = rng.random::<f64>() * (range * 2.0) - range;
                let gap_px =
                    (rng.random::<f64>() * SWAY_GAP_SPREAD_PX).floor() + SWAY_GAP_MIN_PX;
                CardPlacement {
                    rotate_deg,
                    offset_x_px,
                    gap_px,
                }
            }
            Self::SCurve => {
                let (amplitude, gap_px) = if narrow {
                    (S_CURVE_AMPLITUDE_NARROW_PX, S_CURVE_GAP_NARROW_PX)
                } else {
                    (S_CURVE_AMPLITUDE_WIDE_PX, S_CURVE_GAP_WIDE_PX)
                };
                CardPlacement {
                    rotate_deg,
                    offset_x_px: s_curve_offset(index, amplitude),
                    gap_px,
                }
            }
        }
    }
}

/// `amplitude * sin(index * 0.6)`.
#[must_use]
pub fn s_curve_offset(index: usize, amplitude: f64) -> f64 {
    amplitude * (index as f64 * S_CURVE_FREQUENCY).sin()
}

/// Visual transform of one card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardPlacement {
    /// `--rotate`, degrees.
    pub rotate_deg: f64,
    /// `--tx`, pixels. Base offset the sway animator oscillates around.
    pub offset_x_px: f64,
    /// `margin-bottom`, pixels.
    pub gap_px: f64,
}

/// One rendered color card. Built once, never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SwatchCard {
    pub index: usize,
    pub path: String,
    pub display_name: String,
    pub color: HexColor,
    pub placement: CardPlacement,
}

impl SwatchCard {
    /// Uppercased hex label.
    #[must_use]
    pub fn hex_label(&self) -> String {
        self.color.display_hex()
    }

    #[must_use]
    pub fn ink(&self) -> Option<Ink> {
        self.color.ink()
    }

    /// Toast text for a copy of this card's color.
    #[must_use]
    pub fn copy_message(&self) -> String {
        format!("Copied {} to clipboard", self.color)
    }
}

/// Turns flattened entries into placed cards.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwatchRenderer {
    strategy: LayoutStrategy,
}

impl SwatchRenderer {
    #[must_use]
    pub const fn new(strategy: LayoutStrategy) -> Self {
        Self { strategy }
    }

    #[must_use]
    pub const fn strategy(&self) -> LayoutStrategy {
        self.strategy
    }

    /// Build one card per entry, in order. `viewport` is called once per card.
    pub fn build_cards<R, V>(
        &self,
        entries: Vec<FlatEntry>,
        mut viewport: V,
        rng: &mut R,
    ) -> Vec<SwatchCard>
    where
        R: Rng + ?Sized,
        V: FnMut() -> Viewport,
    {
        entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| SwatchCard {
                index,
                display_name: display_name(&entry.path),
                placement: self.strategy.place(index, viewport(), rng),
                path: entry.path,
                color: entry.color,
            })
            .collect()
    }
}
