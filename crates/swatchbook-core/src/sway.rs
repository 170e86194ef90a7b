#![forbid(unsafe_code)]

//! Scroll-driven card sway with per-frame coalescing.
//!
//! Each card oscillates horizontally around its base offset as the page
//! scrolls: `base + amplitude * sin(scroll_y * speed + phase)`.
//!
//! # Design
//!
//! - [`SwayAnimator::on_scroll`] is called for every scroll event. Only the
//!   first event after a frame returns `true`; the host schedules exactly one
//!   animation frame for that burst.
//! - [`SwayAnimator::frame`] is the read phase: it samples the scroll offset
//!   once and computes every card's offset into a reusable buffer without
//!   touching the view. The host then writes all offsets in a single pass,
//!   so reads and writes never interleave within a frame.
//!
//! # Invariants
//!
//! 1. At most one frame is pending at any time.
//! 2. `frame()` always clears the pending flag.
//! 3. The output slice has one offset per track, in card order.

use std::f64::consts::TAU;

use rand::Rng;

const SPEED_MIN: f64 = 0.002;
const SPEED_SPREAD: f64 = 0.001;
const AMPLITUDE_MIN_PX: f64 = 35.0;
const AMPLITUDE_SPREAD_PX: f64 = 25.0;

/// Oscillation parameters for one card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwayTrack {
    /// Offset the card was laid out at.
    pub base_x: f64,
    /// Radians, in `[0, 2π)`.
    pub phase: f64,
    /// Radians per scrolled pixel, in `[0.002, 0.003)`.
    pub speed: f64,
    /// Pixels, in `[35, 60)`.
    pub amplitude: f64,
}

impl SwayTrack {
    /// Draw random oscillation parameters around `base_x`.
    pub fn random<R: Rng + ?Sized>(base_x: f64, rng: &mut R) -> Self {
        Self {
            base_x,
            phase: rng.random::<f64>() * TAU,
            speed: SPEED_MIN + rng.random::<f64>() * SPEED_SPREAD,
            amplitude: AMPLITUDE_MIN_PX + rng.random::<f64>() * AMPLITUDE_SPREAD_PX,
        }
    }

    /// Offset at the given scroll position.
    #[must_use]
    pub fn offset_at(&self, scroll_y: f64) -> f64 {
        self.base_x + (scroll_y * self.speed + self.phase).sin() * self.amplitude
    }
}

/// Per-page sway state: tracks, the pending-frame flag, and the output buffer.
#[derive(Debug, Clone, Default)]
pub struct SwayAnimator {
    tracks: Vec<SwayTrack>,
    frame_pending: bool,
    offsets: Vec<f64>,
    frames_run: u64,
    scrolls_coalesced: u64,
}

impl SwayAnimator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build tracks for cards laid out at `base_offsets`.
    pub fn with_random_tracks<R, I>(base_offsets: I, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
        I: IntoIterator<Item = f64>,
    {
        Self::from_tracks(
            base_offsets
                .into_iter()
                .map(|base| SwayTrack::random(base, rng))
                .collect(),
        )
    }

    #[must_use]
    pub fn from_tracks(tracks: Vec<SwayTrack>) -> Self {
        let offsets = Vec::with_capacity(tracks.len());
        Self {
            tracks,
            offsets,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn tracks(&self) -> &[SwayTrack] {
        &self.tracks
    }

    #[must_use]
    pub fn is_frame_pending(&self) -> bool {
        self.frame_pending
    }

    /// Frames computed so far.
    #[must_use]
    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }

    /// Scroll events absorbed into an already pending frame.
    #[must_use]
    pub fn scrolls_coalesced(&self) -> u64 {
        self.scrolls_coalesced
    }

    /// Register a scroll event. Returns `true` if the caller must request a frame.
    pub fn on_scroll(&mut self) -> bool {
        if self.frame_pending {
            self.scrolls_coalesced += 1;
            return false;
        }
        self.frame_pending = true;
        true
    }

    /// Forget a pending frame whose request never reached the host, so the
    /// next scroll asks again.
    pub fn cancel_frame(&mut self) {
        self.frame_pending = false;
    }

    /// Compute all offsets for `scroll_y`. Clears the pending flag.
    pub fn frame(&mut self, scroll_y: f64) -> &[f64] {
        self.frame_pending = false;
        self.frames_run += 1;
        self.offsets.clear();
        self.offsets
            .extend(self.tracks.iter().map(|track| track.offset_at(scroll_y)));
        &self.offsets
    }

    /// Drop all tracks and forget any pending frame.
    pub fn teardown(&mut self) {
        self.tracks.clear();
        self.offsets.clear();
        self.frame_pending = false;
    }
}
