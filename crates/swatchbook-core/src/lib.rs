#![forbid(unsafe_code)]

//! Host-independent core of the Swatchbook palette page.
//!
//! # Role in Swatchbook
//! `swatchbook-core` holds everything the page does that is not a browser
//! call: parsing the theme document, flattening its color groups, naming and
//! placing swatch cards, the scroll sway animation state, toast lifecycles,
//! and the light/dark preference. `swatchbook-web` drives these types from
//! DOM events.
//!
//! # This crate provides
//! - [`ThemeDocument`] and [`flatten_document`] for the palette tree.
//! - [`display_name`] for card titles.
//! - [`LayoutStrategy`], [`SwatchRenderer`] and [`SwatchCard`] for layout.
//! - [`SwayAnimator`] for frame-coalesced scroll sway.
//! - [`ToastQueue`] for host-clocked toasts.
//! - [`ThemeStore`] over any [`PreferenceSlot`].
//! - [`ShowcaseConfig`] and [`ShowcaseError`].
//!
//! Time is always passed in by the host and randomness is always injected,
//! so every behavior here is reproducible under test.

pub mod color;
pub mod config;
pub mod document;
pub mod error;
pub mod flatten;
pub mod layout;
pub mod naming;
pub mod sway;
pub mod theme_store;
pub mod toast;

pub use color::{HexColor, Ink, Rgb};
pub use config::{ElementIds, ShowcaseConfig};
pub use document::{PALETTE_GROUPS, ThemeDocument};
pub use error::{Result, ShowcaseError};
pub use flatten::{FlatEntry, MAX_DEPTH, flatten_document, flatten_group};
pub use layout::{
    CardPlacement, LayoutStrategy, NARROW_BREAKPOINT_PX, SwatchCard, SwatchRenderer, Viewport,
    s_curve_offset,
};
pub use naming::display_name;
pub use sway::{SwayAnimator, SwayTrack};
pub use theme_store::{
    DARK_MODE_CLASS, MemorySlot, PreferenceSlot, THEME_STORAGE_KEY, ThemeMode, ThemeStore,
};
pub use toast::{
    TOAST_DISPLAY, TOAST_EXIT_FALLBACK, Toast, ToastId, ToastKind, ToastPhase, ToastQueue,
    ToastTimings, ToastTransition,
};
