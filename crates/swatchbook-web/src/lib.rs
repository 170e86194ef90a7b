#![forbid(unsafe_code)]

//! Browser runner for the Swatchbook palette page.
//!
//! This crate provides [`page_core::ShowcasePage`], the host-independent page
//! controller, and on `wasm32` a `wasm-bindgen` entry point
//! (`mountShowcase`) that drives it from the DOM:
//!
//! - a persisted light/dark toggle,
//! - palette cards fetched from `theme.json` and laid out by the configured
//!   strategy,
//! - scroll sway coalesced to one animation frame per burst,
//! - copy-to-clipboard toasts that clean themselves up.
//!
//! Native builds compile only the controller, which is what the tests drive
//! through a recording host.

pub mod page_core;

#[cfg(target_arch = "wasm32")]
mod console_log;
#[cfg(target_arch = "wasm32")]
mod dom_host;
#[cfg(target_arch = "wasm32")]
mod loader;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{SwatchbookApp, mount_showcase};

pub use page_core::{PageHost, ShowcasePage};
