#![forbid(unsafe_code)]

//! Page configuration.
//!
//! Every field defaults to the page's stock behavior, so
//! `ShowcaseConfig::default()` is the page as shipped. Hosts may pass a JSON
//! object overriding any subset:
//!
//! ```json
//! { "layout": "s-curve", "toast_display_ms": 2000,
//!   "elements": { "palette_grid": "swatches" } }
//! ```

use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::document::PALETTE_GROUPS;
use crate::error::{Result, ShowcaseError};
use crate::layout::{LayoutStrategy, NARROW_BREAKPOINT_PX};
use crate::theme_store::THEME_STORAGE_KEY;
use crate::toast::{TOAST_DISPLAY, TOAST_EXIT_FALLBACK, ToastTimings};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShowcaseConfig {
    /// Relative URL of the theme document.
    pub document_path: String,
    /// Top-level groups rendered, in order.
    pub groups: Vec<String>,
    /// Preference storage key.
    pub storage_key: String,
    pub layout: LayoutStrategy,
    pub narrow_breakpoint_px: f64,
    pub toast_display_ms: u64,
    /// Forced removal delay after a toast starts hiding.
    pub toast_exit_fallback_ms: u64,
    pub elements: ElementIds,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            document_path: "theme.json".to_owned(),
            groups: PALETTE_GROUPS.iter().map(|g| (*g).to_owned()).collect(),
            storage_key: THEME_STORAGE_KEY.to_owned(),
            layout: LayoutStrategy::default(),
            narrow_breakpoint_px: NARROW_BREAKPOINT_PX,
            toast_display_ms: TOAST_DISPLAY.as_millis() as u64,
            toast_exit_fallback_ms: TOAST_EXIT_FALLBACK.as_millis() as u64,
            elements: ElementIds::default(),
        }
    }
}

impl ShowcaseConfig {
    /// Load overrides from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.document_path.trim().is_empty() {
            return Err(ShowcaseError::config("document_path must not be empty"));
        }
        if self.storage_key.is_empty() {
            return Err(ShowcaseError::config("storage_key must not be empty"));
        }
        if !self.narrow_breakpoint_px.is_finite() || self.narrow_breakpoint_px < 0.0 {
            return Err(ShowcaseError::config(
                "narrow_breakpoint_px must be a finite, non-negative width",
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn toast_timings(&self) -> ToastTimings {
        ToastTimings {
            display: Duration::from_millis(self.toast_display_ms),
            exit_fallback: Duration::from_millis(self.toast_exit_fallback_ms),
        }
    }
}

// ---------------------------------------------------------------------------
// DOM element ids
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ElementIds {
    pub theme_toggle: String,
    pub palette_grid: String,
    pub toast_container: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            theme_toggle: "theme-toggle".to_owned(),
            palette_grid: "palette-grid".to_owned(),
            toast_container: "toast-container".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_stock_page() {
        let config = ShowcaseConfig::default();
        assert_eq!(config.document_path, "theme.json");
        assert_eq!(config.groups, ["brand", "functional"]);
        assert_eq!(config.storage_key, "theme");
        assert_eq!(config.layout, LayoutStrategy::RandomSway);
        assert_eq!(config.narrow_breakpoint_px, 768.0);
        assert_eq!(config.toast_timings(), ToastTimings::default());
        assert_eq!(config.elements.theme_toggle, "theme-toggle");
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(
            ShowcaseConfig::from_json_str("{}").unwrap(),
            ShowcaseConfig::default()
        );
    }

    #[test]
    fn partial_override() {
        let config = ShowcaseConfig::from_json_str(
            r#"{"layout": "s-curve", "toast_display_ms": 2000,
                "elements": {"palette_grid": "swatches"}}"#,
        )
        .unwrap();
        assert_eq!(config.layout, LayoutStrategy::SCurve);
        assert_eq!(config.toast_timings().display, Duration::from_millis(2000));
        assert_eq!(config.elements.palette_grid, "swatches");
        assert_eq!(config.elements.toast_container, "toast-container");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = ShowcaseConfig::from_json_str(r#"{"colour": "red"}"#).unwrap_err();
        assert!(matches!(err, ShowcaseError::Json(_)));
    }

    #[test]
    fn validation_catches_empty_path() {
        let err = ShowcaseConfig::from_json_str(r#"{"document_path": " "}"#).unwrap_err();
        assert!(matches!(err, ShowcaseError::Config { .. }));
    }
}
