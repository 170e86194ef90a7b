#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for the palette page.
//!
//! Only compiled on `wasm32` targets. The host page calls
//! `mountShowcase(config?)` once the document is ready and keeps the returned
//! [`SwatchbookApp`] for as long as the page lives.

use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use swatchbook_core::{
    MemorySlot, PreferenceSlot, Result, ShowcaseConfig, ShowcaseError, ToastKind,
};
use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::Storage;

use crate::console_log::{init_tracing, install_panic_hook};
use crate::dom_host::DomHost;
use crate::loader::{fetch_document, js_error_message};
use crate::page_core::ShowcasePage;

pub(crate) type Page = ShowcasePage<DomHost, Box<dyn PreferenceSlot>, SmallRng>;

// ---------------------------------------------------------------------------
// localStorage preference slot
// ---------------------------------------------------------------------------

struct LocalStorageSlot(Storage);

impl PreferenceSlot for LocalStorageSlot {
    fn read(&self, key: &str) -> Option<String> {
        self.0.get_item(key).ok().flatten()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.0
            .set_item(key, value)
            .map_err(|err| ShowcaseError::storage(js_error_message(&err)))
    }
}

fn preference_slot(window: &web_sys::Window) -> Box<dyn PreferenceSlot> {
    match window.local_storage() {
        Ok(Some(storage)) => Box::new(LocalStorageSlot(storage)),
        Ok(None) | Err(_) => {
            warn!("localStorage unavailable, theme preference will not persist");
            Box::new(MemorySlot::new())
        }
    }
}

fn seeded_rng() -> SmallRng {
    let hi = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    let lo = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    SmallRng::seed_from_u64((hi << 32) | lo)
}

fn parse_config(config: &JsValue) -> std::result::Result<ShowcaseConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(ShowcaseConfig::default());
    }
    let json = js_sys::JSON::stringify(config)?
        .as_string()
        .ok_or_else(|| JsValue::from_str("config is not serializable"))?;
    ShowcaseConfig::from_json_str(&json).map_err(|err| JsValue::from_str(&err.to_string()))
}

// ---------------------------------------------------------------------------
// Exports
// ---------------------------------------------------------------------------

/// Build the palette page on the current document.
///
/// Applies the stored theme, wires the toggle, fetches and renders the theme
/// document, and starts the scroll sway when the layout uses it. A failed
/// fetch leaves the grid empty; only a missing `window`/`document` or an
/// invalid config rejects.
#[wasm_bindgen(js_name = mountShowcase)]
pub async fn mount_showcase(config: JsValue) -> std::result::Result<SwatchbookApp, JsValue> {
    install_panic_hook();
    init_tracing();

    let config = parse_config(&config)?;
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let slot = preference_slot(&window);
    let ids = config.elements.clone();

    let page: Rc<RefCell<Page>> = Rc::new_cyclic(|weak| {
        let host = DomHost::new(window.clone(), document, ids, weak.clone());
        RefCell::new(ShowcasePage::new(config, host, slot, seeded_rng()))
    });

    let path = {
        let mut p = page.borrow_mut();
        p.init_theme();
        p.host_mut().listen_toggle();
        p.config().document_path.clone()
    };

    let fetched = fetch_document(&window, &path).await;

    {
        let mut p = page.borrow_mut();
        let count = p.load(fetched);
        if p.start_sway() {
            p.host_mut().listen_scroll();
        }
        info!(count, layout = ?p.layout(), "showcase mounted");
    }

    Ok(SwatchbookApp { page })
}

/// Handle to a mounted palette page.
#[wasm_bindgen]
pub struct SwatchbookApp {
    page: Rc<RefCell<Page>>,
}

#[wasm_bindgen]
impl SwatchbookApp {
    /// Flip light/dark mode. Returns `true` if the page is now dark.
    #[wasm_bindgen(js_name = toggleTheme)]
    pub fn toggle_theme(&self) -> bool {
        self.page.borrow_mut().toggle_theme().is_dark()
    }

    #[wasm_bindgen(js_name = isDark)]
    pub fn is_dark(&self) -> bool {
        self.page.borrow().theme_mode().is_dark()
    }

    /// Number of rendered swatch cards.
    #[wasm_bindgen(js_name = cardCount)]
    pub fn card_count(&self) -> usize {
        self.page.borrow().cards().len()
    }

    /// Copy the color of card `index`, as a click would.
    #[wasm_bindgen(js_name = copyCard)]
    pub fn copy_card(&self, index: usize) -> bool {
        self.page.borrow_mut().copy_card(index).is_some()
    }

    /// Show a toast. `kind` is `"info"` or anything else for success.
    pub fn notify(&self, message: &str, kind: &str) {
        let kind = match kind {
            "info" => ToastKind::Info,
            _ => ToastKind::Success,
        };
        self.page.borrow_mut().notify(message, kind);
    }

    /// Remove listeners, cancel callbacks, and drop all toasts.
    pub fn destroy(&self) {
        let mut page = self.page.borrow_mut();
        page.teardown();
        page.host_mut().detach();
    }
}
