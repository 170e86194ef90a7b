#![forbid(unsafe_code)]

//! DOM implementation of [`PageHost`].
//!
//! Event wiring uses one long-lived closure per concern (scroll, frame,
//! wakeup, toggle click, grid click, toast animation end). Each closure holds
//! only a `Weak` page handle, so dropping the page drops the listeners with
//! it. Card clicks and toast animation ends are delegated to the grid and the
//! toast container rather than registered per element.
//!
//! # Invariants
//!
//! 1. At most one `requestAnimationFrame` is outstanding.
//! 2. [`DomHost::detach`] removes every listener and cancels every pending
//!    callback; it runs on drop as well. A detached host never attaches,
//!    requests, or schedules anything again.
//! 3. `cards[i]` is the element of card `i`, or `None` if it failed to build,
//!    so sway offsets stay index-aligned.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Weak;

use js_sys::{Array, Function, Object, Reflect};
use swatchbook_core::{DARK_MODE_CLASS, ElementIds, SwatchCard, Toast, ToastId};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Document, Element, Event, HtmlElement, Window};
use web_time::{Duration, Instant};

use crate::loader::js_error_message;
use crate::page_core::PageHost;
use crate::wasm::Page;

const CARD_SELECTOR: &str = ".swatch-card";
const TOAST_SELECTOR: &str = ".toast";
const HIDING_CLASS: &str = "hiding";
const INDEX_ATTR: &str = "data-index";
const TOAST_ID_ATTR: &str = "data-toast-id";

type Callback = Closure<dyn FnMut()>;
type EventCallback = Closure<dyn FnMut(Event)>;

struct Listener {
    target: web_sys::EventTarget,
    event: &'static str,
    callback: EventCallback,
}

impl Listener {
    fn attach(
        target: &web_sys::EventTarget,
        event: &'static str,
        callback: EventCallback,
        passive: bool,
    ) -> Option<Self> {
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                event,
                callback.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(|err| {
                warn!(event, error = %js_error_message(&err), "addEventListener failed");
            })
            .ok()?;
        Some(Self {
            target: target.clone(),
            event,
            callback,
        })
    }

    fn detach(&self) {
        let _ = self.target.remove_event_listener_with_callback(
            self.event,
            self.callback.as_ref().unchecked_ref(),
        );
    }
}

pub(crate) struct DomHost {
    window: Window,
    document: Document,
    ids: ElementIds,
    page: Weak<RefCell<Page>>,
    started: Instant,

    cards: Vec<Option<HtmlElement>>,
    toasts: HashMap<ToastId, Element>,

    frame_callback: Callback,
    frame_handle: Option<i32>,
    wakeup_callback: Callback,
    /// Outstanding timeouts with their due time.
    wakeups: Vec<(i32, Duration)>,

    listeners: Vec<Listener>,
    toast_listener_attached: bool,
    detached: bool,
}

impl DomHost {
    pub(crate) fn new(
        window: Window,
        document: Document,
        ids: ElementIds,
        page: Weak<RefCell<Page>>,
    ) -> Self {
        let frame_page = page.clone();
        let frame_callback = Closure::<dyn FnMut()>::new(move || {
            with_page(&frame_page, |page| {
                page.host_mut().frame_handle = None;
                page.run_frame();
            });
        });
        let wakeup_page = page.clone();
        let wakeup_callback = Closure::<dyn FnMut()>::new(move || {
            with_page(&wakeup_page, |page| page.on_wakeup());
        });
        Self {
            window,
            document,
            ids,
            page,
            started: Instant::now(),
            cards: Vec::new(),
            toasts: HashMap::new(),
            frame_callback,
            frame_handle: None,
            wakeup_callback,
            wakeups: Vec::new(),
            listeners: Vec::new(),
            toast_listener_attached: false,
            detached: false,
        }
    }

    // -----------------------------------------------------------------------
    // Listener wiring
    // -----------------------------------------------------------------------

    /// Wire the theme toggle button, if the page has one.
    pub(crate) fn listen_toggle(&mut self) {
        if self.detached {
            return;
        }
        let Some(button) = self.document.get_element_by_id(&self.ids.theme_toggle) else {
            debug!(id = %self.ids.theme_toggle, "no theme toggle on page");
            return;
        };
        let page = self.page.clone();
        let callback = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            with_page(&page, |page| {
                page.toggle_theme();
            });
        });
        self.listeners
            .extend(Listener::attach(&button, "click", callback, false));
    }

    /// Passive window scroll listener feeding the sway animator.
    pub(crate) fn listen_scroll(&mut self) {
        if self.detached {
            return;
        }
        let page = self.page.clone();
        let callback = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            with_page(&page, |page| page.on_scroll());
        });
        self.listeners
            .extend(Listener::attach(&self.window, "scroll", callback, true));
    }

    fn listen_card_clicks(&mut self, grid: &Element) {
        let page = self.page.clone();
        let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(index) = delegated_target(&event, CARD_SELECTOR)
                .and_then(|card| card.get_attribute(INDEX_ATTR))
                .and_then(|raw| raw.parse::<usize>().ok())
            else {
                return;
            };
            with_page(&page, |page| {
                page.copy_card(index);
            });
        });
        self.listeners
            .extend(Listener::attach(grid, "click", callback, false));
    }

    fn listen_toast_animations(&mut self, container: &Element) {
        let page = self.page.clone();
        let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(id) = delegated_target(&event, TOAST_SELECTOR)
                .filter(|toast| toast.class_list().contains(HIDING_CLASS))
                .and_then(|toast| toast.get_attribute(TOAST_ID_ATTR))
                .and_then(|raw| raw.parse::<u64>().ok())
            else {
                return;
            };
            with_page(&page, |page| {
                let found = page.toasts().iter().find(|t| t.id.get() == id).map(|t| t.id);
                if let Some(id) = found {
                    page.on_toast_animation_end(id);
                }
            });
        });
        if let Some(listener) = Listener::attach(container, "animationend", callback, false) {
            self.listeners.push(listener);
            self.toast_listener_attached = true;
        }
    }

    /// Remove every listener and cancel outstanding callbacks.
    pub(crate) fn detach(&mut self) {
        self.detached = true;
        for listener in self.listeners.drain(..) {
            listener.detach();
        }
        if let Some(handle) = self.frame_handle.take() {
            let _ = self.window.cancel_animation_frame(handle);
        }
        for (handle, _) in self.wakeups.drain(..) {
            self.window.clear_timeout_with_handle(handle);
        }
    }

    // -----------------------------------------------------------------------
    // DOM building
    // -----------------------------------------------------------------------

    fn create(&self, tag: &str, class: &str) -> Option<Element> {
        let el = self.document.create_element(tag).ok()?;
        el.set_class_name(class);
        Some(el)
    }

    fn build_card(&self, card: &SwatchCard) -> Option<HtmlElement> {
        let root: HtmlElement = self.create("div", "swatch-card")?.dyn_into().ok()?;
        let _ = root.set_attribute(INDEX_ATTR, &card.index.to_string());
        if let Some(ink) = card.ink() {
            let _ = root.set_attribute("data-ink", ink.as_str());
        }
        let style = root.style();
        let placement = card.placement;
        let _ = style.set_property("--rotate", &format!("{}deg", placement.rotate_deg));
        let _ = style.set_property("--tx", &format!("{}px", placement.offset_x_px));
        let _ = style.set_property("margin-bottom", &format!("{}px", placement.gap_px));

        let swatch: HtmlElement = self.create("div", "swatch-color")?.dyn_into().ok()?;
        let _ = swatch
            .style()
            .set_property("background-color", card.color.as_str());

        let info = self.create("div", "swatch-info")?;
        let name = self.create("div", "swatch-name")?;
        name.set_text_content(Some(&card.display_name));
        let hex = self.create("div", "swatch-hex")?;
        hex.set_text_content(Some(&card.hex_label()));

        info.append_child(&name).ok()?;
        info.append_child(&hex).ok()?;
        root.append_child(&swatch).ok()?;
        root.append_child(&info).ok()?;
        Some(root)
    }

    fn toast_container(&mut self) -> Option<Element> {
        let container = match self.document.get_element_by_id(&self.ids.toast_container) {
            Some(existing) => existing,
            None => {
                let created = self.create("div", "toast-container")?;
                created.set_id(&self.ids.toast_container);
                self.document.body()?.append_child(&created).ok()?;
                created
            }
        };
        if !self.toast_listener_attached && !self.detached {
            self.listen_toast_animations(&container);
        }
        Some(container)
    }

    fn build_toast(&self, toast: &Toast) -> Option<(Element, Element)> {
        let root = self.create("div", "toast")?;
        let _ = root.set_attribute(TOAST_ID_ATTR, &toast.id.get().to_string());
        let icon_box = self.create("div", "toast-icon")?;
        let icon = self.document.create_element("i").ok()?;
        let _ = icon.set_attribute("data-lucide", toast.kind.icon());
        let _ = icon.set_attribute("size", "20");
        let text = self.document.create_element("span").ok()?;
        text.set_text_content(Some(&toast.message));

        icon_box.append_child(&icon).ok()?;
        root.append_child(&icon_box).ok()?;
        root.append_child(&text).ok()?;
        Some((root, icon))
    }

    /// `lucide.createIcons({ nodes: [node] })`, only if the helper is loaded.
    fn materialize_icon(&self, node: &Element) {
        let Ok(lucide) = Reflect::get(&self.window, &JsValue::from_str("lucide")) else {
            return;
        };
        if !lucide.is_object() {
            return;
        }
        let Ok(create) = Reflect::get(&lucide, &JsValue::from_str("createIcons")) else {
            return;
        };
        let Ok(create) = create.dyn_into::<Function>() else {
            return;
        };
        let options = Object::new();
        let nodes = Array::of1(node);
        let _ = Reflect::set(&options, &JsValue::from_str("nodes"), &nodes);
        if let Err(err) = create.call1(&lucide, &options) {
            warn!(error = %js_error_message(&err), "icon helper failed");
        }
    }
}

impl PageHost for DomHost {
    fn now(&self) -> Duration {
        self.started.elapsed()
    }

    fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(0.0)
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn set_dark_mode(&mut self, dark: bool) {
        let Some(body) = self.document.body() else {
            return;
        };
        let _ = body.class_list().toggle_with_force(DARK_MODE_CLASS, dark);
    }

    fn set_toggle_icon(&mut self, icon: &'static str) {
        let Some(icon_el) = self
            .document
            .get_element_by_id(&self.ids.theme_toggle)
            .and_then(|button| button.query_selector("i").ok().flatten())
        else {
            return;
        };
        let _ = icon_el.set_attribute("data-lucide", icon);
        self.materialize_icon(&icon_el);
    }

    fn mount_cards(&mut self, cards: &[SwatchCard]) -> bool {
        let Some(grid) = self.document.get_element_by_id(&self.ids.palette_grid) else {
            return false;
        };
        let fragment = self.document.create_document_fragment();
        let mut mounted = Vec::with_capacity(cards.len());
        for card in cards {
            let el = self
                .build_card(card)
                .filter(|el| fragment.append_child(el).is_ok());
            if el.is_none() {
                warn!(path = %card.path, "failed to build swatch card");
            }
            mounted.push(el);
        }
        if let Err(err) = grid.append_child(&fragment) {
            warn!(error = %js_error_message(&err), "failed to attach palette cards");
            return false;
        }
        self.cards = mounted;
        if !self.detached {
            self.listen_card_clicks(&grid);
        }
        true
    }

    fn apply_offsets(&mut self, offsets: &[f64]) {
        let slots = self.cards.iter().zip(offsets);
        for (card, x) in slots.filter_map(|(card, x)| Some((card.as_ref()?, x))) {
            let _ = card.style().set_property("--tx", &format!("{x}px"));
        }
    }

    fn write_clipboard(&mut self, text: &str) {
        let promise = self.window.navigator().clipboard().write_text(text);
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = wasm_bindgen_futures::JsFuture::from(promise).await {
                warn!(error = %js_error_message(&err), "clipboard write rejected");
            }
        });
    }

    fn mount_toast(&mut self, toast: &Toast) {
        let Some(container) = self.toast_container() else {
            return;
        };
        let Some((el, icon)) = self.build_toast(toast) else {
            return;
        };
        if container.append_child(&el).is_ok() {
            self.materialize_icon(&icon);
            self.toasts.insert(toast.id, el);
        }
    }

    fn hide_toast(&mut self, id: ToastId) {
        if let Some(el) = self.toasts.get(&id) {
            let _ = el.class_list().add_1(HIDING_CLASS);
        }
    }

    fn remove_toast(&mut self, id: ToastId) {
        if let Some(el) = self.toasts.remove(&id) {
            el.remove();
        }
    }

    fn request_frame(&mut self) -> bool {
        if self.frame_handle.is_some() {
            return true;
        }
        if self.detached {
            return false;
        }
        match self
            .window
            .request_animation_frame(self.frame_callback.as_ref().unchecked_ref())
        {
            Ok(handle) => {
                self.frame_handle = Some(handle);
                true
            }
            Err(err) => {
                warn!(error = %js_error_message(&err), "requestAnimationFrame failed");
                false
            }
        }
    }

    fn schedule_wakeup(&mut self, delay: Duration) {
        if self.detached {
            return;
        }
        let now = self.now();
        self.wakeups.retain(|(_, due)| *due > now);
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                self.wakeup_callback.as_ref().unchecked_ref(),
                millis,
            ) {
            Ok(handle) => self.wakeups.push((handle, now.saturating_add(delay))),
            Err(err) => warn!(error = %js_error_message(&err), "setTimeout failed"),
        }
    }
}

impl Drop for DomHost {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Nearest ancestor-or-self of the event target matching `selector`.
fn delegated_target(event: &Event, selector: &str) -> Option<Element> {
    event
        .target()?
        .dyn_into::<Element>()
        .ok()?
        .closest(selector)
        .ok()
        .flatten()
}

/// Run `f` against the page if it is still alive and not already borrowed.
fn with_page(page: &Weak<RefCell<Page>>, f: impl FnOnce(&mut Page)) {
    let Some(page) = page.upgrade() else {
        return;
    };
    let Ok(mut page) = page.try_borrow_mut() else {
        warn!("page busy, dropping re-entrant event");
        return;
    };
    f(&mut page);
}
