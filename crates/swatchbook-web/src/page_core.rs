#![forbid(unsafe_code)]

//! Host-independent page controller.
//!
//! [`ShowcasePage`] owns all per-page state (cards, sway animator, toast
//! queue, theme store) and talks to the outside world only through
//! [`PageHost`]. The wasm module implements the host over the DOM; native
//! tests implement it with a recorder.
//!
//! Page lifecycle:
//!
//! ```text
//! init_theme ─► load(fetch result) ─► render ─► start_sway (random-sway only)
//!                                         │
//!        clicks / scroll / frames / timers ◄┘  ... teardown
//! ```

use rand::Rng;
use tracing::{debug, error, info, warn};
use web_time::Duration;

use swatchbook_core::{
    LayoutStrategy, PreferenceSlot, Result, ShowcaseConfig, SwatchCard, SwatchRenderer,
    SwayAnimator, ThemeDocument, ThemeMode, ThemeStore, Toast, ToastId, ToastKind, ToastQueue,
    ToastTransition, Viewport, flatten_document,
};

/// Shortest delay handed to [`PageHost::schedule_wakeup`] when re-arming.
const MIN_WAKEUP: Duration = Duration::from_millis(1);

/// Everything the page needs from its environment.
///
/// Hosts treat missing elements as silent no-ops.
pub trait PageHost {
    /// Monotonic time since page start.
    fn now(&self) -> Duration;
    fn viewport_width(&self) -> f64;
    fn scroll_y(&self) -> f64;

    fn set_dark_mode(&mut self, dark: bool);
    /// Point the toggle button at `icon` and re-materialize icons if an icon helper exists.
    fn set_toggle_icon(&mut self, icon: &'static str);

    /// Append all cards to the grid in one batch. Returns `false` if there is no grid.
    fn mount_cards(&mut self, cards: &[SwatchCard]) -> bool;
    /// Write one horizontal offset per mounted card, in card order.
    fn apply_offsets(&mut self, offsets: &[f64]);
    /// Fire-and-forget clipboard write.
    fn write_clipboard(&mut self, text: &str);

    /// Append a toast, creating the shared container on first use.
    fn mount_toast(&mut self, toast: &Toast);
    fn hide_toast(&mut self, id: ToastId);
    fn remove_toast(&mut self, id: ToastId);

    /// Ask for one animation-frame callback into [`ShowcasePage::run_frame`].
    /// Returns `false` if the request could not be made.
    fn request_frame(&mut self) -> bool;
    /// Ask for a callback into [`ShowcasePage::on_wakeup`] after `delay`.
    fn schedule_wakeup(&mut self, delay: Duration);
}

/// Page state plus its host.
pub struct ShowcasePage<H, S, R> {
    host: H,
    config: ShowcaseConfig,
    theme: ThemeStore<S>,
    renderer: SwatchRenderer,
    rng: R,
    cards: Vec<SwatchCard>,
    sway: Option<SwayAnimator>,
    toasts: ToastQueue,
    torn_down: bool,
}

impl<H, S, R> ShowcasePage<H, S, R>
where
    H: PageHost,
    S: PreferenceSlot,
    R: Rng,
{
    pub fn new(config: ShowcaseConfig, host: H, slot: S, rng: R) -> Self {
        let theme = ThemeStore::load(slot, config.storage_key.clone());
        Self {
            renderer: SwatchRenderer::new(config.layout),
            toasts: ToastQueue::new(config.toast_timings()),
            host,
            config,
            theme,
            rng,
            cards: Vec::new(),
            sway: None,
            torn_down: false,
        }
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub fn config(&self) -> &ShowcaseConfig {
        &self.config
    }

    #[must_use]
    pub fn cards(&self) -> &[SwatchCard] {
        &self.cards
    }

    #[must_use]
    pub fn theme_mode(&self) -> ThemeMode {
        self.theme.mode()
    }

    #[must_use]
    pub fn theme_store(&self) -> &ThemeStore<S> {
        &self.theme
    }

    #[must_use]
    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    #[must_use]
    pub fn sway(&self) -> Option<&SwayAnimator> {
        self.sway.as_ref()
    }

    // -----------------------------------------------------------------------
    // Theme
    // -----------------------------------------------------------------------

    /// Reflect the persisted preference in the view.
    pub fn init_theme(&mut self) {
        let mode = self.theme.mode();
        if mode.is_dark() {
            self.host.set_dark_mode(true);
        }
        self.host.set_toggle_icon(mode.toggle_icon());
    }

    /// Toggle-button action.
    pub fn toggle_theme(&mut self) -> ThemeMode {
        let mode = self.theme.toggle();
        self.host.set_dark_mode(mode.is_dark());
        self.host.set_toggle_icon(mode.toggle_icon());
        debug!(mode = mode.as_str(), "theme toggled");
        mode
    }

    // -----------------------------------------------------------------------
    // Palette
    // -----------------------------------------------------------------------

    /// Render a fetched document, or log the failure and leave the grid empty.
    pub fn load(&mut self, fetched: Result<ThemeDocument>) -> usize {
        match fetched {
            Ok(doc) => self.render(&doc),
            Err(err) => {
                error!(
                    path = %self.config.document_path,
                    error = %err,
                    "failed to load theme document"
                );
                0
            }
        }
    }

    /// Flatten, lay out, and mount every color card. Returns the number mounted.
    pub fn render(&mut self, doc: &ThemeDocument) -> usize {
        let entries = flatten_document(doc, &self.config.groups);
        let breakpoint = self.config.narrow_breakpoint_px;
        let host = &self.host;
        let cards = self.renderer.build_cards(
            entries,
            || Viewport::new(host.viewport_width()).with_breakpoint(breakpoint),
            &mut self.rng,
        );
        if !self.host.mount_cards(&cards) {
            warn!(count = cards.len(), "palette grid missing, cards not mounted");
            return 0;
        }
        info!(
            count = cards.len(),
            layout = ?self.renderer.strategy(),
            "palette rendered"
        );
        self.cards = cards;
        self.cards.len()
    }

    /// Card click: copy the raw color and acknowledge with a toast.
    ///
    /// No-op once the page is torn down.
    pub fn copy_card(&mut self, index: usize) -> Option<ToastId> {
        if self.torn_down {
            return None;
        }
        let card = self.cards.get(index)?;
        let color = card.color.as_str().to_owned();
        let message = card.copy_message();
        self.host.write_clipboard(&color);
        self.notify(message, ToastKind::Success)
    }

    // -----------------------------------------------------------------------
    // Sway
    // -----------------------------------------------------------------------

    /// Start the scroll sway if the layout calls for it, applying the initial
    /// offsets immediately. Returns whether the animator is running.
    pub fn start_sway(&mut self) -> bool {
        if !self.renderer.strategy().animates_on_scroll() || self.torn_down {
            return false;
        }
        let bases = self.cards.iter().map(|c| c.placement.offset_x_px);
        let mut animator = SwayAnimator::with_random_tracks(bases, &mut self.rng);
        let offsets = animator.frame(self.host.scroll_y());
        self.host.apply_offsets(offsets);
        debug!(tracks = animator.tracks().len(), "sway animator started");
        self.sway = Some(animator);
        true
    }

    /// Scroll listener. Requests at most one frame per burst.
    pub fn on_scroll(&mut self) {
        let Some(sway) = self.sway.as_mut() else {
            return;
        };
        if sway.on_scroll() && !self.host.request_frame() {
            sway.cancel_frame();
        }
    }

    /// Animation-frame callback: read every offset, then write them all.
    pub fn run_frame(&mut self) {
        let Some(sway) = self.sway.as_mut() else {
            return;
        };
        let scroll_y = self.host.scroll_y();
        let offsets = sway.frame(scroll_y);
        self.host.apply_offsets(offsets);
    }

    // -----------------------------------------------------------------------
    // Toasts
    // -----------------------------------------------------------------------

    /// Show a toast and make sure a wakeup is pending for its exit.
    ///
    /// Returns `None` once the page is torn down.
    pub fn notify(&mut self, message: impl Into<String>, kind: ToastKind) -> Option<ToastId> {
        if self.torn_down {
            return None;
        }
        let now = self.host.now();
        let toast = self.toasts.notify(message, kind, now);
        self.host.mount_toast(&toast);
        self.host.schedule_wakeup(self.toasts.timings().display);
        Some(toast.id)
    }

    /// Timer callback: apply due toast transitions, then re-arm for the
    /// earliest remaining deadline.
    ///
    /// Timers may fire slightly before the deadline as seen by [`PageHost::now`];
    /// such a wakeup applies nothing and simply re-arms.
    pub fn on_wakeup(&mut self) {
        let now = self.host.now();
        for transition in self.toasts.tick(now) {
            match transition {
                ToastTransition::Hide(id) => self.host.hide_toast(id),
                ToastTransition::Remove(id) => {
                    debug!(toast = id.get(), "toast removed by fallback timer");
                    self.host.remove_toast(id);
                }
            }
        }
        if let Some(delay) = self.toasts.next_deadline(now) {
            self.host.schedule_wakeup(delay.max(MIN_WAKEUP));
        }
    }

    /// Exit-animation completion for a toast.
    pub fn on_toast_animation_end(&mut self, id: ToastId) {
        if self.toasts.animation_finished(id) {
            self.host.remove_toast(id);
        }
    }

    // -----------------------------------------------------------------------
    // Teardown
    // -----------------------------------------------------------------------

    /// Stop the animator and drop all toasts. The sway cannot be restarted.
    pub fn teardown(&mut self) {
        if let Some(mut sway) = self.sway.take() {
            sway.teardown();
        }
        for id in self.toasts.clear() {
            self.host.remove_toast(id);
        }
        self.torn_down = true;
        debug!("page torn down");
    }

    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}

impl<H, S, R> ShowcasePage<H, S, R> {
    /// Layout strategy in effect.
    #[must_use]
    pub fn layout(&self) -> LayoutStrategy {
        self.renderer.strategy()
    }
}
