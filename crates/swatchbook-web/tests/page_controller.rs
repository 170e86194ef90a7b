//! Page controller behavior against a recording host.
//!
//! Run:
//!   cargo test -p swatchbook-web --test page_controller

use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use swatchbook_core::{
    LayoutStrategy, MemorySlot, PreferenceSlot, ShowcaseConfig, ShowcaseError, SwatchCard,
    ThemeDocument, ThemeMode, Toast, ToastId, ToastKind, ToastPhase,
};
use swatchbook_web::{PageHost, ShowcasePage};
use tracing_test::traced_test;
use web_time::Duration;

// ============================================================================
// Recording host
// ============================================================================

#[derive(Debug)]
struct RecordingHost {
    now: Duration,
    width: f64,
    scroll_y: f64,
    has_grid: bool,
    dark: bool,
    icon: Option<&'static str>,
    mounted: Vec<SwatchCard>,
    mount_batches: usize,
    offset_writes: Vec<Vec<f64>>,
    clipboard: Vec<String>,
    toasts: Vec<Toast>,
    hidden: Vec<ToastId>,
    removed: Vec<ToastId>,
    frame_requests: usize,
    frames_fail: bool,
    wakeups: Vec<Duration>,
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            width: 1280.0,
            scroll_y: 0.0,
            has_grid: true,
            dark: false,
            icon: None,
            mounted: Vec::new(),
            mount_batches: 0,
            offset_writes: Vec::new(),
            clipboard: Vec::new(),
            toasts: Vec::new(),
            hidden: Vec::new(),
            removed: Vec::new(),
            frame_requests: 0,
            frames_fail: false,
            wakeups: Vec::new(),
        }
    }
}

impl PageHost for RecordingHost {
    fn now(&self) -> Duration {
        self.now
    }

    fn viewport_width(&self) -> f64 {
        self.width
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn set_dark_mode(&mut self, dark: bool) {
        self.dark = dark;
    }

    fn set_toggle_icon(&mut self, icon: &'static str) {
        self.icon = Some(icon);
    }

    fn mount_cards(&mut self, cards: &[SwatchCard]) -> bool {
        if !self.has_grid {
            return false;
        }
        self.mount_batches += 1;
        self.mounted.extend_from_slice(cards);
        true
    }

    fn apply_offsets(&mut self, offsets: &[f64]) {
        self.offset_writes.push(offsets.to_vec());
    }

    fn write_clipboard(&mut self, text: &str) {
        self.clipboard.push(text.to_owned());
    }

    fn mount_toast(&mut self, toast: &Toast) {
        self.toasts.push(toast.clone());
    }

    fn hide_toast(&mut self, id: ToastId) {
        self.hidden.push(id);
    }

    fn remove_toast(&mut self, id: ToastId) {
        self.removed.push(id);
    }

    fn request_frame(&mut self) -> bool {
        self.frame_requests += 1;
        !self.frames_fail
    }

    fn schedule_wakeup(&mut self, delay: Duration) {
        self.wakeups.push(delay);
    }
}

type TestPage = ShowcasePage<RecordingHost, MemorySlot, SmallRng>;

fn page_with(config: ShowcaseConfig, slot: MemorySlot) -> TestPage {
    ShowcasePage::new(
        config,
        RecordingHost::default(),
        slot,
        SmallRng::seed_from_u64(42),
    )
}

fn page() -> TestPage {
    page_with(ShowcaseConfig::default(), MemorySlot::new())
}

fn s_curve_config() -> ShowcaseConfig {
    ShowcaseConfig {
        layout: LayoutStrategy::SCurve,
        ..ShowcaseConfig::default()
    }
}

fn two_color_doc() -> ThemeDocument {
    ThemeDocument::from_json_str(r##"{"brand": {"primary": "#FF0000"}, "functional": {"ok": "#00FF00"}}"##)
        .unwrap()
}

fn advance(page: &mut TestPage, ms: u64) {
    page.host_mut().now += Duration::from_millis(ms);
    page.on_wakeup();
}

// ============================================================================
// Theme
// ============================================================================

#[test]
fn init_theme_applies_persisted_dark_mode() {
    let mut page = page_with(
        ShowcaseConfig::default(),
        MemorySlot::new().with("theme", "dark"),
    );
    page.init_theme();
    assert!(page.host().dark);
    assert_eq!(page.host().icon, Some("sun"));
}

#[test]
fn init_theme_light_only_sets_icon() {
    let mut page = page();
    page.init_theme();
    assert!(!page.host().dark);
    assert_eq!(page.host().icon, Some("moon"));
}

#[test]
fn double_toggle_restores_class_and_preference() {
    let mut page = page();
    page.init_theme();
    assert_eq!(page.toggle_theme(), ThemeMode::Dark);
    assert!(page.host().dark);
    assert_eq!(
        page.theme_store().slot().read("theme").as_deref(),
        Some("dark")
    );

    assert_eq!(page.toggle_theme(), ThemeMode::Light);
    assert!(!page.host().dark);
    assert_eq!(page.host().icon, Some("moon"));
    assert_eq!(
        page.theme_store().slot().read("theme").as_deref(),
        Some("light")
    );
}

#[test]
fn custom_storage_key_is_used() {
    let config = ShowcaseConfig {
        storage_key: "swatchbook-theme".into(),
        ..ShowcaseConfig::default()
    };
    let mut page = page_with(config, MemorySlot::new().with("theme", "dark"));
    assert_eq!(page.theme_mode(), ThemeMode::Light);
    page.toggle_theme();
    assert_eq!(
        page.theme_store().slot().read("swatchbook-theme").as_deref(),
        Some("dark")
    );
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn renders_one_card_per_color_in_one_batch() {
    let mut page = page();
    assert_eq!(page.render(&two_color_doc()), 2);
    let host = page.host();
    assert_eq!(host.mount_batches, 1);
    let labels: Vec<_> = host.mounted.iter().map(SwatchCard::hex_label).collect();
    assert_eq!(labels, ["#FF0000", "#00FF00"]);
    let names: Vec<_> = host.mounted.iter().map(|c| c.display_name.as_str()).collect();
    assert_eq!(names, ["Primary", "Ok"]);
}

#[test]
fn hex_label_is_uppercased_but_clipboard_gets_raw_value() {
    let mut page = page();
    let doc = ThemeDocument::from_json_str(r##"{"brand": {"soft_teal": "#5fb3b3"}}"##).unwrap();
    page.render(&doc);
    assert_eq!(page.cards()[0].hex_label(), "#5FB3B3");
    page.copy_card(0);
    assert_eq!(page.host().clipboard, ["#5fb3b3"]);
    assert_eq!(page.host().toasts[0].message, "Copied #5fb3b3 to clipboard");
}

#[traced_test]
#[test]
fn load_failure_leaves_grid_empty() {
    let mut page = page();
    let count = page.load(Err(ShowcaseError::fetch("theme.json", "HTTP 404 Not Found")));
    assert_eq!(count, 0);
    assert_eq!(page.host().mount_batches, 0);
    assert!(page.cards().is_empty());
    assert!(logs_contain("failed to load theme document"));
}

#[test]
fn load_success_renders() {
    let mut page = page();
    assert_eq!(page.load(Ok(two_color_doc())), 2);
}

#[test]
fn missing_grid_is_a_silent_no_op() {
    let mut page = page();
    page.host_mut().has_grid = false;
    assert_eq!(page.render(&two_color_doc()), 0);
    assert!(page.cards().is_empty());
    assert_eq!(page.copy_card(0), None);
    assert!(page.host().clipboard.is_empty());
}

#[test]
fn s_curve_layout_is_deterministic() {
    let doc = ThemeDocument::from_json_str(
        r##"{"brand": {"a": "#000001", "b": "#000002", "c": "#000003", "d": "#000004"}}"##,
    )
    .unwrap();
    let mut first = page_with(s_curve_config(), MemorySlot::new());
    let mut second = ShowcasePage::new(
        s_curve_config(),
        RecordingHost::default(),
        MemorySlot::new(),
        SmallRng::seed_from_u64(7),
    );
    first.render(&doc);
    second.render(&doc);
    for (a, b) in first.cards().iter().zip(second.cards()) {
        assert_eq!(a.placement.offset_x_px, b.placement.offset_x_px);
        assert_eq!(
            a.placement.offset_x_px,
            120.0 * (a.index as f64 * 0.6).sin()
        );
        assert_eq!(a.placement.gap_px, 80.0);
    }
}

#[test]
fn narrow_viewport_uses_compact_ranges() {
    let mut page = page_with(s_curve_config(), MemorySlot::new());
    page.host_mut().width = 375.0;
    page.render(&two_color_doc());
    assert_eq!(page.cards()[1].placement.offset_x_px, 30.0 * 0.6_f64.sin());
    assert_eq!(page.cards()[1].placement.gap_px, 50.0);
}

// ============================================================================
// Toasts
// ============================================================================

#[test]
fn copy_shows_one_toast_and_removes_it_on_animation_end() {
    let mut page = page();
    let doc = ThemeDocument::from_json_str(r##"{"brand": {"x": "#ABCDEF"}}"##).unwrap();
    page.render(&doc);

    let id = page.copy_card(0).unwrap();
    assert_eq!(page.host().clipboard, ["#ABCDEF"]);
    assert_eq!(page.host().toasts.len(), 1);
    assert_eq!(page.host().toasts[0].message, "Copied #ABCDEF to clipboard");
    assert_eq!(page.host().toasts[0].kind, ToastKind::Success);
    assert_eq!(page.host().wakeups, [Duration::from_millis(3000)]);

    advance(&mut page, 2999);
    assert!(page.host().hidden.is_empty());
    advance(&mut page, 1);
    assert_eq!(page.host().hidden, [id]);
    assert_eq!(page.toasts().phase(id), Some(ToastPhase::Hiding));

    page.on_toast_animation_end(id);
    assert_eq!(page.host().removed, [id]);
    assert!(page.toasts().is_empty());
}

#[test]
fn toast_is_removed_by_fallback_when_animation_event_is_missed() {
    let mut page = page();
    let id = page.notify("Saved", ToastKind::Info).unwrap();
    advance(&mut page, 3000);
    assert_eq!(page.host().hidden, [id]);
    assert_eq!(
        page.host().wakeups,
        [Duration::from_millis(3000), Duration::from_millis(1000)]
    );
    advance(&mut page, 1000);
    assert_eq!(page.host().removed, [id]);
    assert!(page.toasts().is_empty());
}

#[test]
fn early_wakeup_rearms_until_toast_is_hidden_and_removed() {
    let mut page = page();
    let id = page.notify("early", ToastKind::Success).unwrap();

    advance(&mut page, 2999);
    assert_eq!(page.toasts().phase(id), Some(ToastPhase::Visible));
    assert!(page.host().hidden.is_empty());
    assert_eq!(
        page.host().wakeups,
        [Duration::from_millis(3000), Duration::from_millis(1)]
    );

    advance(&mut page, 1);
    assert_eq!(page.host().hidden, [id]);
    assert_eq!(page.host().wakeups.last(), Some(&Duration::from_millis(1000)));

    advance(&mut page, 999);
    assert!(page.host().removed.is_empty());
    advance(&mut page, 1);
    assert_eq!(page.host().removed, [id]);
    assert!(page.toasts().is_empty());
}

#[test]
fn wakeup_rearms_for_the_next_toast_in_line() {
    let mut page = page();
    let first = page.notify("first", ToastKind::Info).unwrap();
    page.host_mut().now = Duration::from_millis(500);
    let second = page.notify("second", ToastKind::Info).unwrap();

    advance(&mut page, 2500);
    assert_eq!(page.host().hidden, [first]);
    assert_eq!(page.host().wakeups.last(), Some(&Duration::from_millis(500)));

    advance(&mut page, 500);
    assert_eq!(page.host().hidden, [first, second]);
}

#[test]
fn idle_wakeup_does_not_rearm() {
    let mut page = page();
    advance(&mut page, 5000);
    assert!(page.host().wakeups.is_empty());
}

#[test]
fn animation_end_before_hiding_is_ignored() {
    let mut page = page();
    let id = page.notify("early", ToastKind::Success).unwrap();
    page.on_toast_animation_end(id);
    assert!(page.host().removed.is_empty());
    assert_eq!(page.toasts().len(), 1);
}

#[test]
fn toasts_stack_in_creation_order() {
    let mut page = page();
    page.render(&two_color_doc());
    page.copy_card(1);
    page.copy_card(0);
    let messages: Vec<_> = page.host().toasts.iter().map(|t| t.message.as_str()).collect();
    assert_eq!(
        messages,
        ["Copied #00FF00 to clipboard", "Copied #FF0000 to clipboard"]
    );
}

// ============================================================================
// Sway
// ============================================================================

#[test]
fn sway_applies_initial_offsets_and_coalesces_scrolls() {
    let mut page = page();
    page.render(&two_color_doc());
    assert!(page.start_sway());
    assert_eq!(page.host().offset_writes.len(), 1);
    assert_eq!(page.host().offset_writes[0].len(), 2);

    for _ in 0..25 {
        page.on_scroll();
    }
    assert_eq!(page.host().frame_requests, 1);

    page.host_mut().scroll_y = 640.0;
    page.run_frame();
    assert_eq!(page.host().offset_writes.len(), 2);

    let sway = page.sway().unwrap();
    let expected: Vec<f64> = sway.tracks().iter().map(|t| t.offset_at(640.0)).collect();
    assert_eq!(page.host().offset_writes[1], expected);

    page.on_scroll();
    assert_eq!(page.host().frame_requests, 2);
}

#[test]
fn failed_frame_request_is_retried_on_next_scroll() {
    let mut page = page();
    page.render(&two_color_doc());
    page.start_sway();

    page.host_mut().frames_fail = true;
    page.on_scroll();
    assert_eq!(page.host().frame_requests, 1);
    assert!(!page.sway().unwrap().is_frame_pending());

    page.host_mut().frames_fail = false;
    page.on_scroll();
    page.on_scroll();
    assert_eq!(page.host().frame_requests, 2);
    assert!(page.sway().unwrap().is_frame_pending());
}

#[test]
fn sway_tracks_start_from_card_offsets() {
    let mut page = page();
    page.render(&two_color_doc());
    page.start_sway();
    let bases: Vec<f64> = page.sway().unwrap().tracks().iter().map(|t| t.base_x).collect();
    let offsets: Vec<f64> = page.cards().iter().map(|c| c.placement.offset_x_px).collect();
    assert_eq!(bases, offsets);
}

#[test]
fn s_curve_never_animates() {
    let mut page = page_with(s_curve_config(), MemorySlot::new());
    page.render(&two_color_doc());
    assert!(!page.start_sway());
    page.on_scroll();
    page.run_frame();
    assert_eq!(page.host().frame_requests, 0);
    assert!(page.host().offset_writes.is_empty());
}

// ============================================================================
// Teardown
// ============================================================================

#[test]
fn teardown_stops_sway_and_clears_toasts() {
    let mut page = page();
    page.render(&two_color_doc());
    page.start_sway();
    let a = page.copy_card(0).unwrap();
    let b = page.notify("second", ToastKind::Info).unwrap();

    page.teardown();
    assert!(page.is_torn_down());
    assert!(page.sway().is_none());
    assert_eq!(page.host().removed, [a, b]);

    page.on_scroll();
    assert_eq!(page.host().frame_requests, 0);
    assert!(!page.start_sway());
}

#[test]
fn torn_down_page_ignores_copies_and_notifications() {
    let mut page = page();
    page.render(&two_color_doc());
    page.teardown();

    assert_eq!(page.copy_card(0), None);
    assert_eq!(page.notify("late", ToastKind::Info), None);
    let host = page.host();
    assert!(host.clipboard.is_empty());
    assert!(host.toasts.is_empty());
    assert!(host.wakeups.is_empty());
    assert!(page.toasts().is_empty());
}
