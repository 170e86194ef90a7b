#![forbid(unsafe_code)]

//! Transient acknowledgement toasts.
//!
//! [`ToastQueue`] owns toast lifecycles against a host-driven monotonic clock
//! (the host passes `now` in; nothing here reads wall time). A toast moves
//! through two phases:
//!
//! ```text
//! notify ──► Visible ──(display window)──► Hiding ──► removed
//!                                            │  ▲
//!                                            │  └─ exit animation finished
//!                                            └──── exit fallback elapsed
//! ```
//!
//! # Invariants
//!
//! 1. Toasts are kept in creation order (the host appends in that order).
//! 2. A toast is never removed while still `Visible`.
//! 3. Every toast is gone no later than `display + exit_fallback` after
//!    creation, even if the host never reports the animation end.

use web_time::Duration;

/// Default time a toast stays fully visible.
pub const TOAST_DISPLAY: Duration = Duration::from_millis(3000);

/// Default grace period for the exit animation before forced removal.
pub const TOAST_EXIT_FALLBACK: Duration = Duration::from_millis(1000);

/// Stable toast identifier, unique per queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl ToastId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Toast flavor; selects the icon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ToastKind {
    #[default]
    Success,
    Info,
}

impl ToastKind {
    /// Icon glyph name (`data-lucide` value).
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Success => "check-circle",
            Self::Info => "info",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Visible,
    Hiding,
}

/// A toast as the host should present it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub kind: ToastKind,
    pub message: String,
}

/// State change the host must mirror in the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastTransition {
    /// Start the exit animation.
    Hide(ToastId),
    /// Detach the toast element.
    Remove(ToastId),
}

/// Timing knobs for [`ToastQueue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastTimings {
    pub display: Duration,
    pub exit_fallback: Duration,
}

impl Default for ToastTimings {
    fn default() -> Self {
        Self {
            display: TOAST_DISPLAY,
            exit_fallback: TOAST_EXIT_FALLBACK,
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    toast: Toast,
    phase: ToastPhase,
    /// Hide deadline while visible, removal deadline while hiding.
    deadline: Duration,
}

/// Ordered set of live toasts.
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    entries: Vec<Entry>,
    next_id: u64,
    timings: ToastTimings,
}

impl ToastQueue {
    #[must_use]
    pub fn new(timings: ToastTimings) -> Self {
        Self {
            timings,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn timings(&self) -> ToastTimings {
        self.timings
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current phase of a live toast.
    #[must_use]
    pub fn phase(&self, id: ToastId) -> Option<ToastPhase> {
        self.entries
            .iter()
            .find(|e| e.toast.id == id)
            .map(|e| e.phase)
    }

    /// Live toasts in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.entries.iter().map(|e| &e.toast)
    }

    /// Append a visible toast created at `now`.
    pub fn notify(&mut self, message: impl Into<String>, kind: ToastKind, now: Duration) -> Toast {
        let id = ToastId(self.next_id);
        self.next_id += 1;
        let toast = Toast {
            id,
            kind,
            message: message.into(),
        };
        self.entries.push(Entry {
            toast: toast.clone(),
            phase: ToastPhase::Visible,
            deadline: now.saturating_add(self.timings.display),
        });
        toast
    }

    /// Advance to `now`, returning transitions in creation order.
    ///
    /// A toast whose display window and exit fallback have both elapsed by
    /// `now` yields `Hide` followed by `Remove` in the same call.
    pub fn tick(&mut self, now: Duration) -> Vec<ToastTransition> {
        let mut transitions = Vec::new();
        let exit_fallback = self.timings.exit_fallback;
        self.entries.retain_mut(|entry| {
            if entry.phase == ToastPhase::Visible && now >= entry.deadline {
                entry.phase = ToastPhase::Hiding;
                entry.deadline = entry.deadline.saturating_add(exit_fallback);
                transitions.push(ToastTransition::Hide(entry.toast.id));
            }
            if entry.phase == ToastPhase::Hiding && now >= entry.deadline {
                transitions.push(ToastTransition::Remove(entry.toast.id));
                return false;
            }
            true
        });
        transitions
    }

    /// The exit animation of `id` completed. Returns `true` if it was removed.
    ///
    /// Ignored for toasts that are still visible or already gone.
    pub fn animation_finished(&mut self, id: ToastId) -> bool {
        let Some(pos) = self
            .entries
            .iter()
            .position(|e| e.toast.id == id && e.phase == ToastPhase::Hiding)
        else {
            return false;
        };
        self.entries.remove(pos);
        true
    }

    /// Delay from `now` until the next transition is due, if any toast is live.
    #[must_use]
    pub fn next_deadline(&self, now: Duration) -> Option<Duration> {
        self.entries
            .iter()
            .map(|e| e.deadline.saturating_sub(now))
            .min()
    }

    /// Drop every toast. Returns the ids that were live, for view cleanup.
    pub fn clear(&mut self) -> Vec<ToastId> {
        self.entries.drain(..).map(|e| e.toast.id).collect()
    }
}
