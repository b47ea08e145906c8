//! Mutable per-console session state.
//!
//! One [`Session`] lives inside each engine instance for the engine's
//! lifetime. The fields are reset piecewise on every menu change rather than
//! wholesale, because some of them (display lock, bootstrap state) span
//! navigation. A second console would simply be a second engine with its own
//! session; nothing here is a singleton.

use super::{InputKind, MenuId};

/// Runtime state of one console session.
#[derive(Debug)]
pub struct Session {
    /// Menu the navigator currently resolves selections against.
    pub(crate) active: MenuId,
    /// Active input-interpretation sub-mode.
    pub(crate) input_kind: InputKind,
    /// Pending numeric input value, 0 when nothing is pending.
    pub(crate) input: u8,
    /// Item count of the active menu, cached at entry.
    pub(crate) item_count: usize,
    /// A selection is confirmed and awaiting dispatch.
    pub(crate) validate_input: bool,
    /// The previous byte was ESC and disambiguation is in progress.
    pub(crate) in_escape: bool,
    /// Absorb one stray byte (tail of a degraded escape sequence).
    pub(crate) flush_next_byte: bool,
    /// First idle tick after a redraw has not happened yet.
    pub(crate) refresh_once: bool,
    /// Suppress all rendering, e.g. while a log burst owns the console.
    pub(crate) display_locked: bool,
    /// Per-menu dirty bitmap; cleared on every menu change.
    pub(crate) config_flags: u32,
    /// Bootstrap has run for the current activation.
    pub(crate) started: bool,
    /// The session ended via an exit item; ticks are no-ops until reactivation.
    pub(crate) released: bool,
}

impl Session {
    pub(crate) fn new(start: MenuId) -> Self {
        Self {
            active: start,
            input_kind: InputKind::Choice,
            input: 0,
            item_count: 0,
            validate_input: false,
            in_escape: false,
            flush_next_byte: false,
            refresh_once: false,
            display_locked: false,
            config_flags: 0,
            started: false,
            released: false,
        }
    }

    /// Reset the selection state for a freshly entered menu.
    pub(crate) fn enter_menu(&mut self, id: MenuId, item_count: usize) {
        self.active = id;
        self.item_count = item_count;
        self.input_kind = InputKind::Choice;
        self.input = 0;
        self.validate_input = false;
        self.refresh_once = true;
        self.config_flags = 0;
    }

    /// Drop a pending selection silently.
    pub(crate) fn reject_input(&mut self) {
        self.input = 0;
        self.validate_input = false;
    }

    /// Menu the session is currently on.
    pub fn active_menu(&self) -> MenuId {
        self.active
    }

    /// Active input sub-mode.
    pub fn input_kind(&self) -> InputKind {
        self.input_kind
    }

    /// Whether rendering is currently suppressed.
    pub fn display_locked(&self) -> bool {
        self.display_locked
    }
}
