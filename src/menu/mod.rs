//! The interactive menu engine and its static data model.
//!
//! A menu tree is a set of [`Menu`] tables built by the embedding application
//! at compile time. Each [`MenuItem`] carries a caption label, a navigation
//! target, and an optional [`Page`] callback. Item 0 of every menu is the
//! page's own title and doubles as the back/quit binding; it is never
//! selectable by number.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Input State    │───▶│   Navigator     │───▶│     Page        │
//! │  Machine        │    │   (Engine)      │    │   Callbacks     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!          │                       │                       │
//!          ▼                       ▼                       ▼
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Escape Timer   │    │    Session      │    │ Decimal / Text  │
//! │                 │    │    State        │    │    Editors      │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! One periodic [`Engine::process`] call pulls at most one byte through the
//! input state machine, which may arm the escape timer or feed an editor; the
//! navigator then interprets the resulting session state, possibly invoking a
//! page callback, which may itself arm an editor for the next tick.

/// Per-item page callbacks and attribute-scoped invocation
pub(crate) mod dispatch;

/// Bounded decimal and text editing sub-modes
pub mod edit;

/// The navigator driving menu state from the periodic tick
pub mod engine;

/// Common error types for engine operations
pub mod error;

/// Lone-ESC disambiguation timer
pub mod escape;

/// Byte classification for the active input sub-mode
pub mod input;

/// Mutable per-console session state
pub mod session;

/// The capability surface handed to page callbacks
pub mod view;

pub use engine::Engine;
pub use error::Error;
pub use session::Session;
pub use view::View;

use crate::console::labels::LabelId;

/// Identifier of a menu page within the static tree.
///
/// IDs are chosen by the embedding application; the engine only compares and
/// looks them up.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct MenuId(pub u16);

/// Identifies which page field a decimal or text edit belongs to.
///
/// Pages pick their own values; the engine hands the ID back unchanged when
/// the edit result is consumed, so a page with several editable fields can
/// tell them apart.
pub type CallerId = u8;

/// Maximum number of items in one menu: the title plus selectors `1`-`9`
/// and `a`-`z`.
pub const MAX_MENU_ITEMS: usize = 36;

/// A single entry of a menu page.
#[derive(Clone, Copy)]
pub struct MenuItem {
    /// Caption label rendered next to the generated selector.
    pub label: LabelId,

    /// Menu to navigate to when the item is selected.
    ///
    /// `None` marks a terminal item: selecting it ends the session and
    /// releases the console. An item targeting its own menu is an in-place
    /// action; its callback receives the input instead of navigation
    /// happening.
    pub target: Option<MenuId>,

    /// Callback driving the item's behavior, if any.
    pub page: Option<&'static dyn Page>,
}

impl core::fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MenuItem")
            .field("label", &self.label)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

/// A static, immutable menu page definition.
///
/// Item 0 is the page title/back binding; items 1.. are listed with generated
/// selectors.
#[derive(Debug, Clone, Copy)]
pub struct Menu {
    /// Identifier the navigator resolves targets against.
    pub id: MenuId,
    /// Ordered item table; must not be empty.
    pub items: &'static [MenuItem],
}

/// The reason a page callback is being invoked.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Event {
    /// Single-item page entered; draw yourself.
    Init,
    /// First idle tick after a redraw.
    RefreshOnce,
    /// Periodic idle tick; update live fields.
    Refresh,
    /// Confirmed selection of a self-targeting item, with the raw input value.
    Input(u8),
    /// The menu is being left; finalize pending state.
    Flush,
}

/// The mutually exclusive input-interpretation sub-modes.
///
/// A page callback that starts an edit must return the matching kind so the
/// navigator arms the right sub-mode for the next tick.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum InputKind {
    /// Single-character menu selection.
    Choice,
    /// Bounded numeric entry.
    Decimal,
    /// Bounded text entry.
    Text,
    /// Read-only live page; only ESC has effect.
    EscapeOnly,
}

/// A screen position, 1-based as the cursor-positioning sequence expects.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Pos {
    /// Row, 1 at the top.
    pub row: u8,
    /// Column, 1 at the left.
    pub col: u8,
}

/// A page callback.
///
/// Anything implementing `invoke` can drive an item: plain functions through
/// the [`PageFn`] alias, or structs carrying their own context. Callbacks run
/// inside an attribute save/restore bracket, so color and style changes made
/// while handling an event cannot leak into the next page's rendering.
pub trait Page: Sync {
    /// Handle `event` for item `item` of the active menu.
    ///
    /// The returned [`InputKind`] tells the navigator which sub-mode to arm
    /// for the next tick; return [`InputKind::Choice`] when no edit was
    /// started.
    fn invoke(&self, view: &mut View<'_>, item: usize, event: Event) -> InputKind;
}

/// Function-pointer form of a page callback, for static menu tables.
///
/// # Examples
///
/// ```rust
/// use libmenu::menu::{Event, InputKind, PageFn, View};
///
/// fn clock(_view: &mut View<'_>, _item: usize, _event: Event) -> InputKind {
///     InputKind::EscapeOnly
/// }
///
/// static CLOCK: PageFn = clock;
/// ```
pub type PageFn = fn(&mut View<'_>, usize, Event) -> InputKind;

impl Page for PageFn {
    fn invoke(&self, view: &mut View<'_>, item: usize, event: Event) -> InputKind {
        self(view, item, event)
    }
}
