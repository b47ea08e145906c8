//! The navigator driving menu state from the periodic tick.
//!
//! The engine owns everything a console session needs: the transport, the
//! label table, the static menu tree, the session state, the escape timer,
//! and the editor slots. The embedding application calls
//! [`Engine::process`] once per scheduler tick; everything else happens
//! through the data tables and page callbacks.
//!
//! # Tick anatomy
//!
//! 1. Apply a pending escape-timer expiry (lone ESC confirmed).
//! 2. Pull at most one byte through the input state machine.
//! 3. Let the live editor redraw its field, or run navigator resolution:
//!    dispatch a confirmed selection, or send the idle refresh events.
//! 4. Flush the console.
//!
//! Every step is non-blocking; a full page redraw is O(item count) and runs
//! to completion within the tick.
//!
//! # Session lifecycle
//!
//! The first tick after activation bootstraps the terminal: reset sequence, a
//! short settle countdown, optional banner, then the startup menu. Selecting
//! a terminal item (target `None`) clears the screen and releases the
//! console; ticks become no-ops until [`Engine::activate`] is called again.

use super::dispatch;
use super::edit::{DecimalEdit, TextEdit};
use super::escape::EscapeTimer;
use super::input::{Machine, CHOICE_ESCAPE};
use super::session::Session;
use super::view::{Screen, View};
use super::{Error, Event, InputKind, Menu, MenuId};
use crate::console::labels::{self, Labels};
use crate::console::Console;

/// Ticks the bootstrap waits between the terminal reset sequence and the
/// first menu draw, giving slow emulators time to settle.
pub const BOOT_DELAY_TICKS: u8 = 2;

/// Screen row the item list starts on; row 1 holds the page header.
const LIST_START_ROW: u8 = 3;

/// One menu engine driving one console session.
///
/// Multiple consoles are simply multiple engines; no state is shared.
pub struct Engine<C: Console, L: Labels> {
    console: C,
    labels: L,
    menus: &'static [Menu],
    start: MenuId,
    session: Session,
    escape: EscapeTimer,
    decimal: Option<DecimalEdit>,
    text: Option<TextEdit>,
    /// `None` until the reset sequence has been sent, then counts down the
    /// settle delay.
    boot_countdown: Option<u8>,
}

impl<C: Console, L: Labels> core::fmt::Debug for Engine<C, L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Engine")
            .field("session", &self.session)
            .field("escape", &self.escape)
            .finish_non_exhaustive()
    }
}

impl<C: Console, L: Labels> Engine<C, L> {
    /// Create an engine over a console, a label table, a static menu tree,
    /// and the startup menu.
    ///
    /// The engine starts activated; the first [`Self::process`] call runs the
    /// bootstrap.
    pub fn new(console: C, labels: L, menus: &'static [Menu], start: MenuId) -> Self {
        Self {
            console,
            labels,
            menus,
            start,
            session: Session::new(start),
            escape: EscapeTimer::default(),
            decimal: None,
            text: None,
            boot_countdown: None,
        }
    }

    /// Change the lone-ESC disambiguation window, in ticks.
    pub fn set_escape_window(&mut self, ticks: u8) {
        self.escape = EscapeTimer::new(ticks);
    }

    /// Suppress or resume all rendering, e.g. while a log burst owns the
    /// console. Input keeps being processed either way.
    pub fn lock_display(&mut self, locked: bool) {
        self.session.display_locked = locked;
    }

    /// Whether the session currently owns the console.
    pub fn is_active(&self) -> bool {
        !self.session.released
    }

    /// Re-arm a released session; the next tick bootstraps again.
    pub fn activate(&mut self) {
        self.session.released = false;
        self.session.started = false;
        self.boot_countdown = None;
    }

    /// Read access to the session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Access the underlying console, e.g. to feed a test transport.
    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    /// Run one scheduler tick.
    ///
    /// Pulls at most one byte, advances the escape timer, and drives
    /// rendering and callbacks. Never blocks.
    pub fn process(&mut self) -> Result<(), Error> {
        if self.session.released {
            return Ok(());
        }
        if !self.session.started {
            return self.bootstrap_step();
        }

        if self.escape.tick() {
            self.on_escape_expired()?;
        }

        if self.console.ready_read() {
            let mut byte = [0u8; 1];
            if self.console.read(&mut byte)? == 1 {
                let mut machine = Machine {
                    session: &mut self.session,
                    escape: &mut self.escape,
                    decimal: &mut self.decimal,
                    text: &mut self.text,
                };
                machine.consume(byte[0]);
            }
        }

        match self.session.input_kind {
            InputKind::Decimal => {
                if let Some(mut edit) = self.decimal.take() {
                    let mut screen = self.screen();
                    let outcome = edit.refresh(&mut screen);
                    self.decimal = Some(edit);
                    outcome?;
                }
            }
            InputKind::Text => {
                if let Some(mut edit) = self.text.take() {
                    let mut screen = self.screen();
                    let outcome = edit.refresh(&mut screen);
                    self.text = Some(edit);
                    outcome?;
                }
            }
            InputKind::Choice | InputKind::EscapeOnly => self.resolve()?,
        }

        self.console.flush()?;
        Ok(())
    }

    /// Leave the current page and enter `id`: live edits are dropped, the
    /// selection state is reset, and the page is fully redrawn.
    pub fn go_to_menu(&mut self, id: MenuId) -> Result<(), Error> {
        let menu = self.find(id).ok_or(Error::UnknownMenu(id))?;
        // Abandoning a page forcibly releases its edit; nothing can leak.
        self.decimal = None;
        self.text = None;
        self.session.enter_menu(id, menu.items.len());
        self.redraw(menu)
    }

    fn find(&self, id: MenuId) -> Option<Menu> {
        self.menus.iter().find(|menu| menu.id == id).copied()
    }

    fn screen(&mut self) -> Screen<'_> {
        Screen {
            console: &mut self.console,
            labels: &self.labels,
            locked: self.session.display_locked,
        }
    }

    fn view(&mut self) -> View<'_> {
        let locked = self.session.display_locked;
        View {
            screen: Screen {
                console: &mut self.console,
                labels: &self.labels,
                locked,
            },
            session: &mut self.session,
            decimal: &mut self.decimal,
            text: &mut self.text,
        }
    }

    /// One bootstrap stage per tick: reset, settle, banner + startup menu.
    fn bootstrap_step(&mut self) -> Result<(), Error> {
        match self.boot_countdown {
            None => {
                let mut screen = self.screen();
                screen.control(labels::RESET_TERMINAL, &[])?;
                screen.flush()?;
                self.boot_countdown = Some(BOOT_DELAY_TICKS);
            }
            Some(0) => {
                let mut screen = self.screen();
                screen.control(labels::BANNER, &[])?;
                screen.flush()?;
                self.session.started = true;
                self.go_to_menu(self.start)?;
            }
            Some(remaining) => self.boot_countdown = Some(remaining - 1),
        }
        Ok(())
    }

    /// The escape window elapsed with no follow-up byte: the ESC stood
    /// alone. Cancel any live edit, fall back to menu-choice input, and in
    /// plain choice mode treat the ESC as a back/quit selection. A literal
    /// ESC is echoed so emulators that buffer escape sequences release it.
    fn on_escape_expired(&mut self) -> Result<(), Error> {
        self.session.in_escape = false;

        match self.session.input_kind {
            InputKind::Decimal | InputKind::Text => {
                if let Some(edit) = self.decimal.as_mut() {
                    edit.cancel();
                }
                if let Some(edit) = self.text.as_mut() {
                    edit.cancel();
                }
                self.session.input_kind = InputKind::Choice;
                self.session.reject_input();
            }
            InputKind::EscapeOnly => {
                self.session.input_kind = InputKind::Choice;
                self.go_to_menu(self.session.active)?;
            }
            InputKind::Choice => {
                self.session.input = CHOICE_ESCAPE;
                self.session.validate_input = true;
            }
        }

        let mut screen = self.screen();
        screen.put("\x1b")?;
        Ok(())
    }

    /// Clear the page and draw the item list, or hand a single-item page to
    /// its callback.
    fn redraw(&mut self, menu: Menu) -> Result<(), Error> {
        let mut screen = self.screen();
        screen.control(labels::CURSOR_HIDE, &[])?;
        screen.control(labels::CLEAR_SCREEN, &[])?;

        if menu.items.len() == 1 {
            // Pure information/redirect page: no list, the callback owns the
            // screen from here.
            let mut view = self.view();
            let kind = dispatch::invoke(&mut view, menu.items[0].page, 0, Event::Init)?;
            self.session.input_kind = kind;
            return Ok(());
        }

        let mut screen = self.screen();
        screen.move_to(super::Pos { row: 1, col: 1 })?;
        screen.label(menu.items[0].label, &[])?;

        for (index, item) in menu.items.iter().enumerate().skip(1) {
            let row = LIST_START_ROW + (index as u8) - 1;
            screen.move_to(super::Pos { row, col: 3 })?;
            let selector = Self::selector_char(index);
            let cell = [selector, b' ', b'-', b' '];
            if let Ok(prefix) = core::str::from_utf8(&cell) {
                screen.put(prefix)?;
            }
            screen.label(item.label, &[])?;
        }

        let back_row = LIST_START_ROW + menu.items.len() as u8 - 1;
        screen.move_to(super::Pos {
            row: back_row,
            col: 3,
        })?;
        screen.put("0 - ")?;
        screen.label(labels::BACK_CAPTION, &[])?;
        screen.flush()?;
        Ok(())
    }

    /// Selector printed next to item `index`: `1`-`9`, then `a` onward.
    fn selector_char(index: usize) -> u8 {
        if index < 10 {
            b'0' + index as u8
        } else {
            b'a' + (index - 10) as u8
        }
    }

    /// Interpret the session state the input machine left behind: dispatch a
    /// confirmed selection or send the idle refresh events.
    fn resolve(&mut self) -> Result<(), Error> {
        let menu = self
            .find(self.session.active)
            .ok_or(Error::UnknownMenu(self.session.active))?;
        if menu.items.is_empty() {
            return Ok(());
        }

        let index = if self.session.input == CHOICE_ESCAPE {
            0
        } else if usize::from(self.session.input) < self.session.item_count {
            usize::from(self.session.input)
        } else {
            // Stray value, e.g. a selector past the item count.
            self.session.reject_input();
            return Ok(());
        };
        let item = menu.items[index];

        if self.session.validate_input {
            let value = self.session.input;
            self.session.reject_input();

            match item.target {
                None => self.release()?,
                Some(target) if target != self.session.active => {
                    // Finalization pass over the page being left.
                    for (i, leaving) in menu.items.iter().enumerate() {
                        let mut view = self.view();
                        dispatch::invoke(&mut view, leaving.page, i, Event::Flush)?;
                    }
                    self.session.config_flags = 0;
                    self.go_to_menu(target)?;
                }
                Some(_) => {
                    // Self-targeting item: an in-place action, not navigation.
                    let mut view = self.view();
                    let kind = dispatch::invoke(&mut view, item.page, index, Event::Input(value))?;
                    self.session.input_kind = kind;
                }
            }
            return Ok(());
        }

        if self.session.refresh_once {
            self.session.refresh_once = false;
            let mut view = self.view();
            dispatch::invoke(&mut view, item.page, index, Event::RefreshOnce)?;
        }
        let mut view = self.view();
        let kind = dispatch::invoke(&mut view, item.page, index, Event::Refresh)?;
        // A refresh callback may arm an edit (e.g. after consuming a result).
        self.session.input_kind = kind;
        Ok(())
    }

    /// Terminal item selected: clear the page and give the console back.
    fn release(&mut self) -> Result<(), Error> {
        let mut screen = self.screen();
        screen.control(labels::CLEAR_SCREEN, &[])?;
        screen.control(labels::CURSOR_SHOW, &[])?;
        screen.flush()?;
        self.session.started = false;
        self.session.released = true;
        self.boot_countdown = None;
        Ok(())
    }
}
