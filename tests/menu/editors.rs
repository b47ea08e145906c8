//! End-to-end decimal and text editing through page callbacks.
//!
//! Each scenario gets its own menu tree and its own result cell, so the
//! tests stay independent under the parallel test runner.

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Mutex;

use libmenu::console::labels::{StaticLabels, Vt100};
use libmenu::menu::{Engine, Error, Event, InputKind, Menu, MenuId, MenuItem, PageFn, Pos, View};

use crate::mock::{boot, tick, MockConsole, ESCAPE_SETTLE_TICKS};

static LABELS: StaticLabels = StaticLabels(&[
    (10, "Clock"),
    (11, "Minutes"),
    (12, "Device name"),
    (13, "Minutes (0-59)"),
    (14, "Name"),
]);

const CALLER_MINUTES: u8 = 1;
const CALLER_NAME: u8 = 2;

fn feed_and_tick<L: libmenu::console::labels::Labels>(
    engine: &mut Engine<MockConsole, L>,
    bytes: &[u8],
) {
    engine.console_mut().feed(bytes);
    tick(engine, bytes.len());
}

/// Build a two-item menu whose item 1 targets its own menu and carries
/// `page` on both items, so the same callback arms the editor and later
/// consumes the result.
macro_rules! editor_menu {
    ($menus:ident, $items:ident, $id:expr, $page:ident) => {
        static $items: &[MenuItem] = &[
            MenuItem {
                label: 10,
                target: Some($id),
                page: Some(&$page),
            },
            MenuItem {
                label: 11,
                target: Some($id),
                page: Some(&$page),
            },
        ];
        static $menus: &[Menu] = &[Menu {
            id: $id,
            items: $items,
        }];
    };
}

// --- valid decimal commit ---

static COMMIT_VALUE: AtomicI32 = AtomicI32::new(30);

fn commit_page(view: &mut View<'_>, _item: usize, event: Event) -> InputKind {
    match event {
        Event::Input(1) => {
            let initial = COMMIT_VALUE.load(Ordering::Relaxed);
            view.set_decimal_input(
                Pos { row: 10, col: 5 },
                0,
                59,
                initial,
                1,
                CALLER_MINUTES,
                13,
            )
            .expect("no other edit is live");
            InputKind::Decimal
        }
        Event::Refresh | Event::RefreshOnce => {
            if let Some((caller, value)) = view.take_decimal() {
                assert_eq!(caller, CALLER_MINUTES);
                COMMIT_VALUE.store(value, Ordering::Relaxed);
            }
            InputKind::Choice
        }
        _ => InputKind::Choice,
    }
}

static COMMIT_PAGE: PageFn = commit_page;
const COMMIT_MENU: MenuId = MenuId(20);
editor_menu!(COMMIT_MENUS, COMMIT_ITEMS, COMMIT_MENU, COMMIT_PAGE);

#[test]
fn test_decimal_commit_hands_value_to_the_page() {
    let mut engine = Engine::new(
        MockConsole::new(),
        Vt100::new(&LABELS),
        COMMIT_MENUS,
        COMMIT_MENU,
    );
    boot(&mut engine);

    feed_and_tick(&mut engine, b"1");
    assert_eq!(engine.session().input_kind(), InputKind::Decimal);
    let out = engine.console_mut().written_str().to_owned();
    assert!(out.contains("[0 .. 59]"), "range line missing: {out:?}");
    assert!(out.contains("Minutes (0-59)"));

    // Clear the pre-filled 30, then type 45 and commit.
    feed_and_tick(&mut engine, b"\x08\x0845\r");
    tick(&mut engine, 2);

    assert_eq!(engine.session().input_kind(), InputKind::Choice);
    assert_eq!(COMMIT_VALUE.load(Ordering::Relaxed), 45);
}

// --- out-of-range commit is discarded ---

static REJECT_VALUE: AtomicI32 = AtomicI32::new(30);

fn reject_page(view: &mut View<'_>, _item: usize, event: Event) -> InputKind {
    match event {
        Event::Input(1) => {
            let initial = REJECT_VALUE.load(Ordering::Relaxed);
            view.set_decimal_input(
                Pos { row: 10, col: 5 },
                0,
                59,
                initial,
                1,
                CALLER_MINUTES,
                13,
            )
            .expect("no other edit is live");
            InputKind::Decimal
        }
        Event::Refresh | Event::RefreshOnce => {
            if let Some((_, value)) = view.take_decimal() {
                REJECT_VALUE.store(value, Ordering::Relaxed);
            }
            InputKind::Choice
        }
        _ => InputKind::Choice,
    }
}

static REJECT_PAGE: PageFn = reject_page;
const REJECT_MENU: MenuId = MenuId(21);
editor_menu!(REJECT_MENUS, REJECT_ITEMS, REJECT_MENU, REJECT_PAGE);

#[test]
fn test_decimal_out_of_range_commit_is_discarded() {
    let mut engine = Engine::new(
        MockConsole::new(),
        Vt100::new(&LABELS),
        REJECT_MENUS,
        REJECT_MENU,
    );
    boot(&mut engine);

    feed_and_tick(&mut engine, b"1");
    engine.console_mut().clear_writes();

    // Clear the pre-filled 30, type 65 (above the max of 59), commit.
    feed_and_tick(&mut engine, b"\x08\x0865");
    let out = engine.console_mut().written_str().to_owned();
    assert!(out.contains("\x1b[31m"), "out-of-range color missing: {out:?}");

    feed_and_tick(&mut engine, b"\r");
    tick(&mut engine, 2);

    assert_eq!(engine.session().input_kind(), InputKind::Choice);
    assert_eq!(REJECT_VALUE.load(Ordering::Relaxed), 30);
}

// --- lone ESC cancels the edit ---

static CANCEL_VALUE: AtomicI32 = AtomicI32::new(30);

fn cancel_page(view: &mut View<'_>, _item: usize, event: Event) -> InputKind {
    match event {
        Event::Input(1) => {
            let initial = CANCEL_VALUE.load(Ordering::Relaxed);
            view.set_decimal_input(
                Pos { row: 10, col: 5 },
                0,
                59,
                initial,
                1,
                CALLER_MINUTES,
                13,
            )
            .expect("no other edit is live");
            InputKind::Decimal
        }
        Event::Refresh | Event::RefreshOnce => {
            if let Some((_, value)) = view.take_decimal() {
                CANCEL_VALUE.store(value, Ordering::Relaxed);
            }
            InputKind::Choice
        }
        _ => InputKind::Choice,
    }
}

static CANCEL_PAGE: PageFn = cancel_page;
const CANCEL_MENU: MenuId = MenuId(22);
editor_menu!(CANCEL_MENUS, CANCEL_ITEMS, CANCEL_MENU, CANCEL_PAGE);

#[test]
fn test_lone_escape_cancels_decimal_edit() {
    let mut engine = Engine::new(
        MockConsole::new(),
        Vt100::new(&LABELS),
        CANCEL_MENUS,
        CANCEL_MENU,
    );
    boot(&mut engine);

    feed_and_tick(&mut engine, b"1");
    feed_and_tick(&mut engine, b"\x08\x089");
    engine.console_mut().feed(b"\x1b");
    tick(&mut engine, ESCAPE_SETTLE_TICKS);
    tick(&mut engine, 2);

    assert_eq!(engine.session().input_kind(), InputKind::Choice);
    assert_eq!(CANCEL_VALUE.load(Ordering::Relaxed), 30);
}

// --- degraded escape sequence leaves the edit running ---

static DEGRADE_VALUE: AtomicI32 = AtomicI32::new(30);

fn degrade_page(view: &mut View<'_>, _item: usize, event: Event) -> InputKind {
    match event {
        Event::Input(1) => {
            let initial = DEGRADE_VALUE.load(Ordering::Relaxed);
            view.set_decimal_input(
                Pos { row: 10, col: 5 },
                0,
                59,
                initial,
                1,
                CALLER_MINUTES,
                13,
            )
            .expect("no other edit is live");
            InputKind::Decimal
        }
        Event::Refresh | Event::RefreshOnce => {
            if let Some((_, value)) = view.take_decimal() {
                DEGRADE_VALUE.store(value, Ordering::Relaxed);
            }
            InputKind::Choice
        }
        _ => InputKind::Choice,
    }
}

static DEGRADE_PAGE: PageFn = degrade_page;
const DEGRADE_MENU: MenuId = MenuId(23);
editor_menu!(DEGRADE_MENUS, DEGRADE_ITEMS, DEGRADE_MENU, DEGRADE_PAGE);

#[test]
fn test_escape_sequence_during_edit_restores_the_accumulator() {
    let mut engine = Engine::new(
        MockConsole::new(),
        Vt100::new(&LABELS),
        DEGRADE_MENUS,
        DEGRADE_MENU,
    );
    boot(&mut engine);

    feed_and_tick(&mut engine, b"1");
    // Clear to 0, type 4, then an up-arrow arrives mid-edit.
    feed_and_tick(&mut engine, b"\x08\x084");
    feed_and_tick(&mut engine, b"\x1b[A");
    feed_and_tick(&mut engine, b"\r");
    tick(&mut engine, 2);

    // The sequence was swallowed whole; the 4 survived and committed.
    assert_eq!(DEGRADE_VALUE.load(Ordering::Relaxed), 4);
}

// --- text editing ---

static NAME: Mutex<Vec<u8>> = Mutex::new(Vec::new());

fn name_page(view: &mut View<'_>, _item: usize, event: Event) -> InputKind {
    match event {
        Event::Input(1) => {
            view.set_text_input(Pos { row: 8, col: 4 }, 16, CALLER_NAME, 14, "dev")
                .expect("no other edit is live");
            InputKind::Text
        }
        Event::Refresh | Event::RefreshOnce => {
            let mut buf = [0u8; 16];
            if let Some((caller, len)) = view.take_text(&mut buf) {
                assert_eq!(caller, CALLER_NAME);
                *NAME.lock().unwrap() = buf[..len].to_vec();
            }
            InputKind::Choice
        }
        _ => InputKind::Choice,
    }
}

static NAME_PAGE: PageFn = name_page;
const NAME_MENU: MenuId = MenuId(24);
editor_menu!(NAME_MENUS, NAME_ITEMS, NAME_MENU, NAME_PAGE);

#[test]
fn test_text_commit_hands_bytes_to_the_page() {
    let mut engine = Engine::new(
        MockConsole::new(),
        Vt100::new(&LABELS),
        NAME_MENUS,
        NAME_MENU,
    );
    boot(&mut engine);

    feed_and_tick(&mut engine, b"1");
    assert_eq!(engine.session().input_kind(), InputKind::Text);
    assert!(engine.console_mut().written_str().contains("Name"));

    // The field is pre-filled with "dev"; append and commit.
    feed_and_tick(&mut engine, b"ice\r");
    tick(&mut engine, 2);

    assert_eq!(engine.session().input_kind(), InputKind::Choice);
    assert_eq!(NAME.lock().unwrap().as_slice(), b"device");
}

// --- second edit while one is live ---

static BUSY_SEEN: AtomicBool = AtomicBool::new(false);

fn busy_page(view: &mut View<'_>, _item: usize, event: Event) -> InputKind {
    if let Event::Input(1) = event {
        view.set_decimal_input(Pos { row: 5, col: 5 }, 0, 10, 0, 1, 1, 13)
            .expect("first edit starts cleanly");
        let second = view.set_text_input(Pos { row: 8, col: 4 }, 8, 2, 14, "");
        if second == Err(Error::Busy) {
            BUSY_SEEN.store(true, Ordering::Relaxed);
        }
        return InputKind::Decimal;
    }
    InputKind::Choice
}

static BUSY_PAGE: PageFn = busy_page;
const BUSY_MENU: MenuId = MenuId(25);
editor_menu!(BUSY_MENUS, BUSY_ITEMS, BUSY_MENU, BUSY_PAGE);

#[test]
fn test_second_edit_request_reports_busy() {
    let mut engine = Engine::new(
        MockConsole::new(),
        Vt100::new(&LABELS),
        BUSY_MENUS,
        BUSY_MENU,
    );
    boot(&mut engine);

    feed_and_tick(&mut engine, b"1");

    assert!(BUSY_SEEN.load(Ordering::Relaxed));
    assert_eq!(engine.session().input_kind(), InputKind::Decimal);
}

// --- navigating away drops a live edit ---

fn orphan_page(view: &mut View<'_>, _item: usize, event: Event) -> InputKind {
    if let Event::Input(1) = event {
        view.set_decimal_input(Pos { row: 5, col: 5 }, 0, 10, 0, 1, 1, 13)
            .expect("slot must be free on every entry");
        return InputKind::Decimal;
    }
    InputKind::Choice
}

static ORPHAN_PAGE: PageFn = orphan_page;
const ORPHAN_MENU: MenuId = MenuId(26);
editor_menu!(ORPHAN_MENUS, ORPHAN_ITEMS, ORPHAN_MENU, ORPHAN_PAGE);

#[test]
fn test_menu_change_releases_a_live_edit() {
    let mut engine = Engine::new(
        MockConsole::new(),
        Vt100::new(&LABELS),
        ORPHAN_MENUS,
        ORPHAN_MENU,
    );
    boot(&mut engine);

    feed_and_tick(&mut engine, b"1");
    assert_eq!(engine.session().input_kind(), InputKind::Decimal);

    // Abandon the edit by re-entering the menu directly.
    engine.go_to_menu(ORPHAN_MENU).unwrap();
    assert_eq!(engine.session().input_kind(), InputKind::Choice);

    // The slot was freed: arming again does not report Busy (the page
    // expects a clean start and would panic otherwise).
    feed_and_tick(&mut engine, b"1");
    assert_eq!(engine.session().input_kind(), InputKind::Decimal);
}
