//! # libmenu - Embedded terminal menu engine
//!
//! A data-driven, character-cell menu system for serial and virtual consoles on
//! embedded devices. The engine turns raw keystrokes into navigation and
//! data-entry events for a statically defined menu tree, with escape-sequence
//! disambiguation, bounded numeric/text editing sub-modes, and a callback
//! protocol that lets individual pages customize behavior without the engine
//! knowing anything about them. This library is designed for embedded systems
//! and supports `no_std` environments.
//!
//! ## Features
//!
//! ### Menu Engine
//! - **Data-driven pages**: Menu trees are static tables built by the
//!   embedding application, never mutated at runtime
//! - **Single-byte input loop**: One periodic tick pulls at most one byte from
//!   the console and never blocks
//! - **Escape disambiguation**: A tick-counted single-shot timer separates a
//!   lone ESC keypress from the lead byte of a VT100 control sequence
//! - **Bounded editors**: Range-checked decimal entry (with fixed-point
//!   display) and length-checked text entry, both with a consume-once
//!   hand-off back to the owning page
//!
//! ### Console Abstraction
//! - Byte-transport trait usable with UARTs, TCP bridges, or test mocks
//! - Label/format table trait resolving numeric IDs to printf-style templates
//! - Swappable VT100 control sequences with a ready-made default set
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! libmenu = "0.1.0"
//! ```
//!
//! ### Minimal menu
//!
//! ```rust,no_run
//! use libmenu::console::labels::{StaticLabels, Vt100};
//! use libmenu::menu::{Engine, Event, InputKind, Menu, MenuId, MenuItem, View};
//! # use libmenu::console::{Console, Error};
//! # struct Uart;
//! # impl Console for Uart {
//! #     fn ready_read(&mut self) -> bool { false }
//! #     fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Error> { Ok(0) }
//! #     fn write(&mut self, buf: &[u8]) -> Result<usize, Error> { Ok(buf.len()) }
//! #     fn flush(&mut self) -> Result<(), Error> { Ok(()) }
//! #     fn peek(&mut self, _offset: usize) -> Option<u8> { None }
//! # }
//!
//! const MAIN: MenuId = MenuId(1);
//!
//! fn status_page(_view: &mut View<'_>, _item: usize, _event: Event) -> InputKind {
//!     InputKind::Choice
//! }
//!
//! static STATUS: libmenu::menu::PageFn = status_page;
//!
//! static MAIN_ITEMS: &[MenuItem] = &[
//!     MenuItem { label: 100, target: None, page: None },
//!     MenuItem { label: 101, target: Some(MAIN), page: Some(&STATUS) },
//! ];
//!
//! static MENUS: &[Menu] = &[Menu { id: MAIN, items: MAIN_ITEMS }];
//!
//! static LABELS: StaticLabels = StaticLabels(&[(100, "Main"), (101, "Status")]);
//!
//! let mut engine = Engine::new(Uart, Vt100::new(&LABELS), MENUS, MAIN);
//!
//! // Call once per scheduler tick.
//! // loop { engine.process()?; }
//! ```
//!
//! ## Platform Support
//!
//! This library is designed to work on:
//! - Embedded microcontrollers (ARM Cortex-M, RISC-V, etc.)
//! - Linux-based devices driving a pty or TCP console bridge
//! - Any platform supporting Rust's `core` library
//!
//! ## Optional Features
//!
//! - `std`: Enable standard library support (default: disabled)
//! - `defmt`: Enable defmt logging support for embedded debugging

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

/// Console abstraction layer providing the byte transport and label table
/// boundaries.
///
/// This module contains the traits the engine talks through: a non-blocking
/// byte transport and a label/format table that resolves numeric IDs to
/// printf-style templates, including the VT100 control sequences used for
/// cursor movement and color.
pub mod console;

/// The interactive menu engine.
///
/// Contains the static menu data model, the per-console session state, the
/// input state machine, the escape timer, the decimal/text editors, and the
/// navigator that ties them together.
pub mod menu;
