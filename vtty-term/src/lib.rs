//! Terminal engine tying the workspace together.
//!
//! This crate connects the lower-level building blocks:
//! - [`vtty_pty`] spawns and drives the PTY session,
//! - [`vtty_escape`] parses the byte stream into semantic actions,
//! - [`vtty_screen`] keeps the in-memory screen model.
//!
//! The main entry points are:
//! - [`Terminal`], which owns a screen, the escape parser and the
//!   outbound buffer, and applies every decoded action;
//! - [`Engine`] plus [`EventLoop`], the non-blocking PTY pump;
//! - [`keymap`], the key-press encoder consumed by the input side;
//! - [`renderer`], the reference frame buffer composer.
//!
//! A typical embedding constructs a [`TermOptions`], spawns the session,
//! wraps it in an [`Engine`] and drives [`EventLoop::run`] with an
//! [`EngineClient`] that blits frames and forwards key presses.

mod error;
mod event_loop;
pub mod keymap;
mod options;
mod output;
pub mod renderer;
mod terminal;

pub use error::{Error, Result};
pub use event_loop::{
    Engine, EngineClient, EventLoop, PTY_CHILD_TOKEN, PTY_IO_TOKEN,
};
pub use keymap::Key;
pub use options::TermOptions;
pub use output::OutputBuffer;
pub use renderer::{CELL_HEIGHT, CELL_WIDTH, Framebuffer};
pub use terminal::{TermEvent, Terminal};

pub use vtty_escape as escape;
pub use vtty_pty as pty;
pub use vtty_screen as screen;
