//! Terminal user interface for entering trades.
//!
//! A single Ratatui screen with the trade form on the left and the live
//! position size on the right. Every keystroke recomputes the sizing and
//! the list of validation problems.

pub mod app;
pub mod components;
pub mod event;
pub mod input;
pub mod terminal;
pub mod ui;

pub use app::App;
pub use event::{Action, Event, Message};
pub use terminal::{Tui, restore_terminal, setup_terminal};
pub use ui::render;
