//! Calculation core of a trading journal.
//!
//! Resolves loosely typed instrument names to broker metadata, sizes a
//! position from an account risk budget, validates the trade entry form and
//! reconstructs the outcome of closed trades. A terminal form built on the
//! same functions lives in [`tui`].

pub mod config;
pub mod error;
pub mod models;
pub mod outcome;
pub mod report;
pub mod sizing;
pub mod symbols;
pub mod tui;
pub mod validation;

pub use error::{JournalError, Result};
