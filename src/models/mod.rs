//! Trade form models.
//!
//! Contains the trade direction, the raw entry form and the record
//! submitted to the journal backend.

pub mod trade_form;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use trade_form::{NewTrade, TradeForm};

/// Side of a discretionary trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Long => "Long",
            Direction::Short => "Short",
        }
    }

    /// The other side.
    pub fn toggled(&self) -> Self {
        match self {
            Direction::Long => Direction::Short,
            Direction::Short => Direction::Long,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a direction field holds anything but `Long`/`Short`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDirection(pub String);

impl fmt::Display for UnknownDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown direction {:?}, expected Long or Short", self.0)
    }
}

impl std::error::Error for UnknownDirection {}

impl FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Long" => Ok(Direction::Long),
            "Short" => Ok(Direction::Short),
            other => Err(UnknownDirection(other.to_string())),
        }
    }
}
