//! Application state for the TUI.

use std::time::{Duration, Instant};

use rust_decimal::Decimal;

use crate::models::{Direction, NewTrade, TradeForm};
use crate::sizing::{PositionSizeResult, PositionSizer, parse_field};
use crate::symbols::normalize_symbol;
use crate::tui::input::TextInput;
use crate::validation::{TradeFormError, sl_hint, tp_hint, validate};

/// How long a status message stays on screen.
const STATUS_TIMEOUT: Duration = Duration::from_secs(5);

/// Form fields in focus order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Date,
    Symbol,
    Direction,
    Entry,
    StopLoss,
    TakeProfit,
    Capital,
    RiskPct,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Date,
        Field::Symbol,
        Field::Direction,
        Field::Entry,
        Field::StopLoss,
        Field::TakeProfit,
        Field::Capital,
        Field::RiskPct,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Date => "Date",
            Field::Symbol => "Symbol",
            Field::Direction => "Direction",
            Field::Entry => "Entry",
            Field::StopLoss => "Stop Loss",
            Field::TakeProfit => "Take Profit",
            Field::Capital => "Capital",
            Field::RiskPct => "Risk %",
        }
    }

    fn index(&self) -> usize {
        Field::ALL.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> Field {
        Field::ALL[(self.index() + 1) % Field::ALL.len()]
    }

    pub fn previous(&self) -> Field {
        Field::ALL[(self.index() + Field::ALL.len() - 1) % Field::ALL.len()]
    }

    /// Price fields stay locked until a direction is chosen.
    pub fn is_price(&self) -> bool {
        matches!(self, Field::Entry | Field::StopLoss | Field::TakeProfit)
    }

    /// Fields that only take digits and one decimal point.
    pub fn is_numeric(&self) -> bool {
        self.is_price() || matches!(self, Field::Capital | Field::RiskPct)
    }
}

/// Transient message shown in the status bar.
#[derive(Clone, Debug)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    pub timestamp: Instant,
}

/// Central application state container.
pub struct App {
    // -- Form --
    pub date: TextInput,
    pub symbol: TextInput,
    pub direction: Option<Direction>,
    pub entry: TextInput,
    pub stop_loss: TextInput,
    pub take_profit: TextInput,
    pub capital: TextInput,
    pub risk_input: TextInput,
    /// Field with keyboard focus.
    pub focus: Field,

    // -- Derived (recomputed on every edit) --
    pub position: PositionSizeResult,
    pub errors: Vec<TradeFormError>,
    pub sl_hint: Option<TradeFormError>,
    pub tp_hint: Option<TradeFormError>,

    // -- Session --
    /// Number of trades submitted this session.
    pub submitted: usize,
    pub status: Option<StatusMessage>,
    pub should_quit: bool,

    sizer: PositionSizer,
    default_risk_pct: Decimal,
}

impl App {
    /// Creates an empty form bound to `sizer`, pre-filled with the
    /// configured risk percentage.
    pub fn new(sizer: PositionSizer, default_risk_pct: Decimal) -> Self {
        let mut app = Self {
            date: TextInput::new(),
            symbol: TextInput::new(),
            direction: None,
            entry: TextInput::new(),
            stop_loss: TextInput::new(),
            take_profit: TextInput::new(),
            capital: TextInput::new(),
            risk_input: TextInput::with_content(default_risk_pct.to_string()),
            focus: Field::Date,
            position: PositionSizeResult::invalid(),
            errors: Vec::new(),
            sl_hint: None,
            tp_hint: None,
            submitted: 0,
            status: None,
            should_quit: false,
            sizer,
            default_risk_pct,
        };
        app.recompute();
        app
    }

    /// The text input behind a field; `None` for the direction toggle.
    pub fn input(&self, field: Field) -> Option<&TextInput> {
        match field {
            Field::Date => Some(&self.date),
            Field::Symbol => Some(&self.symbol),
            Field::Direction => None,
            Field::Entry => Some(&self.entry),
            Field::StopLoss => Some(&self.stop_loss),
            Field::TakeProfit => Some(&self.take_profit),
            Field::Capital => Some(&self.capital),
            Field::RiskPct => Some(&self.risk_input),
        }
    }

    pub fn input_mut(&mut self, field: Field) -> Option<&mut TextInput> {
        match field {
            Field::Date => Some(&mut self.date),
            Field::Symbol => Some(&mut self.symbol),
            Field::Direction => None,
            Field::Entry => Some(&mut self.entry),
            Field::StopLoss => Some(&mut self.stop_loss),
            Field::TakeProfit => Some(&mut self.take_profit),
            Field::Capital => Some(&mut self.capital),
            Field::RiskPct => Some(&mut self.risk_input),
        }
    }

    /// Snapshot of the form as raw text.
    pub fn form(&self) -> TradeForm {
        TradeForm {
            date: self.date.as_str().to_string(),
            symbol: self.symbol.as_str().to_string(),
            direction: self
                .direction
                .map(|d| d.as_str().to_string())
                .unwrap_or_default(),
            entry: self.entry.as_str().to_string(),
            sl: self.stop_loss.as_str().to_string(),
            tp: self.take_profit.as_str().to_string(),
            capital: self.capital.as_str().to_string(),
        }
    }

    /// Risk percentage typed in the form, or the configured default.
    pub fn risk_pct(&self) -> Decimal {
        parse_field(self.risk_input.as_str()).unwrap_or(self.default_risk_pct)
    }

    /// Capital the sizer falls back to when the capital field is empty.
    pub fn default_capital(&self) -> Decimal {
        self.sizer.default_capital()
    }

    /// Canonical key of the typed symbol.
    pub fn symbol_key(&self) -> String {
        normalize_symbol(self.symbol.as_str())
    }

    /// Recomputes the position, the error list and the field hints.
    pub fn recompute(&mut self) {
        let form = self.form();
        self.position = form.position(&self.sizer, self.risk_pct());
        self.errors = validate(&form, &self.position);
        self.sl_hint = sl_hint(&form);
        self.tp_hint = tp_hint(&form);
    }

    /// Types a character into the focused field.
    ///
    /// Numeric fields take digits and a single decimal point; price fields
    /// additionally require a direction first.
    pub fn type_char(&mut self, c: char) {
        let field = self.focus;
        if field.is_price() && self.direction.is_none() {
            self.show_error("Choose Long or Short before entering prices");
            return;
        }
        let Some(input) = self.input_mut(field) else {
            return;
        };
        if field.is_numeric() {
            let accepted = c.is_ascii_digit() || (c == '.' && !input.as_str().contains('.'));
            if !accepted {
                return;
            }
        }
        input.insert(c);
        self.recompute();
    }

    /// Applies a cursor or deletion edit to the focused field.
    pub fn edit(&mut self, f: impl FnOnce(&mut TextInput)) {
        if let Some(input) = self.input_mut(self.focus) {
            f(input);
            self.recompute();
        }
    }

    /// Sets the direction, or cycles it when `None` is passed.
    pub fn set_direction(&mut self, direction: Option<Direction>) {
        self.direction = match direction {
            Some(d) => Some(d),
            None => Some(self.direction.map_or(Direction::Long, |d| d.toggled())),
        };
        self.recompute();
    }

    pub fn clear_direction(&mut self) {
        self.direction = None;
        self.recompute();
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    /// Builds the trade record if the form is clean.
    ///
    /// On success the price fields are cleared for the next trade while
    /// date, symbol, direction, capital and risk stay filled in.
    pub fn submit(&mut self) -> Option<NewTrade> {
        match self.form().submission(&self.position) {
            Ok(trade) => {
                self.submitted += 1;
                self.show_info(format!(
                    "Recorded {} {} {} lots (R:R {})",
                    trade.direction, trade.symbol, self.position.lot_size, trade.rr
                ));
                self.entry.clear();
                self.stop_loss.clear();
                self.take_profit.clear();
                self.recompute();
                Some(trade)
            }
            Err(errors) => {
                self.show_error(format!("{} problem(s) left, see the list below", errors.len()));
                None
            }
        }
    }

    /// Sets an error message to display.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: message.into(),
            is_error: true,
            timestamp: Instant::now(),
        });
    }

    /// Sets an informational message to display.
    pub fn show_info(&mut self, message: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: message.into(),
            is_error: false,
            timestamp: Instant::now(),
        });
    }

    /// Clears status messages older than [`STATUS_TIMEOUT`].
    pub fn clear_stale_status(&mut self) {
        if let Some(ref status) = self.status
            && status.timestamp.elapsed() > STATUS_TIMEOUT
        {
            self.status = None;
        }
    }
}
