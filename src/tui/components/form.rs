//! Trade entry form panel.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::models::Direction;
use crate::tui::app::{App, Field};

/// Width of the label column, including the separator.
const LABEL_WIDTH: u16 = 14;

/// Renders the form and places the terminal cursor in the focused field.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" New Trade ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    let mut cursor_row = None;

    for field in Field::ALL {
        let focused = app.focus == field;
        if focused {
            cursor_row = Some(lines.len());
        }
        lines.push(field_line(app, field, focused));

        let hint = match field {
            Field::StopLoss => app.sl_hint.as_ref(),
            Field::TakeProfit => app.tp_hint.as_ref(),
            _ => None,
        };
        if let Some(hint) = hint {
            lines.push(Line::from(vec![
                Span::raw(" ".repeat(LABEL_WIDTH as usize)),
                Span::styled(hint.to_string(), Style::default().fg(Color::Red)),
            ]));
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);

    if let (Some(row), Some(input)) = (cursor_row, app.input(app.focus)) {
        let row = u16::try_from(row).unwrap_or(u16::MAX);
        if row < inner.height {
            let x = inner
                .x
                .saturating_add(LABEL_WIDTH)
                .saturating_add(input.cursor_column());
            frame.set_cursor_position((
                x.min(inner.right().saturating_sub(1)),
                inner.y.saturating_add(row),
            ));
        }
    }
}

fn field_line(app: &App, field: Field, focused: bool) -> Line<'static> {
    let label_style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let label = Span::styled(
        format!("{:<width$}", format!("{}:", field.label()), width = LABEL_WIDTH as usize),
        label_style,
    );

    if field == Field::Direction {
        let mut spans = vec![label];
        spans.extend(direction_spans(app.direction, focused));
        return Line::from(spans);
    }

    let text = app.input(field).map(|i| i.as_str().to_string()).unwrap_or_default();
    let value = if !text.is_empty() {
        Span::styled(text, Style::default().fg(Color::White))
    } else if field.is_price() && app.direction.is_none() {
        Span::styled("choose a direction first", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(placeholder(app, field), Style::default().fg(Color::DarkGray))
    };
    Line::from(vec![label, value])
}

fn placeholder(app: &App, field: Field) -> String {
    match field {
        Field::Date => "YYYY-MM-DD".to_string(),
        Field::Symbol => "e.g. EURUSD, XAUUSD, NAS100".to_string(),
        Field::TakeProfit => "optional".to_string(),
        Field::Capital => format!("default {}", app.default_capital()),
        _ => String::new(),
    }
}

fn direction_spans(current: Option<Direction>, focused: bool) -> Vec<Span<'static>> {
    let option = |direction: Direction, color: Color| {
        if current == Some(direction) {
            Span::styled(
                format!("[{direction}]"),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(format!(" {direction} "), Style::default().fg(Color::DarkGray))
        }
    };

    let mut spans = vec![
        option(Direction::Long, Color::Green),
        Span::raw(" "),
        option(Direction::Short, Color::Red),
    ];
    if focused {
        spans.push(Span::styled(
            "  (l/s or ←/→)",
            Style::default().fg(Color::DarkGray),
        ));
    }
    spans
}
