//! Live sizing results panel.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::sizing::LotNote;
use crate::tui::app::App;

/// Renders the position computed from the current form.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let position = &app.position;
    let border_color = if position.is_valid {
        Color::Green
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .title(" Position ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let label = |text: &'static str| Span::styled(format!("{text:<16}"), Style::default().fg(Color::Gray));
    let value = |text: String| Span::styled(text, Style::default().fg(Color::White));

    let mut lines = vec![
        Line::from(vec![
            label("Risk amount:"),
            value(format!("{} ({}%)", position.risk_amount, app.risk_pct())),
        ]),
        Line::from(vec![
            label("Stop distance:"),
            value(format!("{} {}", position.stop_ticks, position.unit_label)),
        ]),
        Line::from(vec![
            label("Lot size:"),
            Span::styled(
                position.lot_size.to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![label("Realized risk:"), value(position.realized_risk.to_string())]),
        Line::from(vec![
            label("R:R:"),
            value(if position.actual_rr.is_zero() {
                "-".to_string()
            } else {
                format!("1:{}", position.actual_rr.round_dp(2))
            }),
        ]),
    ];

    if let Some(note) = position.lot_note {
        let color = match note {
            LotNote::BelowMinLot { .. } | LotNote::StopBelowOneTick => Color::Red,
            LotNote::ReducedToRisk => Color::Yellow,
        };
        lines.push(Line::from(vec![
            label("Note:"),
            Span::styled(note.to_string(), Style::default().fg(color)),
        ]));
    }

    if !position.is_valid {
        lines.push(Line::from(Span::styled(
            "Enter distinct entry and stop prices to size the trade",
            Style::default().fg(Color::DarkGray),
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
