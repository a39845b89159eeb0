//! Status bar component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::tui::app::App;

/// Renders the status bar.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let key = app.symbol_key();
    let symbol_span = if key.is_empty() {
        Span::styled(" no symbol ", Style::default().fg(Color::Gray))
    } else {
        Span::styled(
            format!(" {key} ({}) ", app.position.unit_label),
            Style::default().fg(Color::Cyan),
        )
    };

    let status_span = match app.status {
        Some(ref status) if status.is_error => Span::styled(
            format!(" {} ", status.text),
            Style::default().fg(Color::Red),
        ),
        Some(ref status) => Span::styled(
            format!(" {} ", status.text),
            Style::default().fg(Color::Green),
        ),
        None => Span::raw(""),
    };

    let counter = format!(" recorded: {} ", app.submitted);

    let spans = vec![
        Span::styled(
            " Trade Journal ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("│"),
        symbol_span,
        Span::raw("│"),
        status_span,
        Span::raw(format!(
            "{:>width$}",
            counter,
            width = area.width.saturating_sub(60) as usize
        )),
    ];

    let para = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}
