//! Main UI rendering coordinator.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::app::{App, Field};
use super::components::{form, results, status_bar};

/// Form rows plus the two hint rows and the borders.
const FORM_HEIGHT: u16 = Field::ALL.len() as u16 + 4;

/// Renders the entire application UI.
pub fn render(frame: &mut Frame, app: &App) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),           // Status bar
            Constraint::Length(FORM_HEIGHT), // Form | Position
            Constraint::Min(3),              // Problems
            Constraint::Length(1),           // Keybindings help
        ])
        .split(frame.area());

    status_bar::render(frame, main_layout[0], app);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(main_layout[1]);

    form::render(frame, middle[0], app);
    results::render(frame, middle[1], app);

    render_problems(frame, main_layout[2], app);
    render_keybindings(frame, main_layout[3]);
}

/// Lists every reason the form cannot be submitted yet.
fn render_problems(frame: &mut Frame, area: Rect, app: &App) {
    let (title, color) = if app.errors.is_empty() {
        (" Ready ".to_string(), Color::Green)
    } else {
        (format!(" Problems ({}) ", app.errors.len()), Color::Red)
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let lines: Vec<Line> = if app.errors.is_empty() {
        vec![Line::from(Span::styled(
            "Press Enter to record this trade",
            Style::default().fg(Color::Green),
        ))]
    } else {
        app.errors
            .iter()
            .map(|e| Line::from(Span::styled(format!("• {e}"), Style::default().fg(Color::Red))))
            .collect()
    };

    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(para, area);
}

fn render_keybindings(frame: &mut Frame, area: Rect) {
    let help = "[Tab/↓]next [Shift-Tab/↑]previous [l/s]direction [Enter]record [Ctrl-U]clear field [Esc]quit";
    let para = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}
