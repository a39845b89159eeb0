//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

use crate::models::{Direction, NewTrade};
use crate::tui::input::TextInput;

use super::app::{App, Field};

/// Events that can occur in the application.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI updates.
    Tick,
}

/// Messages that update application state.
#[derive(Debug)]
pub enum Message {
    /// Input event from terminal.
    Input(Event),
    /// Request to quit the application.
    Quit,
}

/// Actions that require handling outside the form.
#[derive(Debug)]
pub enum Action {
    /// A clean form was submitted.
    Submit(NewTrade),
}

/// Spawns a task that polls for terminal events and sends them to a channel.
///
/// If the terminal can no longer be read, a [`Message::Quit`] is sent so the
/// form shuts down instead of waiting for input that never comes.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<Message>) {
    tokio::spawn(async move {
        loop {
            // Poll for events with a 50ms timeout
            let polled = tokio::task::spawn_blocking(|| -> std::io::Result<Option<CrosstermEvent>> {
                if event::poll(Duration::from_millis(50))? {
                    event::read().map(Some)
                } else {
                    Ok(None)
                }
            })
            .await;

            let message = match polled {
                Ok(Ok(Some(CrosstermEvent::Key(key)))) => Message::Input(Event::Key(key)),
                Ok(Ok(Some(CrosstermEvent::Resize(w, h)))) => Message::Input(Event::Resize(w, h)),
                Ok(Ok(_)) => continue,
                Ok(Err(e)) => {
                    tracing::warn!(error = %e, "terminal input failed, quitting");
                    let _ = tx.send(Message::Quit);
                    break;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "event reader task failed, quitting");
                    let _ = tx.send(Message::Quit);
                    break;
                }
            };
            if tx.send(message).is_err() {
                break;
            }
        }
    });
}

/// Spawns a task that sends periodic tick events.
pub fn spawn_tick_timer(tx: mpsc::UnboundedSender<Message>, interval_ms: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
        loop {
            interval.tick().await;
            if tx.send(Message::Input(Event::Tick)).is_err() {
                break;
            }
        }
    });
}

/// Updates application state based on a message.
pub fn update(app: &mut App, message: Message) -> Option<Action> {
    match message {
        Message::Input(event) => handle_input(app, event),
        Message::Quit => {
            app.should_quit = true;
            None
        }
    }
}

/// Handles input events and updates application state.
fn handle_input(app: &mut App, event: Event) -> Option<Action> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Key(_) | Event::Resize(_, _) => None,
        Event::Tick => {
            app.clear_stale_status();
            None
        }
    }
}

/// Handles key press events.
fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    // Global keys
    match key.code {
        KeyCode::Esc => {
            app.should_quit = true;
            return None;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return None;
        }
        KeyCode::Enter => return app.submit().map(Action::Submit),
        KeyCode::Tab | KeyCode::Down => {
            app.focus_next();
            return None;
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.focus_previous();
            return None;
        }
        _ => {}
    }

    if app.focus == Field::Direction {
        handle_direction_keys(app, key);
    } else {
        handle_text_keys(app, key);
    }
    None
}

/// Keys on the Long/Short toggle.
fn handle_direction_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => app.set_direction(None),
        KeyCode::Char('l' | 'L') => app.set_direction(Some(Direction::Long)),
        KeyCode::Char('s' | 'S') => app.set_direction(Some(Direction::Short)),
        KeyCode::Backspace | KeyCode::Delete => app.clear_direction(),
        _ => {}
    }
}

/// Keys on a text field.
fn handle_text_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => app.type_char(c),
        KeyCode::Backspace => app.edit(TextInput::backspace),
        KeyCode::Delete => app.edit(TextInput::delete),
        KeyCode::Left => app.edit(TextInput::move_left),
        KeyCode::Right => app.edit(TextInput::move_right),
        KeyCode::Home => app.edit(TextInput::move_home),
        KeyCode::End => app.edit(TextInput::move_end),
        KeyCode::Char('u') => app.edit(TextInput::clear),
        _ => {}
    }
}
