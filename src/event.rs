//! Keyboard event handling.
//!
//! The preview only scrolls, so the key map is small:
//! - `j` / `Down`: scroll down one row
//! - `k` / `Up`: scroll up one row
//! - `Ctrl+D` / `Ctrl+U`: half page down / up
//! - `PageDown` / `PageUp` / `Space`: full page
//! - `g` / `Home`, `G` / `End`: first / last rows
//! - `n` / `N`: next / previous motif
//! - `q`, `Esc`, `Ctrl+C`: quit

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::model::ViewerState;

/// Actions that can be triggered by keyboard input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action (key not recognized)
    None,
    /// Quit the viewer
    Quit,
    ScrollUp,
    ScrollDown,
    HalfPageUp,
    HalfPageDown,
    PageUp,
    PageDown,
    GotoTop,
    GotoBottom,
    /// Jump to the next motif (n)
    NextMatch,
    /// Jump to the previous motif (N)
    PreviousMatch,
    /// Resize event (terminal resized)
    Resize(u16, u16),
}

/// Polls for keyboard events with a timeout.
///
/// Returns `None` if no event occurred within the timeout.
pub fn poll_event(timeout: Duration) -> Option<Event> {
    if event::poll(timeout).ok()? {
        event::read().ok()
    } else {
        None
    }
}

/// Maps a terminal event to an action.
pub fn handle_event(event: Event) -> Action {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key_event(key),
        Event::Resize(width, height) => Action::Resize(width, height),
        _ => Action::None,
    }
}

fn handle_key_event(key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Action::Quit,
            KeyCode::Char('d') => Action::HalfPageDown,
            KeyCode::Char('u') => Action::HalfPageUp,
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
        KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
        KeyCode::PageDown | KeyCode::Char(' ') => Action::PageDown,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::Char('g') | KeyCode::Home => Action::GotoTop,
        KeyCode::Char('G') | KeyCode::End => Action::GotoBottom,
        KeyCode::Char('n') => Action::NextMatch,
        KeyCode::Char('N') => Action::PreviousMatch,
        _ => Action::None,
    }
}

/// Applies an action to the viewer state.
///
/// Returns false once the viewer should quit.
pub fn apply_action(state: &mut ViewerState, action: Action) -> bool {
    match action {
        Action::None => {}
        Action::Quit => state.should_quit = true,
        Action::ScrollUp => state.scroll_up(1),
        Action::ScrollDown => state.scroll_down(1),
        Action::HalfPageUp => state.half_page_up(),
        Action::HalfPageDown => state.half_page_down(),
        Action::PageUp => state.page_up(),
        Action::PageDown => state.page_down(),
        Action::GotoTop => state.goto_top(),
        Action::GotoBottom => state.goto_bottom(),
        Action::NextMatch => state.next_match(),
        Action::PreviousMatch => state.previous_match(),
        Action::Resize(_, _) => {
            // Resize is handled in the main loop with actual terminal dimensions
        }
    }
    !state.should_quit
}
