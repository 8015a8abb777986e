//! Event handling and key mappings.
//!
//! Terminal events are turned into [`Message`]s here. Key bindings depend
//! on what has input focus: the board, the task editor, or the search
//! field. Mouse events map the same way everywhere and are interpreted by
//! the application.

use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use taskboard_protocol::Message;

use crate::state::Focus;

/// Default poll timeout for events.
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Polls for a terminal event with the default timeout.
///
/// Returns `Some(Event)` if an event is available within the timeout,
/// or `None` if the timeout expires without an event.
///
/// # Errors
///
/// Returns an error if polling the terminal fails.
pub fn poll_event() -> std::io::Result<Option<Event>> {
    if event::poll(POLL_TIMEOUT)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Converts an event (keyboard or mouse) to an application message, using
/// the key bindings for `focus`.
#[must_use]
pub fn event_to_message(event: &Event, focus: Focus) -> Option<Message> {
    match event {
        Event::Key(key) => match focus {
            Focus::Board => key_to_message(*key),
            Focus::Editor => key_to_editor_message(*key),
            Focus::Search => key_to_search_message(*key),
        },
        Event::Mouse(mouse) => mouse_to_message(mouse),
        _ => None,
    }
}

/// Converts a mouse event to a pointer message.
///
/// Only the left button is tracked: press, drag, and release.
#[must_use]
fn mouse_to_message(mouse: &MouseEvent) -> Option<Message> {
    let (column, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Message::PointerDown { column, row }),
        MouseEventKind::Drag(MouseButton::Left) => Some(Message::PointerDrag { column, row }),
        MouseEventKind::Up(MouseButton::Left) => Some(Message::PointerUp { column, row }),
        _ => None,
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

/// Converts a key event on the board to an application message.
///
/// # Key Bindings
///
/// | Key | Action |
/// |-----|--------|
/// | `Ctrl+C` | Quit |
/// | `Esc` | Escape (cancel drag, clear selection) |
/// | Arrow keys | Navigate (or pick the drop lane while carrying a card) |
/// | `Enter` or `e` | Edit the selected task |
/// | `n` | New task in the focused lane |
/// | `d` or `Delete` | Delete the selected task |
/// | `m` | Pick up / drop the selected card |
/// | `/` | Search |
/// | `p` | Start / pause the pomodoro |
/// | `r` | Reset the pomodoro |
/// | `t` | Toggle theme |
/// | `a` | Next accent color |
/// | `?` | Toggle help |
#[must_use]
pub fn key_to_message(key: KeyEvent) -> Option<Message> {
    if is_ctrl_c(&key) {
        return Some(Message::Quit);
    }

    match key.code {
        KeyCode::Esc => Some(Message::Escape),

        KeyCode::Left => Some(Message::NavigateLeft),
        KeyCode::Right => Some(Message::NavigateRight),
        KeyCode::Up => Some(Message::NavigateUp),
        KeyCode::Down => Some(Message::NavigateDown),

        KeyCode::Enter | KeyCode::Char('e') => Some(Message::EditSelected),
        KeyCode::Char('n') => Some(Message::NewTask),
        KeyCode::Char('d') | KeyCode::Delete => Some(Message::DeleteSelected),
        KeyCode::Char('m') => Some(Message::PickUpOrDrop),

        KeyCode::Char('/') => Some(Message::OpenSearch),
        KeyCode::Char('p') => Some(Message::PomodoroToggle),
        KeyCode::Char('r') => Some(Message::PomodoroReset),
        KeyCode::Char('t') => Some(Message::ToggleTheme),
        KeyCode::Char('a') => Some(Message::CycleAccent),
        KeyCode::Char('?') => Some(Message::ToggleHelp),

        _ => None,
    }
}

/// Converts a key event to an editor message.
///
/// # Key Bindings (Editor)
///
/// | Key | Action |
/// |-----|--------|
/// | `Tab` / `Down` | Next field |
/// | `Shift+Tab` / `Up` | Previous field |
/// | `Left` / `Right` | Cycle priority |
/// | `Enter` | Save |
/// | `Esc` | Cancel |
/// | `Backspace` | Delete a character |
/// | Any char | Input |
#[must_use]
pub fn key_to_editor_message(key: KeyEvent) -> Option<Message> {
    if is_ctrl_c(&key) {
        return Some(Message::Quit);
    }

    match key.code {
        KeyCode::Esc => Some(Message::EditorCancel),
        KeyCode::Enter => Some(Message::EditorSave),
        KeyCode::Tab | KeyCode::Down => Some(Message::EditorNextField),
        KeyCode::BackTab | KeyCode::Up => Some(Message::EditorPrevField),
        KeyCode::Left => Some(Message::EditorCycle { delta: -1 }),
        KeyCode::Right => Some(Message::EditorCycle { delta: 1 }),
        KeyCode::Backspace => Some(Message::EditorBackspace),
        KeyCode::Char(ch) => Some(Message::EditorInput { ch }),
        _ => None,
    }
}

/// Converts a key event to a search-field message.
#[must_use]
pub fn key_to_search_message(key: KeyEvent) -> Option<Message> {
    if is_ctrl_c(&key) {
        return Some(Message::Quit);
    }

    match key.code {
        KeyCode::Esc => Some(Message::SearchClear),
        KeyCode::Enter => Some(Message::SearchConfirm),
        KeyCode::Backspace => Some(Message::SearchBackspace),
        KeyCode::Char(ch) => Some(Message::SearchInput { ch }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn make_key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn make_key_with_modifiers(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: event::KeyEventState::NONE,
        }
    }

    fn make_mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn ctrl_c() -> KeyEvent {
        make_key_with_modifiers(KeyCode::Char('c'), KeyModifiers::CONTROL)
    }

    #[test]
    fn ctrl_c_quits_in_every_context() {
        assert_eq!(key_to_message(ctrl_c()), Some(Message::Quit));
        assert_eq!(key_to_editor_message(ctrl_c()), Some(Message::Quit));
        assert_eq!(key_to_search_message(ctrl_c()), Some(Message::Quit));
        // 'q' is not a quit key
        assert_eq!(key_to_message(make_key(KeyCode::Char('q'))), None);
    }

    #[test]
    fn navigation_keys() {
        assert_eq!(
            key_to_message(make_key(KeyCode::Left)),
            Some(Message::NavigateLeft)
        );
        assert_eq!(
            key_to_message(make_key(KeyCode::Right)),
            Some(Message::NavigateRight)
        );
        assert_eq!(
            key_to_message(make_key(KeyCode::Up)),
            Some(Message::NavigateUp)
        );
        assert_eq!(
            key_to_message(make_key(KeyCode::Down)),
            Some(Message::NavigateDown)
        );
    }

    #[test]
    fn board_action_keys() {
        let cases = [
            (KeyCode::Enter, Message::EditSelected),
            (KeyCode::Char('e'), Message::EditSelected),
            (KeyCode::Char('n'), Message::NewTask),
            (KeyCode::Char('d'), Message::DeleteSelected),
            (KeyCode::Delete, Message::DeleteSelected),
            (KeyCode::Char('m'), Message::PickUpOrDrop),
            (KeyCode::Char('/'), Message::OpenSearch),
            (KeyCode::Char('p'), Message::PomodoroToggle),
            (KeyCode::Char('r'), Message::PomodoroReset),
            (KeyCode::Char('t'), Message::ToggleTheme),
            (KeyCode::Char('a'), Message::CycleAccent),
            (KeyCode::Char('?'), Message::ToggleHelp),
            (KeyCode::Esc, Message::Escape),
        ];
        for (code, expected) in cases {
            assert_eq!(key_to_message(make_key(code)), Some(expected), "{code:?}");
        }
    }

    #[test]
    fn unmapped_board_keys_return_none() {
        assert_eq!(key_to_message(make_key(KeyCode::Char('x'))), None);
        assert_eq!(key_to_message(make_key(KeyCode::F(1))), None);
        assert_eq!(key_to_message(make_key(KeyCode::Tab)), None);
    }

    #[test]
    fn editor_captures_text() {
        assert_eq!(
            key_to_editor_message(make_key(KeyCode::Char('n'))),
            Some(Message::EditorInput { ch: 'n' })
        );
        assert_eq!(
            key_to_editor_message(make_key(KeyCode::Char(' '))),
            Some(Message::EditorInput { ch: ' ' })
        );
        assert_eq!(
            key_to_editor_message(make_key(KeyCode::Backspace)),
            Some(Message::EditorBackspace)
        );
    }

    #[test]
    fn editor_field_and_control_keys() {
        assert_eq!(
            key_to_editor_message(make_key(KeyCode::Tab)),
            Some(Message::EditorNextField)
        );
        assert_eq!(
            key_to_editor_message(make_key_with_modifiers(
                KeyCode::BackTab,
                KeyModifiers::SHIFT
            )),
            Some(Message::EditorPrevField)
        );
        assert_eq!(
            key_to_editor_message(make_key(KeyCode::Left)),
            Some(Message::EditorCycle { delta: -1 })
        );
        assert_eq!(
            key_to_editor_message(make_key(KeyCode::Right)),
            Some(Message::EditorCycle { delta: 1 })
        );
        assert_eq!(
            key_to_editor_message(make_key(KeyCode::Enter)),
            Some(Message::EditorSave)
        );
        assert_eq!(
            key_to_editor_message(make_key(KeyCode::Esc)),
            Some(Message::EditorCancel)
        );
    }

    #[test]
    fn search_keys() {
        assert_eq!(
            key_to_search_message(make_key(KeyCode::Char('D'))),
            Some(Message::SearchInput { ch: 'D' })
        );
        assert_eq!(
            key_to_search_message(make_key(KeyCode::Backspace)),
            Some(Message::SearchBackspace)
        );
        assert_eq!(
            key_to_search_message(make_key(KeyCode::Enter)),
            Some(Message::SearchConfirm)
        );
        assert_eq!(
            key_to_search_message(make_key(KeyCode::Esc)),
            Some(Message::SearchClear)
        );
    }

    #[test]
    fn mouse_left_button_maps_to_pointer_messages() {
        assert_eq!(
            mouse_to_message(&make_mouse(MouseEventKind::Down(MouseButton::Left), 10, 5)),
            Some(Message::PointerDown { column: 10, row: 5 })
        );
        assert_eq!(
            mouse_to_message(&make_mouse(MouseEventKind::Drag(MouseButton::Left), 11, 6)),
            Some(Message::PointerDrag { column: 11, row: 6 })
        );
        assert_eq!(
            mouse_to_message(&make_mouse(MouseEventKind::Up(MouseButton::Left), 12, 7)),
            Some(Message::PointerUp { column: 12, row: 7 })
        );
    }

    #[test]
    fn other_mouse_events_ignored() {
        assert_eq!(
            mouse_to_message(&make_mouse(MouseEventKind::Down(MouseButton::Right), 1, 1)),
            None
        );
        assert_eq!(
            mouse_to_message(&make_mouse(MouseEventKind::Moved, 1, 1)),
            None
        );
        assert_eq!(
            mouse_to_message(&make_mouse(MouseEventKind::ScrollDown, 1, 1)),
            None
        );
    }

    #[test]
    fn event_to_message_follows_focus() {
        let key = Event::Key(make_key(KeyCode::Char('n')));
        assert_eq!(event_to_message(&key, Focus::Board), Some(Message::NewTask));
        assert_eq!(
            event_to_message(&key, Focus::Editor),
            Some(Message::EditorInput { ch: 'n' })
        );
        assert_eq!(
            event_to_message(&key, Focus::Search),
            Some(Message::SearchInput { ch: 'n' })
        );
    }

    #[test]
    fn event_to_message_handles_mouse_in_any_focus() {
        let mouse = Event::Mouse(make_mouse(MouseEventKind::Down(MouseButton::Left), 15, 8));
        assert_eq!(
            event_to_message(&mouse, Focus::Editor),
            Some(Message::PointerDown { column: 15, row: 8 })
        );
    }

    #[test]
    fn event_to_message_ignores_resize_events() {
        assert_eq!(event_to_message(&Event::Resize(80, 24), Focus::Board), None);
    }
}
