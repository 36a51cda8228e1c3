use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};

/// Result of handling a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Submit,
    Toggle,
    Delete,
    Refresh,
    Continue,
}

/// Handle a key press. Returns an action indicating what the event loop should do.
pub fn handle_key(app: &mut App, key: KeyEvent) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }
    match app.mode {
        Mode::List => handle_list(app, key),
        Mode::Form => handle_form(app, key),
    }
}

fn handle_list(app: &mut App, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_down();
            KeyAction::Continue
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_up();
            KeyAction::Continue
        }
        KeyCode::Char(' ') | KeyCode::Enter => KeyAction::Toggle,
        KeyCode::Char('d') | KeyCode::Delete => KeyAction::Delete,
        KeyCode::Char('r') => KeyAction::Refresh,
        KeyCode::Char('a') | KeyCode::Char('i') => {
            app.clear_error();
            app.focus_form();
            KeyAction::Continue
        }
        _ => KeyAction::Continue,
    }
}

fn handle_form(app: &mut App, key: KeyEvent) -> KeyAction {
    let form = &mut app.form;
    match key.code {
        KeyCode::Esc => {
            app.focus_list();
            KeyAction::Continue
        }
        KeyCode::Tab => {
            form.next_field();
            KeyAction::Continue
        }
        KeyCode::BackTab => {
            form.prev_field();
            KeyAction::Continue
        }
        KeyCode::Right => {
            form.cycle(true);
            KeyAction::Continue
        }
        KeyCode::Left => {
            form.cycle(false);
            KeyAction::Continue
        }
        KeyCode::Enter => KeyAction::Submit,
        KeyCode::Backspace => {
            if let Some(buf) = form.focused_buf_mut() {
                buf.pop();
            }
            KeyAction::Continue
        }
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                if c == 'u' {
                    if let Some(buf) = form.focused_buf_mut() {
                        buf.clear();
                    }
                }
            } else if let Some(buf) = form.focused_buf_mut() {
                buf.push(c);
            }
            KeyAction::Continue
        }
        _ => KeyAction::Continue,
    }
}
