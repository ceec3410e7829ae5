use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::AppEvent;

/// What currently owns the keyboard.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Mode {
    Splash,
    Editing,
    Dialog,
    PermissionPrompt,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum KeyAction {
    Event(AppEvent),
    /// Generate from whatever is in the text field.
    Generate,
    /// Forward to the text field.
    Edit(KeyEvent),
    Ignore,
}

pub fn map_key(mode: Mode, key: KeyEvent) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return KeyAction::Event(AppEvent::Quit);
    }

    match mode {
        Mode::Splash => match key.code {
            KeyCode::Esc => KeyAction::Event(AppEvent::Quit),
            _ => KeyAction::Ignore,
        },
        Mode::Dialog => match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => {
                KeyAction::Event(AppEvent::DismissDialog)
            }
            _ => KeyAction::Ignore,
        },
        Mode::PermissionPrompt => match key.code {
            KeyCode::Char('y' | 'Y') => KeyAction::Event(AppEvent::PermissionResult(true)),
            KeyCode::Char('n' | 'N') | KeyCode::Esc => {
                KeyAction::Event(AppEvent::PermissionResult(false))
            }
            _ => KeyAction::Ignore,
        },
        Mode::Editing => match key.code {
            KeyCode::Esc => KeyAction::Event(AppEvent::Quit),
            KeyCode::Enter => KeyAction::Generate,
            KeyCode::Char('d') if ctrl => KeyAction::Event(AppEvent::Export),
            KeyCode::Char('s') if ctrl => KeyAction::Event(AppEvent::Share),
            _ => KeyAction::Edit(key),
        },
    }
}
