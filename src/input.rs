//! Keyboard input mapping.

use crossterm::event::{KeyCode, KeyModifiers};

use crate::models::Mode;

/// Something the user asked the app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleRunning,
    NextWhite,
    PrevWhite,
    NextBlack,
    PrevBlack,
    NewGame,
    BeginMove,
    InputChar(char),
    InputBackspace,
    SubmitMove,
    CancelInput,
    DismissAlert,
}

/// Translate a key event into an action for the current mode
///
/// Returns `None` for keys that mean nothing in that mode.
pub fn action_for_key(mode: Mode, key_code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    // Ctrl+C always quits, whatever the mode
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match key_code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(Action::Quit),
            _ => None,
        };
    }

    match mode {
        Mode::Normal => match key_code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char(' ') | KeyCode::Char('s') => Some(Action::ToggleRunning),
            KeyCode::Char('w') => Some(Action::NextWhite),
            KeyCode::Char('W') => Some(Action::PrevWhite),
            KeyCode::Char('b') => Some(Action::NextBlack),
            KeyCode::Char('B') => Some(Action::PrevBlack),
            KeyCode::Char('n') => Some(Action::NewGame),
            KeyCode::Char('m') | KeyCode::Enter => Some(Action::BeginMove),
            _ => None,
        },
        Mode::MoveInput => match key_code {
            KeyCode::Enter => Some(Action::SubmitMove),
            KeyCode::Esc => Some(Action::CancelInput),
            KeyCode::Backspace => Some(Action::InputBackspace),
            KeyCode::Char(c) if c.is_ascii_alphanumeric() || c == ' ' || c == '-' => {
                Some(Action::InputChar(c.to_ascii_lowercase()))
            }
            _ => None,
        },
        Mode::Alert => match key_code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Some(Action::DismissAlert),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        },
    }
}
