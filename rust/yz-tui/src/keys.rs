//! Key bindings: crossterm key events to engine inputs.
//!
//! Kept free of terminal state so the whole table can be unit tested.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use yz_core::{Input, Mode, NameEdit};

/// What a key press asks for. UI-local moves never reach the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Engine(Input),
    /// Cycle focus between name fields.
    NextField,
    CursorUp,
    CursorDown,
    /// Score the category under the cursor.
    SelectCursor,
}

pub fn map_key(mode: Mode, k: KeyEvent, name_focus: usize) -> Option<Action> {
    if k.modifiers.contains(KeyModifiers::CONTROL) && k.code == KeyCode::Char('c') {
        return Some(Action::Engine(Input::Quit));
    }
    let a = match mode {
        Mode::ModeSelection => match k.code {
            KeyCode::Char('1') => Action::Engine(Input::SelectPlayerCount(1)),
            KeyCode::Char('2') => Action::Engine(Input::SelectPlayerCount(2)),
            KeyCode::Char('h') | KeyCode::Char('?') | KeyCode::F(1) => {
                Action::Engine(Input::RequestHelp)
            }
            KeyCode::Char('q') | KeyCode::Esc => Action::Engine(Input::Quit),
            _ => return None,
        },
        Mode::NameInput => match k.code {
            KeyCode::Enter => Action::Engine(Input::Start),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => Action::NextField,
            KeyCode::Backspace => Action::Engine(Input::EditName {
                player: name_focus,
                edit: NameEdit::Backspace,
            }),
            KeyCode::F(1) => Action::Engine(Input::RequestHelp),
            KeyCode::Esc => Action::Engine(Input::Quit),
            KeyCode::Char(c) => Action::Engine(Input::EditName {
                player: name_focus,
                edit: NameEdit::Insert(c.to_string()),
            }),
            _ => return None,
        },
        Mode::HowToPlay => match k.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('b') => {
                Action::Engine(Input::BackToMenu)
            }
            KeyCode::Char('q') => Action::Engine(Input::Quit),
            _ => return None,
        },
        Mode::Playing => match k.code {
            KeyCode::Char(' ') | KeyCode::Char('r') => Action::Engine(Input::Roll),
            KeyCode::Char(c @ '1'..='5') => {
                Action::Engine(Input::ToggleDie(c as usize - '1' as usize))
            }
            KeyCode::Up | KeyCode::Char('k') => Action::CursorUp,
            KeyCode::Down | KeyCode::Char('j') => Action::CursorDown,
            KeyCode::Enter => Action::SelectCursor,
            KeyCode::Char('n') => Action::Engine(Input::Restart),
            KeyCode::Char('q') | KeyCode::Esc => Action::Engine(Input::Quit),
            _ => return None,
        },
        Mode::GameOver => match k.code {
            KeyCode::Char('n') | KeyCode::Enter => Action::Engine(Input::Restart),
            KeyCode::Char('q') | KeyCode::Esc => Action::Engine(Input::Quit),
            _ => return None,
        },
    };
    Some(a)
}

/// One-line key help for the status bar.
pub fn help_line(mode: Mode) -> &'static str {
    match mode {
        Mode::ModeSelection => "1 one player | 2 two players | h how to play | q quit",
        Mode::NameInput => "type a name | Tab next field | Enter start | F1 help | Esc quit",
        Mode::HowToPlay => "Esc/Enter back | q quit",
        Mode::Playing => {
            "Space roll | 1-5 hold die | Up/Down pick category | Enter score | n new game | q quit"
        }
        Mode::GameOver => "n/Enter new game | q quit",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn ctrl_c_quits_everywhere() {
        let k = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        for mode in [
            Mode::ModeSelection,
            Mode::NameInput,
            Mode::HowToPlay,
            Mode::Playing,
            Mode::GameOver,
        ] {
            assert_eq!(map_key(mode, k, 0), Some(Action::Engine(Input::Quit)));
        }
    }

    #[test]
    fn digits_mean_player_count_then_dice() {
        assert_eq!(
            map_key(Mode::ModeSelection, key(KeyCode::Char('2')), 0),
            Some(Action::Engine(Input::SelectPlayerCount(2)))
        );
        assert_eq!(
            map_key(Mode::Playing, key(KeyCode::Char('5')), 0),
            Some(Action::Engine(Input::ToggleDie(4)))
        );
        assert_eq!(map_key(Mode::Playing, key(KeyCode::Char('6')), 0), None);
    }

    #[test]
    fn name_keys_target_the_focused_field() {
        assert_eq!(
            map_key(Mode::NameInput, key(KeyCode::Char('q')), 1),
            Some(Action::Engine(Input::EditName {
                player: 1,
                edit: NameEdit::Insert("q".to_string()),
            }))
        );
        assert_eq!(
            map_key(Mode::NameInput, key(KeyCode::Tab), 0),
            Some(Action::NextField)
        );
    }

    #[test]
    fn restart_only_from_play_or_game_over() {
        let n = key(KeyCode::Char('n'));
        assert_eq!(
            map_key(Mode::GameOver, n, 0),
            Some(Action::Engine(Input::Restart))
        );
        assert_eq!(map_key(Mode::ModeSelection, n, 0), None);
    }
}
