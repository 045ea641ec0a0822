use crate::edit::EditOp;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the line editor to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ClearScreen,
    HistoryPrevious,
    HistoryNext,
    Submit,
    Edit(EditOp),
    Ignore,
}

pub fn command_for(key: &KeyEvent) -> Command {
    if key.kind == KeyEventKind::Release {
        return Command::Ignore;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('l') => Command::ClearScreen,
            KeyCode::Char('p') => Command::HistoryPrevious,
            KeyCode::Char('n') => Command::HistoryNext,
            KeyCode::Char('a') => Command::Edit(EditOp::Home),
            KeyCode::Char('e') => Command::Edit(EditOp::End),
            KeyCode::Char('u') => Command::Edit(EditOp::KillToStart),
            KeyCode::Char('k') => Command::Edit(EditOp::KillToEnd),
            _ => Command::Ignore,
        };
    }

    match key.code {
        KeyCode::Enter => Command::Submit,
        KeyCode::Up => Command::HistoryPrevious,
        KeyCode::Down => Command::HistoryNext,
        KeyCode::Left => Command::Edit(EditOp::Left),
        KeyCode::Right => Command::Edit(EditOp::Right),
        KeyCode::Home => Command::Edit(EditOp::Home),
        KeyCode::End => Command::Edit(EditOp::End),
        KeyCode::Backspace => Command::Edit(EditOp::Backspace),
        KeyCode::Delete => Command::Edit(EditOp::Delete),
        KeyCode::Tab => Command::Edit(EditOp::Insert('\t')),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => {
            Command::Edit(EditOp::Insert(c))
        }
        _ => Command::Ignore,
    }
}

#[cfg(test)]
mod test {
    use super::{command_for, Command};
    use crate::edit::EditOp;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn maps_control_chords() {
        assert_eq!(command_for(&ctrl('l')), Command::ClearScreen);
        assert_eq!(command_for(&ctrl('p')), Command::HistoryPrevious);
        assert_eq!(command_for(&ctrl('n')), Command::HistoryNext);
        assert_eq!(command_for(&ctrl('x')), Command::Ignore);
    }

    #[test]
    fn maps_plain_keys() {
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(command_for(&key(KeyCode::Enter)), Command::Submit);
        assert_eq!(command_for(&key(KeyCode::Up)), Command::HistoryPrevious);
        assert_eq!(command_for(&key(KeyCode::Down)), Command::HistoryNext);
        assert_eq!(
            command_for(&KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::SHIFT)),
            Command::Edit(EditOp::Insert('Q'))
        );
        assert_eq!(command_for(&key(KeyCode::F(1))), Command::Ignore);
    }

    #[test]
    fn ignores_releases() {
        let release = KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(command_for(&release), Command::Ignore);
    }
}
