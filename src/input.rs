use crate::terminal::Key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    Select,
    Secondary(char),
    None,
}

pub fn handle_key(key: &Key) -> Action {
    match key {
        Key::Char('q') | Key::Interrupt => Action::Quit,
        Key::Char('j') | Key::Down => Action::MoveDown,
        Key::Char('k') | Key::Up => Action::MoveUp,
        Key::Enter => Action::Select,
        Key::Char(c) => Action::Secondary(*c),
        _ => Action::None,
    }
}

/// Single-key confirmation: only an explicit yes proceeds.
pub fn confirmed(key: &Key) -> bool {
    matches!(key, Key::Char('y') | Key::Char('Y'))
}
