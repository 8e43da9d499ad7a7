use anyhow::{Context, Result};
use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType};
use crossterm::QueueableCommand;
use std::io::{self, Write};

/// Logical key token produced by one blocking read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Up,
    Down,
    Enter,
    Esc,
    Interrupt,
    Other,
}

pub trait KeySource {
    fn next_key(&mut self) -> Result<Key>;
}

/// Blocking keyboard input from the real terminal. Raw mode is held only for
/// the duration of a single read, so subprocesses spawned between reads get a
/// cooked terminal.
pub struct TerminalInput;

impl KeySource for TerminalInput {
    fn next_key(&mut self) -> Result<Key> {
        let _guard = RawModeGuard::acquire().context("failed to enter raw terminal mode")?;
        loop {
            if let Event::Key(key) = event::read().context("failed to read terminal event")? {
                if key.kind != KeyEventKind::Release {
                    return Ok(map_key(&key));
                }
            }
        }
    }
}

// Invariant: cooked mode is restored on every exit path, including unwind.
struct RawModeGuard;

impl RawModeGuard {
    fn acquire() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

fn map_key(key: &KeyEvent) -> Key {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Key::Interrupt;
    }
    match key.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        _ => Key::Other,
    }
}

pub fn clear(out: &mut impl Write) -> Result<()> {
    out.queue(Clear(ClearType::All))?;
    out.queue(MoveTo(0, 0))?;
    out.flush()?;
    Ok(())
}

pub fn size() -> (u16, u16) {
    crossterm::terminal::size().unwrap_or((80, 24))
}

/// Cooked-mode line input for backends that prompt for a name.
pub fn prompt_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line).ok()?;
    let line = line.trim().to_string();
    if line.is_empty() {
        None
    } else {
        Some(line)
    }
}
