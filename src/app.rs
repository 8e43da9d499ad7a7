use anyhow::Result;
use std::io::Write;

use crate::backend::{Backend, Handoff, SecondaryAction};
use crate::input::{self, Action};
use crate::terminal::{self, KeySource};
use crate::tlog;
use crate::ui;
use crate::ui::theme::Theme;

const DEFAULT_PREVIEW_ROWS: u16 = 20;

/// How a picker session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The initial fetch came back empty (or the tool failed): nothing to pick.
    NoItems,
    /// Normal quit.
    Quit,
    /// The list became empty after a state-changing action.
    Drained,
    /// The primary action was dispatched; the loop does not resume.
    Selected,
}

pub struct App<B: Backend> {
    backend: B,
    items: Vec<B::Item>,
    selected: usize,
    preview_rows: u16,
}

impl<B: Backend> App<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            items: Vec::new(),
            selected: 0,
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }

    /// The input/dispatch loop. Draw, block on one key, route it, repeat
    /// until a terminal state. Adapter calls never fail; errors here are the
    /// controller's own (terminal I/O) and propagate.
    pub fn run<K: KeySource, W: Write>(&mut self, keys: &mut K, out: &mut W) -> Result<Outcome> {
        self.items = self.backend.list_items();
        if self.items.is_empty() {
            return Ok(Outcome::NoItems);
        }

        loop {
            self.draw(out)?;
            let key = keys.next_key()?;
            match input::handle_key(&key) {
                Action::Quit => return Ok(Outcome::Quit),
                Action::MoveDown => {
                    self.selected = (self.selected + 1).min(self.items.len() - 1);
                }
                Action::MoveUp => {
                    self.selected = self.selected.saturating_sub(1);
                }
                Action::Select => {
                    terminal::clear(out)?;
                    match self.backend.primary_action(&self.items[self.selected]) {
                        Handoff::Run(mut command) => {
                            if let Err(e) = command.status() {
                                tlog!(error, "terminal handoff failed: {}", e);
                            }
                        }
                        Handoff::Done => {}
                    }
                    return Ok(Outcome::Selected);
                }
                Action::Secondary(c) => {
                    let Some(action) = self
                        .backend
                        .secondary_actions()
                        .iter()
                        .find(|a| a.key == c)
                        .copied()
                    else {
                        continue;
                    };
                    if action.confirm && !self.confirm(&action, keys, out)? {
                        continue;
                    }
                    if self.backend.handle_secondary(c, &self.items[self.selected]) {
                        self.items = self.backend.list_items();
                        if self.items.is_empty() {
                            return Ok(Outcome::Drained);
                        }
                        self.selected = self.selected.min(self.items.len() - 1);
                    }
                }
                Action::None => {}
            }
        }
    }

    fn draw<W: Write>(&self, out: &mut W) -> Result<()> {
        let (cols, rows) = terminal::size();
        terminal::clear(out)?;
        let frame = ui::frame::build_frame(
            &self.backend,
            &self.items,
            self.selected,
            cols,
            rows,
            self.preview_rows,
        );
        out.write_all(frame.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    fn confirm<K: KeySource, W: Write>(
        &self,
        action: &SecondaryAction,
        keys: &mut K,
        out: &mut W,
    ) -> Result<bool> {
        let name = self.backend.item_name(&self.items[self.selected]);
        let prompt = format!("{} '{}'? (y/N) ", action.label, name);
        write!(out, "\n{}", Theme::prompt().apply(prompt))?;
        out.flush()?;
        Ok(input::confirmed(&keys.next_key()?))
    }
}
