pub mod cmd;
pub mod docker;
pub mod gh;
pub mod tmux;

use chrono::{DateTime, Utc};
use std::process::Command;

/// What the controller should do after the primary action fires.
pub enum Handoff {
    /// Hand the terminal over to this command and wait for it to finish.
    Run(Command),
    /// The action completed in place (e.g. a browser was opened).
    Done,
}

/// A backend-declared single-key command, shown in the control legend.
/// Actions with `confirm` go through a y/N prompt before dispatch.
#[derive(Debug, Clone, Copy)]
pub struct SecondaryAction {
    pub key: char,
    pub label: &'static str,
    pub confirm: bool,
}

/// One external tool bridged into the picker. Every method that shells out
/// degrades to an empty or diagnostic result instead of failing: a flaky tool
/// must not take the interactive session down with it.
pub trait Backend {
    type Item;

    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;

    /// True when the underlying tool is usable in this environment. Checked
    /// once before the loop starts, never mid-session.
    fn is_available(&self) -> bool;

    /// Fetch the current item list. Launch failures, non-zero exits and
    /// malformed records all degrade to fewer (or zero) items.
    fn list_items(&self) -> Vec<Self::Item>;

    /// Short identity for confirmation prompts and diagnostics.
    fn item_name(&self, item: &Self::Item) -> String;

    /// One-line display string. Pure: must not invoke the external tool.
    fn render_line(&self, item: &Self::Item, selected: bool) -> String;

    /// Multi-line detail text for the preview pane. May invoke the external
    /// tool; returns a short diagnostic string on failure.
    fn render_preview(&self, item: &Self::Item) -> String;

    fn primary_action(&self, item: &Self::Item) -> Handoff;

    fn secondary_actions(&self) -> &[SecondaryAction] {
        &[]
    }

    /// Execute a secondary action. Returns true when the item list should be
    /// re-fetched (state-changing action that succeeded).
    fn handle_secondary(&self, _key: char, _item: &Self::Item) -> bool {
        false
    }

    #[allow(dead_code)]
    fn can_create_new(&self) -> bool {
        false
    }

    /// Create a new item. Returns true when the item list should be
    /// re-fetched.
    fn create_new(&self) -> bool {
        false
    }

    /// One-line tip shown when the initial list is empty.
    fn empty_hint(&self) -> Option<&'static str> {
        None
    }
}

pub(crate) fn relative_time(dt: DateTime<Utc>) -> String {
    let secs = Utc::now().signed_duration_since(dt).num_seconds();
    if secs < 60 {
        format!("{}s ago", secs)
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else if secs < 86400 {
        format!("{}h ago", secs / 3600)
    } else {
        format!("{}d ago", secs / 86400)
    }
}
