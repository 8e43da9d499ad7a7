use chrono::{DateTime, TimeZone, Utc};
use std::process::Command;

use crate::backend::{cmd, relative_time, Backend, Handoff, SecondaryAction};
use crate::terminal;
use crate::tlog;
use crate::ui::theme::Theme;
use crate::ui::truncate_chars;

const LIST_FORMAT: &str = "#{session_name}\t#{session_windows}\t#{session_created}";
const WINDOW_FORMAT: &str = "#{window_index}: #{window_name} #{?window_active,(active),}";
/// Cap on the pane capture shown in the preview.
const PANE_CAPTURE_CHARS: usize = 500;

const ACTIONS: &[SecondaryAction] = &[
    SecondaryAction {
        key: 'd',
        label: "Delete session",
        confirm: true,
    },
    SecondaryAction {
        key: 'a',
        label: "New session",
        confirm: false,
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmuxSession {
    pub name: String,
    pub windows: u32,
    pub created: Option<DateTime<Utc>>,
}

impl TmuxSession {
    fn created_display(&self) -> String {
        self.created
            .map(relative_time)
            .unwrap_or_else(|| "-".to_string())
    }
}

pub struct TmuxBackend {
    program: String,
}

impl TmuxBackend {
    pub fn new() -> Self {
        Self {
            program: "tmux".to_string(),
        }
    }

    #[cfg(test)]
    fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Backend for TmuxBackend {
    type Item = TmuxSession;

    fn name(&self) -> &'static str {
        "tmux"
    }

    fn description(&self) -> &'static str {
        "Interactive tmux session picker"
    }

    fn is_available(&self) -> bool {
        cmd::available(&self.program, "-V")
    }

    fn list_items(&self) -> Vec<TmuxSession> {
        match cmd::capture(&self.program, &["list-sessions", "-F", LIST_FORMAT]) {
            Ok(raw) => parse_sessions(&raw),
            Err(e) => {
                tlog!(warn, "tmux list-sessions failed: {}", e);
                Vec::new()
            }
        }
    }

    fn item_name(&self, item: &TmuxSession) -> String {
        item.name.clone()
    }

    fn render_line(&self, item: &TmuxSession, selected: bool) -> String {
        let meta = Theme::hint().apply(format!("({} windows)", item.windows));
        if selected {
            format!("{} {}", Theme::selected().apply(&item.name), meta)
        } else {
            format!("{} {}", Theme::item().apply(&item.name), meta)
        }
    }

    fn render_preview(&self, item: &TmuxSession) -> String {
        let windows = match cmd::capture(
            &self.program,
            &["list-windows", "-t", &item.name, "-F", WINDOW_FORMAT],
        ) {
            Ok(raw) => raw.trim_end().to_string(),
            Err(e) => {
                tlog!(warn, "tmux list-windows failed for {}: {}", item.name, e);
                return format!("unable to inspect session {}", item.name);
            }
        };

        let pane = cmd::capture(&self.program, &["capture-pane", "-t", &item.name, "-p"])
            .unwrap_or_default();
        let capped = truncate_chars(&pane, PANE_CAPTURE_CHARS);

        let mut text = format!(
            "{}: {} windows, created {}\n\nWindows:\n{}\n\nPreview:\n{}",
            item.name,
            item.windows,
            item.created_display(),
            windows,
            capped,
        );
        if capped.len() < pane.len() {
            text.push_str("...");
        }
        text
    }

    fn primary_action(&self, item: &TmuxSession) -> Handoff {
        let mut command = Command::new(&self.program);
        command.args(["attach-session", "-t", &item.name]);
        Handoff::Run(command)
    }

    fn secondary_actions(&self) -> &[SecondaryAction] {
        ACTIONS
    }

    fn handle_secondary(&self, key: char, item: &TmuxSession) -> bool {
        match key {
            'd' => match cmd::run(&self.program, &["kill-session", "-t", &item.name]) {
                Ok(()) => true,
                Err(e) => {
                    tlog!(error, "tmux kill-session failed for {}: {}", item.name, e);
                    false
                }
            },
            'a' => self.create_new(),
            _ => false,
        }
    }

    fn can_create_new(&self) -> bool {
        true
    }

    fn create_new(&self) -> bool {
        let Some(name) = terminal::prompt_line("Enter new session name: ") else {
            return false;
        };
        match cmd::run(&self.program, &["new-session", "-d", "-s", &name]) {
            Ok(()) => {
                println!("{}", Theme::ok().apply(format!("Session '{}' created", name)));
                true
            }
            Err(e) => {
                tlog!(error, "tmux new-session failed for {}: {}", name, e);
                println!(
                    "{}",
                    Theme::error().apply(format!("Failed to create session '{}'", name))
                );
                false
            }
        }
    }

    fn empty_hint(&self) -> Option<&'static str> {
        Some("Create one with: tmux new-session -d -s <name>")
    }
}

fn parse_sessions(raw: &str) -> Vec<TmuxSession> {
    raw.lines().filter_map(parse_session_line).collect()
}

fn parse_session_line(line: &str) -> Option<TmuxSession> {
    let mut parts = line.split('\t');
    let name = parts.next()?.trim();
    if name.is_empty() {
        return None;
    }
    let windows = parts.next()?.trim().parse().ok()?;
    let created = parts
        .next()?
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(|epoch| Utc.timestamp_opt(epoch, 0).single());
    Some(TmuxSession {
        name: name.to_string(),
        windows,
        created,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::cmd::testing::fake_tool;

    #[test]
    fn test_parse_sessions() {
        let raw = "work\t3\t1700000000\nscratch\t1\t1700000100\n";
        let sessions = parse_sessions(raw);
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].name, "work");
        assert_eq!(sessions[0].windows, 3);
        assert!(sessions[0].created.is_some());
        assert_eq!(sessions[1].name, "scratch");
        assert_eq!(sessions[1].windows, 1);
    }

    #[test]
    fn test_parse_skips_malformed_lines() {
        let raw = "work\t3\t1700000000\nno-fields\n\t2\t123\nbad\tnan\t123\n";
        let sessions = parse_sessions(raw);
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].name, "work");
    }

    #[test]
    fn test_parse_tolerates_unparsable_created() {
        let sessions = parse_sessions("work\t3\tnot-a-timestamp\n");
        assert_eq!(sessions.len(), 1);
        assert!(sessions[0].created.is_none());
        assert_eq!(sessions[0].created_display(), "-");
    }

    #[test]
    fn test_list_items_from_fake_tmux() {
        let dir = tempfile::tempdir().unwrap();
        let tool = fake_tool(
            dir.path(),
            "tmux",
            "printf 'work\\t3\\t1700000000\\nscratch\\t1\\t1700000100\\n'",
        );
        let backend = TmuxBackend::with_program(tool);
        let items = backend.list_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "work");
    }

    #[test]
    fn test_list_items_failure_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let tool = fake_tool(dir.path(), "tmux", "echo 'no server running' >&2; exit 1");
        let backend = TmuxBackend::with_program(tool);
        assert!(backend.list_items().is_empty());

        let missing = TmuxBackend::with_program("/nonexistent/pickr-tmux");
        assert!(missing.list_items().is_empty());
    }

    #[test]
    fn test_render_line_is_pure() {
        let backend = TmuxBackend::with_program("/nonexistent/pickr-tmux");
        let session = TmuxSession {
            name: "work".to_string(),
            windows: 2,
            created: None,
        };
        let first = backend.render_line(&session, true);
        let second = backend.render_line(&session, true);
        assert_eq!(first, second);
        assert!(first.contains("work"));
        assert!(first.contains("2 windows"));
        assert_ne!(first, backend.render_line(&session, false));
    }

    #[test]
    fn test_preview_failure_is_diagnostic_not_panic() {
        let backend = TmuxBackend::with_program("/nonexistent/pickr-tmux");
        let session = TmuxSession {
            name: "work".to_string(),
            windows: 2,
            created: None,
        };
        let preview = backend.render_preview(&session);
        assert!(preview.contains("unable to inspect session work"));
    }

    #[test]
    fn test_availability_probe() {
        let dir = tempfile::tempdir().unwrap();
        let tool = fake_tool(dir.path(), "tmux", "exit 0");
        assert!(TmuxBackend::with_program(tool).is_available());
        assert!(!TmuxBackend::with_program("/nonexistent/pickr-tmux").is_available());
    }
}
