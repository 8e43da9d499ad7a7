use std::process::Command;

use crate::backend::{cmd, Backend, Handoff, SecondaryAction};
use crate::tlog;
use crate::ui::theme::Theme;

const LIST_FORMAT: &str = "{{.ID}}\t{{.Names}}\t{{.Status}}\t{{.Image}}";
const INSPECT_FORMAT: &str = "{{.Name}}: {{.Config.Image}}\nStatus: {{.State.Status}}\nCreated: {{.Created}}\nPorts: {{range $p, $conf := .NetworkSettings.Ports}}{{$p}}->{{(index $conf 0).HostPort}} {{end}}";
/// Tail cap for the log capture shown in the preview.
const LOG_TAIL_CHARS: usize = 1000;

const ACTIONS: &[SecondaryAction] = &[
    SecondaryAction {
        key: 's',
        label: "Start/stop container",
        confirm: false,
    },
    SecondaryAction {
        key: 'l',
        label: "View logs",
        confirm: false,
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub id: String,
    pub name: String,
    pub status: String,
    pub image: String,
}

impl Container {
    fn is_up(&self) -> bool {
        self.status.contains("Up")
    }
}

pub struct DockerBackend {
    program: String,
}

impl DockerBackend {
    pub fn new() -> Self {
        Self {
            program: "docker".to_string(),
        }
    }

    #[cfg(test)]
    fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Backend for DockerBackend {
    type Item = Container;

    fn name(&self) -> &'static str {
        "docker"
    }

    fn description(&self) -> &'static str {
        "Interactive docker container picker"
    }

    fn is_available(&self) -> bool {
        cmd::available(&self.program, "--version")
    }

    fn list_items(&self) -> Vec<Container> {
        match cmd::capture(&self.program, &["ps", "-a", "--format", LIST_FORMAT]) {
            Ok(raw) => parse_containers(&raw),
            Err(e) => {
                tlog!(warn, "docker ps failed: {}", e);
                Vec::new()
            }
        }
    }

    fn item_name(&self, item: &Container) -> String {
        item.name.clone()
    }

    fn render_line(&self, item: &Container, selected: bool) -> String {
        let id = Theme::hint().apply(format!("({})", item.id));
        let status = if item.is_up() {
            Theme::status_up().apply(&item.status)
        } else {
            Theme::status_down().apply(&item.status)
        };
        if selected {
            format!("{} {} {}", Theme::selected().apply(&item.name), id, status)
        } else {
            format!("{} {} {}", Theme::item().apply(&item.name), id, status)
        }
    }

    fn render_preview(&self, item: &Container) -> String {
        let info = match cmd::capture(
            &self.program,
            &["inspect", "--format", INSPECT_FORMAT, &item.id],
        ) {
            Ok(raw) => raw.trim().to_string(),
            Err(e) => {
                tlog!(warn, "docker inspect failed for {}: {}", item.id, e);
                return format!("unable to inspect container {} ({})", item.id, item.image);
            }
        };

        let logs = match cmd::capture(&self.program, &["logs", "--tail", "20", &item.id]) {
            Ok(raw) if !raw.trim().is_empty() => tail_chars(&raw, LOG_TAIL_CHARS),
            _ => "no logs available".to_string(),
        };

        format!("{}\n\nRecent logs:\n{}", info, logs)
    }

    fn primary_action(&self, item: &Container) -> Handoff {
        let mut command = Command::new(&self.program);
        if item.is_up() {
            command.args(["exec", "-it", &item.id, "/bin/bash"]);
        } else {
            command.args(["start", "-i", &item.id]);
        }
        Handoff::Run(command)
    }

    fn secondary_actions(&self) -> &[SecondaryAction] {
        ACTIONS
    }

    fn handle_secondary(&self, key: char, item: &Container) -> bool {
        match key {
            's' => {
                let action = if item.is_up() { "stop" } else { "start" };
                match cmd::run(&self.program, &[action, &item.id]) {
                    Ok(()) => true,
                    Err(e) => {
                        tlog!(error, "docker {} failed for {}: {}", action, item.id, e);
                        false
                    }
                }
            }
            'l' => {
                let mut command = Command::new(&self.program);
                command.args(["logs", "-f", &item.id]);
                if let Err(e) = cmd::interactive(command) {
                    tlog!(error, "docker logs -f failed for {}: {}", item.id, e);
                }
                false
            }
            _ => false,
        }
    }
}

fn parse_containers(raw: &str) -> Vec<Container> {
    raw.lines().filter_map(parse_container_line).collect()
}

fn parse_container_line(line: &str) -> Option<Container> {
    let parts: Vec<&str> = line.split('\t').collect();
    if parts.len() < 4 {
        return None;
    }
    let id: String = parts[0].chars().take(12).collect();
    if id.is_empty() {
        return None;
    }
    Some(Container {
        id,
        name: parts[1].to_string(),
        status: parts[2].to_string(),
        image: parts[3].to_string(),
    })
}

/// Keep only the last `max` characters of a log capture.
fn tail_chars(s: &str, max: usize) -> String {
    let count = s.chars().count();
    if count <= max {
        s.to_string()
    } else {
        s.chars().skip(count - max).collect()
    }
}
