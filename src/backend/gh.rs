use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::process::Command;

use crate::backend::{cmd, relative_time, Backend, Handoff, SecondaryAction};
use crate::tlog;
use crate::ui::theme::Theme;
use crate::ui::truncate_chars;

const LIST_FIELDS: &str =
    "number,title,author,state,url,headRefName,baseRefName,createdAt,updatedAt,additions,deletions,changedFiles";
const PREVIEW_COMMITS: usize = 5;
const PREVIEW_FILES: usize = 10;

const ACTIONS: &[SecondaryAction] = &[
    SecondaryAction {
        key: 'c',
        label: "Checkout PR",
        confirm: false,
    },
    SecondaryAction {
        key: 'm',
        label: "Merge PR",
        confirm: true,
    },
    SecondaryAction {
        key: 'a',
        label: "Create PR",
        confirm: false,
    },
];

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub author: Author,
    #[serde(default)]
    pub state: Option<String>,
    pub url: String,
    #[serde(default)]
    pub head_ref_name: Option<String>,
    #[serde(default)]
    pub base_ref_name: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
    #[serde(default)]
    pub changed_files: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Author {
    pub login: String,
}

#[derive(Debug, Deserialize)]
struct PrView {
    #[serde(default)]
    commits: Vec<PrCommit>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PrCommit {
    oid: String,
    message_headline: String,
    #[serde(default)]
    author: Option<CommitAuthor>,
}

#[derive(Debug, Deserialize)]
struct CommitAuthor {
    #[serde(default)]
    name: Option<String>,
}

pub struct GhBackend {
    program: String,
}

impl GhBackend {
    pub fn new() -> Self {
        Self {
            program: "gh".to_string(),
        }
    }

    #[cfg(test)]
    fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn pr_details(&self, pr: &PullRequest) -> Result<String> {
        let number = pr.number.to_string();
        let view_raw = cmd::capture(&self.program, &["pr", "view", &number, "--json", "commits"])?;
        let view: PrView = serde_json::from_str(&view_raw)?;
        let files_raw = cmd::capture(&self.program, &["pr", "diff", &number, "--name-only"])?;

        let mut text = format!("PR #{}: {}\n", pr.number, pr.title);
        text.push_str(&format!(
            "Author: {} | {} -> {} | {} | updated {}\n",
            pr.author.login,
            pr.head_ref_name.as_deref().unwrap_or("?"),
            pr.base_ref_name.as_deref().unwrap_or("?"),
            pr.state.as_deref().unwrap_or("open"),
            pr.updated_at.map(relative_time).unwrap_or_else(|| "-".to_string()),
        ));
        text.push_str(&format!(
            "+{} -{} in {} files\n",
            pr.additions, pr.deletions, pr.changed_files
        ));

        if !view.commits.is_empty() {
            text.push_str("\nRecent commits:\n");
            let skip = view.commits.len().saturating_sub(PREVIEW_COMMITS);
            for commit in &view.commits[skip..] {
                let sha: String = commit.oid.chars().take(8).collect();
                let author = commit
                    .author
                    .as_ref()
                    .and_then(|a| a.name.as_deref())
                    .unwrap_or("unknown");
                text.push_str(&format!(
                    "{} {} ({})\n",
                    sha,
                    truncate_chars(&commit.message_headline, 50),
                    author
                ));
            }
        }

        let files: Vec<&str> = files_raw
            .lines()
            .filter(|l| !l.trim().is_empty())
            .take(PREVIEW_FILES)
            .collect();
        if !files.is_empty() {
            text.push_str("\nChanged files:\n");
            for file in files {
                text.push_str(file);
                text.push('\n');
            }
        }

        Ok(text)
    }
}

impl Backend for GhBackend {
    type Item = PullRequest;

    fn name(&self) -> &'static str {
        "gh"
    }

    fn description(&self) -> &'static str {
        "Interactive GitHub pull request picker"
    }

    fn is_available(&self) -> bool {
        cmd::available(&self.program, "--version")
    }

    fn list_items(&self) -> Vec<PullRequest> {
        let raw = match cmd::capture(&self.program, &["pr", "list", "--json", LIST_FIELDS]) {
            Ok(raw) => raw,
            Err(e) => {
                tlog!(warn, "gh pr list failed: {}", e);
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(prs) => prs,
            Err(e) => {
                tlog!(warn, "unexpected gh pr list payload: {}", e);
                Vec::new()
            }
        }
    }

    fn item_name(&self, item: &PullRequest) -> String {
        format!("#{}", item.number)
    }

    fn render_line(&self, item: &PullRequest, selected: bool) -> String {
        let head = format!("#{} {}", item.number, truncate_chars(&item.title, 50));
        let by = Theme::hint().apply(format!("by {}", item.author.login));
        if selected {
            format!("{} {}", Theme::selected().apply(head), by)
        } else {
            format!("{} {}", Theme::item().apply(head), by)
        }
    }

    fn render_preview(&self, item: &PullRequest) -> String {
        match self.pr_details(item) {
            Ok(text) => text,
            Err(e) => {
                tlog!(warn, "gh preview failed for #{}: {}", item.number, e);
                format!("unable to load details for PR #{}", item.number)
            }
        }
    }

    fn primary_action(&self, item: &PullRequest) -> Handoff {
        if let Err(e) = open::that(&item.url) {
            tlog!(error, "failed to open {}: {}", item.url, e);
        }
        Handoff::Done
    }

    fn secondary_actions(&self) -> &[SecondaryAction] {
        ACTIONS
    }

    fn handle_secondary(&self, key: char, item: &PullRequest) -> bool {
        let number = item.number.to_string();
        match key {
            'c' => {
                if let Err(e) = cmd::run(&self.program, &["pr", "checkout", &number]) {
                    tlog!(error, "gh pr checkout failed for #{}: {}", number, e);
                }
                false
            }
            'm' => match cmd::run(&self.program, &["pr", "merge", &number]) {
                Ok(()) => true,
                Err(e) => {
                    tlog!(error, "gh pr merge failed for #{}: {}", number, e);
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
        let mut command = Command::new(&self.program);
        command.args(["pr", "create"]);
        match cmd::interactive(command) {
            Ok(_) => true,
            Err(e) => {
                tlog!(error, "gh pr create failed: {}", e);
                false
            }
        }
    }
}
