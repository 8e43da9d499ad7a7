mod app;
mod backend;
mod input;
mod log;
mod terminal;
mod ui;

use anyhow::Result;
use app::{App, Outcome};
use backend::docker::DockerBackend;
use backend::gh::GhBackend;
use backend::tmux::TmuxBackend;
use backend::Backend;
use clap::{Parser, ValueEnum};
use std::io::{stdout, IsTerminal};
use ui::theme::Theme;

#[derive(Parser)]
#[command(
    name = "pickr",
    version,
    about = "Pick and act on tmux sessions, docker containers and GitHub pull requests"
)]
struct Cli {
    /// Backend to browse; omit to see which backends are available
    #[arg(value_enum)]
    backend: Option<BackendKind>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BackendKind {
    Tmux,
    Docker,
    Gh,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let Some(kind) = cli.backend else {
        print_summary();
        return Ok(());
    };

    if !stdout().is_terminal() {
        eprintln!("Error: pickr requires an interactive terminal (TTY).");
        std::process::exit(1);
    }

    let code = match kind {
        BackendKind::Tmux => run_picker(TmuxBackend::new())?,
        BackendKind::Docker => run_picker(DockerBackend::new())?,
        BackendKind::Gh => run_picker(GhBackend::new())?,
    };
    std::process::exit(code);
}

fn run_picker<B: Backend>(backend: B) -> Result<i32> {
    let name = backend.name();
    if !backend.is_available() {
        eprintln!(
            "{}",
            Theme::error().apply(format!("Error: {} is not available on this system", name))
        );
        return Ok(1);
    }

    let hint = backend.empty_hint();
    let mut app = App::new(backend);
    let mut keys = terminal::TerminalInput;
    let mut out = stdout();

    match app.run(&mut keys, &mut out)? {
        Outcome::NoItems => {
            eprintln!("{}", Theme::warn().apply(format!("No {} items found", name)));
            if let Some(hint) = hint {
                eprintln!("{}", Theme::hint().apply(hint));
            }
            Ok(1)
        }
        Outcome::Quit | Outcome::Drained | Outcome::Selected => Ok(0),
    }
}

fn print_summary() {
    println!("{}", Theme::title().apply("pickr backends"));
    println!();
    summary_line(&TmuxBackend::new());
    summary_line(&DockerBackend::new());
    summary_line(&GhBackend::new());
    println!();
    println!("Usage: pickr <tmux|docker|gh>");
}

fn summary_line<B: Backend>(backend: &B) {
    let status = if backend.is_available() {
        Theme::ok().apply("  ok")
    } else {
        Theme::error().apply("   -")
    };
    println!(
        "{} {} {}",
        status,
        Theme::item().apply(format!("{:<8}", backend.name())),
        Theme::hint().apply(backend.description())
    );
}
