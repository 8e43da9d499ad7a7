use std::process::{Command, ExitStatus, Stdio};
use thiserror::Error;

/// Explicit result of one subprocess invocation. Adapters absorb these at
/// their boundary; the controller never sees them.
#[derive(Debug, Error)]
pub enum CmdError {
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// Run a command and capture stdout. Non-zero exit is an error.
pub fn capture(program: &str, args: &[&str]) -> Result<String, CmdError> {
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| CmdError::Launch {
            program: program.to_string(),
            source: e,
        })?;
    if !output.status.success() {
        return Err(CmdError::Failed {
            program: program.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Run a command for its side effect, discarding output.
pub fn run(program: &str, args: &[&str]) -> Result<(), CmdError> {
    capture(program, args).map(|_| ())
}

/// Run a command wired to the real terminal and wait for it.
pub fn interactive(mut command: Command) -> Result<ExitStatus, CmdError> {
    let program = command.get_program().to_string_lossy().into_owned();
    command.status().map_err(|e| CmdError::Launch {
        program,
        source: e,
    })
}

/// Probe availability by running the tool with its version flag.
pub fn available(program: &str, probe: &str) -> bool {
    Command::new(program)
        .arg(probe)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    /// Write an executable shell script into `dir` and return its path.
    pub(crate) fn fake_tool(dir: &Path, name: &str, body: &str) -> String {
        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path.to_string_lossy().into_owned()
    }
}
