//! Process spawning.
//!
//! Turns a [`ProcessSpec`] into a running `tokio::process::Child`:
//! resolves the interpreter into a program + argument list, merges the
//! spec environment over the inherited one, and checks the working
//! directory before handing off to the OS.

use std::path::PathBuf;
use std::process::Stdio;

use thiserror::Error;
use tokio::process::{Child, Command};

use crate::config::{Interpreter, ProcessSpec};

/// Environment variable carrying the 0-based instance index.
pub const INSTANCE_ENV_VAR: &str = "PSUP_INSTANCE";

/// Process spawn error type.
#[derive(Debug, Clone, Error)]
pub enum SpawnError {
    /// The spec's working directory does not exist.
    #[error("Working directory does not exist: {0}")]
    WorkingDirMissing(PathBuf),

    /// The command string resolved to nothing executable.
    #[error("App '{0}' has no executable command")]
    EmptyCommand(String),

    /// The OS refused to create the process.
    #[error("Failed to spawn '{name}': {message}")]
    Spawn {
        /// App name being spawned.
        name: String,
        /// OS error description.
        message: String,
    },
}

/// Resolves a spec's command string into a program and argument list
/// according to its interpreter setting.
///
/// # Errors
/// Returns [`SpawnError::EmptyCommand`] if direct execution is
/// requested but the command has no tokens.
pub fn resolve_command(spec: &ProcessSpec) -> Result<(String, Vec<String>), SpawnError> {
    match &spec.interpreter {
        Interpreter::Shell => {
            #[cfg(windows)]
            let (shell, flag) = ("cmd", "/C");
            #[cfg(not(windows))]
            let (shell, flag) = ("sh", "-c");

            Ok((
                shell.to_string(),
                vec![flag.to_string(), spec.command.clone()],
            ))
        }
        Interpreter::Direct => {
            let mut tokens = spec.command.split_whitespace().map(str::to_string);
            let program = tokens
                .next()
                .ok_or_else(|| SpawnError::EmptyCommand(spec.name.clone()))?;
            Ok((program, tokens.collect()))
        }
        Interpreter::Program(program) => {
            let args = spec.command.split_whitespace().map(str::to_string).collect();
            Ok((program.clone(), args))
        }
    }
}

/// Spawns one instance of a spec.
///
/// The spec environment is applied on top of the inherited process
/// environment, so spec values win on collision. Stdout and stderr are
/// piped so the supervisor can forward them into the log.
///
/// # Errors
/// Returns [`SpawnError`] if the working directory is missing or the
/// OS cannot execute the command.
pub fn spawn_instance(spec: &ProcessSpec, instance: u32) -> Result<Child, SpawnError> {
    if !spec.cwd.is_dir() {
        return Err(SpawnError::WorkingDirMissing(spec.cwd.clone()));
    }

    let (program, args) = resolve_command(spec)?;

    let mut command = Command::new(&program);
    command
        .args(&args)
        .current_dir(&spec.cwd)
        .env(INSTANCE_ENV_VAR, instance.to_string())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    for (key, value) in spec.env.iter() {
        command.env(key, value);
    }

    command.spawn().map_err(|err| SpawnError::Spawn {
        name: spec.name.clone(),
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnvMap;

    fn spec_with(interpreter: Interpreter, command: &str) -> ProcessSpec {
        ProcessSpec {
            name: "test".to_string(),
            cwd: PathBuf::from("."),
            command: command.to_string(),
            interpreter,
            instances: 1,
            autorestart: true,
            watch: false,
            env: EnvMap::new(),
        }
    }

    #[test]
    fn test_resolve_shell_wraps_whole_command() {
        let spec = spec_with(Interpreter::Shell, "echo hello world");
        let (program, args) = resolve_command(&spec).expect("resolvable");

        #[cfg(not(windows))]
        {
            assert_eq!(program, "sh");
            assert_eq!(args, vec!["-c", "echo hello world"]);
        }
        #[cfg(windows)]
        {
            assert_eq!(program, "cmd");
            assert_eq!(args, vec!["/C", "echo hello world"]);
        }
    }

    #[test]
    fn test_resolve_direct_splits_tokens() {
        let spec = spec_with(Interpreter::Direct, "dotnet CasinoBackend.dll");
        let (program, args) = resolve_command(&spec).expect("resolvable");
        assert_eq!(program, "dotnet");
        assert_eq!(args, vec!["CasinoBackend.dll"]);
    }

    #[test]
    fn test_resolve_direct_rejects_blank_command() {
        let spec = spec_with(Interpreter::Direct, "   ");
        assert!(matches!(
            resolve_command(&spec),
            Err(SpawnError::EmptyCommand(_))
        ));
    }

    #[test]
    fn test_resolve_explicit_program() {
        let spec = spec_with(
            Interpreter::Program("/usr/bin/python3".to_string()),
            "worker.py --queue jobs",
        );
        let (program, args) = resolve_command(&spec).expect("resolvable");
        assert_eq!(program, "/usr/bin/python3");
        assert_eq!(args, vec!["worker.py", "--queue", "jobs"]);
    }

    #[test]
    fn test_spawn_missing_working_dir() {
        let mut spec = spec_with(Interpreter::Shell, "true");
        spec.cwd = PathBuf::from("/nonexistent/psup/cwd");

        assert!(matches!(
            spawn_instance(&spec, 0),
            Err(SpawnError::WorkingDirMissing(_))
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_spawn_bad_program_is_spawn_error() {
        let spec = spec_with(Interpreter::Direct, "/nonexistent/psup/binary");
        assert!(matches!(
            spawn_instance(&spec, 0),
            Err(SpawnError::Spawn { .. })
        ));
    }
}
