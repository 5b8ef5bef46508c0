//! Process handle state.
//!
//! The supervisor's coordinator task is the only writer of handle
//! state; everyone else sees read-only [`HandleSnapshot`] copies.

use std::time::Instant;

/// Lifecycle state of one managed process instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    /// Not running; terminal until an explicit start.
    Stopped,
    /// Process is alive.
    Running,
    /// Exited unexpectedly; a respawn is scheduled.
    Restarting,
    /// Spawn failed or the restart limit was exhausted.
    Failed,
}

impl ProcessState {
    /// Returns true if the process has an OS process behind it.
    #[must_use]
    pub fn is_live(&self) -> bool {
        matches!(self, ProcessState::Running)
    }

    /// Returns true if the state is terminal until an explicit start.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProcessState::Stopped | ProcessState::Failed)
    }
}

impl std::fmt::Display for ProcessState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ProcessState::Stopped => "stopped",
            ProcessState::Running => "running",
            ProcessState::Restarting => "restarting",
            ProcessState::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Read-only view of one process handle.
#[derive(Debug, Clone)]
pub struct HandleSnapshot {
    /// App name this handle belongs to.
    pub name: String,
    /// Instance index within the app (0-based).
    pub instance: u32,
    /// OS process id while running.
    pub pid: Option<u32>,
    /// Current lifecycle state.
    pub state: ProcessState,
    /// Exit code of the most recent exit, if any.
    pub last_exit_code: Option<i32>,
    /// Consecutive automatic restarts since the last stable run.
    pub restart_count: u32,
    /// When the current process was spawned, if running.
    pub started_at: Option<Instant>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_predicates() {
        assert!(ProcessState::Running.is_live());
        assert!(!ProcessState::Stopped.is_live());
        assert!(!ProcessState::Restarting.is_live());
        assert!(!ProcessState::Failed.is_live());

        assert!(ProcessState::Stopped.is_terminal());
        assert!(ProcessState::Failed.is_terminal());
        assert!(!ProcessState::Running.is_terminal());
        assert!(!ProcessState::Restarting.is_terminal());
    }

    #[test]
    fn test_state_display() {
        assert_eq!(ProcessState::Running.to_string(), "running");
        assert_eq!(ProcessState::Restarting.to_string(), "restarting");
    }
}
