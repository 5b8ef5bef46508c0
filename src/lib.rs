//! psup
//!
//! A lightweight declarative process supervisor: a JSON file lists
//! applications (command, working directory, environment, restart
//! policy); psup spawns them, monitors exits, and respawns per policy.
//!
//! # Architecture
//!
//! - **Config Module**: JSON config loading and validation
//! - **Supervisor Module**: coordinator task, handle table, restart loop
//! - **Logging Module**: tracing setup with file output and retention
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//! use psup::{Config, Supervisor};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load_from(Path::new("apps.json"))?;
//! let supervisor = Supervisor::new().spawn();
//! for app in &config.apps {
//!     supervisor.start(app.clone()).await?;
//! }
//! # Ok(())
//! # }
//! ```

// Clippy configuration - allow common patterns
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]

pub mod config;
pub mod logging;
pub mod supervisor;

// Re-export main types
pub use config::{Config, ConfigError, EnvMap, Interpreter, ProcessSpec};
pub use supervisor::{
    HandleSnapshot, ProcessState, RestartPolicy, SignalError, SpawnError, Supervisor,
    SupervisorError, SupervisorHandle,
};
