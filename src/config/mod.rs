//! Configuration module for psup.
//!
//! Handles loading and validating the JSON application file. The file
//! describes one or more applications to supervise:
//!
//! ```json
//! {
//!   "apps": [
//!     {
//!       "name": "CasinoBackend",
//!       "cwd": "/var/www/CasinoBackend",
//!       "command": "dotnet CasinoBackend.dll",
//!       "interpreter": "none",
//!       "instances": 1,
//!       "autorestart": true,
//!       "watch": false,
//!       "env": { "ASPNETCORE_URLS": "http://0.0.0.0:5036" }
//!     }
//!   ]
//! }
//! ```
//!
//! Only `name` and `command` are required; the rest default to the
//! conventions above (`instances = 1`, `autorestart = true`,
//! `watch = false`, `cwd = "."`, shell interpreter, empty env).

mod spec;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

pub use spec::{EnvMap, Interpreter, ProcessSpec};

/// Configuration error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read.
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// File is not valid JSON or does not match the schema.
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    /// An app entry has an empty name.
    #[error("App entry {0} has an empty name")]
    EmptyName(usize),

    /// An app entry has an empty command.
    #[error("App '{0}' has an empty command")]
    EmptyCommand(String),

    /// Two app entries share a name.
    #[error("Duplicate app name '{0}'")]
    DuplicateName(String),

    /// `instances` must be at least 1.
    #[error("App '{name}' has invalid instance count {instances}")]
    InvalidInstances {
        /// Name of the offending app.
        name: String,
        /// The rejected value.
        instances: i64,
    },
}

/// Raw on-disk shape of the config file. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct RawConfig {
    apps: Vec<RawApp>,
}

#[derive(Debug, Deserialize)]
struct RawApp {
    name: String,
    cwd: Option<PathBuf>,
    command: String,
    interpreter: Option<String>,
    instances: Option<i64>,
    autorestart: Option<bool>,
    watch: Option<bool>,
    env: Option<EnvMap>,
}

/// Validated application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// One spec per app entry, in file order.
    pub apps: Vec<Arc<ProcessSpec>>,
}

impl Config {
    /// Loads and validates a config file.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the file cannot be read, is not valid
    /// JSON, or fails validation (empty name/command, duplicate name,
    /// non-positive instance count).
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses and validates config file content.
    ///
    /// # Errors
    /// Returns [`ConfigError`] on malformed or invalid input.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(content)?;

        let mut seen = HashSet::new();
        let mut apps = Vec::with_capacity(raw.apps.len());

        for (index, app) in raw.apps.into_iter().enumerate() {
            let name = app.name.trim().to_string();
            if name.is_empty() {
                return Err(ConfigError::EmptyName(index));
            }
            if !seen.insert(name.clone()) {
                return Err(ConfigError::DuplicateName(name));
            }
            if app.command.trim().is_empty() {
                return Err(ConfigError::EmptyCommand(name));
            }

            let instances = app.instances.unwrap_or(1);
            if instances < 1 || instances > i64::from(u32::MAX) {
                return Err(ConfigError::InvalidInstances { name, instances });
            }

            apps.push(Arc::new(ProcessSpec {
                name,
                cwd: app.cwd.unwrap_or_else(|| PathBuf::from(".")),
                command: app.command,
                interpreter: Interpreter::from_config(app.interpreter.as_deref()),
                instances: instances as u32,
                autorestart: app.autorestart.unwrap_or(true),
                watch: app.watch.unwrap_or(false),
                env: app.env.unwrap_or_default(),
            }));
        }

        Ok(Self { apps })
    }

    /// Looks up an app spec by name.
    #[must_use]
    pub fn app(&self, name: &str) -> Option<&Arc<ProcessSpec>> {
        self.apps.iter().find(|spec| spec.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal(name: &str) -> String {
        format!(r#"{{"apps": [{{"name": "{name}", "command": "sleep 1"}}]}}"#)
    }

    #[test]
    fn test_parse_minimal_applies_defaults() {
        let config = Config::parse(&minimal("web")).expect("valid config");
        assert_eq!(config.apps.len(), 1);

        let spec = &config.apps[0];
        assert_eq!(spec.name, "web");
        assert_eq!(spec.command, "sleep 1");
        assert_eq!(spec.cwd, PathBuf::from("."));
        assert_eq!(spec.interpreter, Interpreter::Shell);
        assert_eq!(spec.instances, 1);
        assert!(spec.autorestart);
        assert!(!spec.watch);
        assert!(spec.env.is_empty());
    }

    #[test]
    fn test_parse_rejects_empty_name() {
        let json = r#"{"apps": [{"name": "  ", "command": "sleep 1"}]}"#;
        assert!(matches!(
            Config::parse(json),
            Err(ConfigError::EmptyName(0))
        ));
    }

    #[test]
    fn test_parse_rejects_empty_command() {
        let json = r#"{"apps": [{"name": "web", "command": ""}]}"#;
        assert!(matches!(
            Config::parse(json),
            Err(ConfigError::EmptyCommand(name)) if name == "web"
        ));
    }

    #[test]
    fn test_parse_rejects_duplicate_names() {
        let json = r#"{"apps": [
            {"name": "web", "command": "sleep 1"},
            {"name": "web", "command": "sleep 2"}
        ]}"#;
        assert!(matches!(
            Config::parse(json),
            Err(ConfigError::DuplicateName(name)) if name == "web"
        ));
    }

    #[test]
    fn test_parse_rejects_non_positive_instances() {
        let json = r#"{"apps": [{"name": "web", "command": "sleep 1", "instances": 0}]}"#;
        assert!(matches!(
            Config::parse(json),
            Err(ConfigError::InvalidInstances { instances: 0, .. })
        ));

        let json = r#"{"apps": [{"name": "web", "command": "sleep 1", "instances": -3}]}"#;
        assert!(matches!(
            Config::parse(json),
            Err(ConfigError::InvalidInstances { instances: -3, .. })
        ));
    }

    #[test]
    fn test_parse_rejects_instances_beyond_u32() {
        let json =
            r#"{"apps": [{"name": "web", "command": "sleep 1", "instances": 4294967297}]}"#;
        assert!(matches!(
            Config::parse(json),
            Err(ConfigError::InvalidInstances { instances: 4_294_967_297, .. })
        ));
    }

    #[test]
    fn test_parse_rejects_missing_required_fields() {
        assert!(Config::parse(r#"{"apps": [{"command": "sleep 1"}]}"#).is_err());
        assert!(Config::parse(r#"{"apps": [{"name": "web"}]}"#).is_err());
        assert!(Config::parse("not json at all").is_err());
    }

    #[test]
    fn test_parse_ignores_unknown_fields() {
        let json = r#"{"apps": [{"name": "web", "command": "sleep 1", "max_memory": "1G"}]}"#;
        let config = Config::parse(json).expect("unknown fields are ignored");
        assert_eq!(config.apps.len(), 1);
    }

    #[test]
    fn test_app_lookup() {
        let config = Config::parse(&minimal("web")).expect("valid config");
        assert!(config.app("web").is_some());
        assert!(config.app("worker").is_none());
    }
}
