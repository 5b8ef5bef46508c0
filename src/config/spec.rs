//! Process specifications.
//!
//! A [`ProcessSpec`] is the immutable description of one managed
//! application, produced by the config loader and shared (via `Arc`)
//! with every handle spawned from it.

use std::fmt;
use std::path::PathBuf;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// How the command string is turned into an executable invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interpreter {
    /// Run the command through the platform shell (`sh -c` / `cmd /C`).
    /// This is the default when the config omits `interpreter`.
    Shell,
    /// Execute the command directly: first token is the program, the
    /// rest are its arguments. Selected by `"interpreter": "none"`.
    Direct,
    /// Invoke the named program with the command tokens as arguments.
    Program(String),
}

impl Interpreter {
    /// Resolves the optional `interpreter` config field.
    #[must_use]
    pub fn from_config(value: Option<&str>) -> Self {
        match value {
            None => Interpreter::Shell,
            Some("none") => Interpreter::Direct,
            Some(program) => Interpreter::Program(program.to_string()),
        }
    }
}

/// Ordered environment mapping with replace-on-duplicate semantics.
///
/// Preserves the order entries appear in the config file. At spawn
/// time these entries override the inherited process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvMap {
    entries: Vec<(String, String)>,
}

impl EnvMap {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts a variable. A duplicate key replaces the earlier value
    /// in place, keeping its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Looks up a variable by name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for EnvMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut map = EnvMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

// Hand-rolled so JSON object order survives into the mapping; a derive
// through HashMap would scramble it.
impl<'de> Deserialize<'de> for EnvMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EnvMapVisitor;

        impl<'de> Visitor<'de> for EnvMapVisitor {
            type Value = EnvMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of environment variable names to string values")
            }

            fn visit_map<A>(self, mut access: A) -> Result<EnvMap, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut map = EnvMap::new();
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(EnvMapVisitor)
    }
}

/// Immutable description of one managed process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSpec {
    /// Unique, non-empty name of the application.
    pub name: String,
    /// Working directory for the spawned process.
    pub cwd: PathBuf,
    /// Command line to run.
    pub command: String,
    /// How to execute the command.
    pub interpreter: Interpreter,
    /// Number of instances to fan out (>= 1).
    pub instances: u32,
    /// Respawn on unexpected exit.
    pub autorestart: bool,
    /// Restart-on-file-change request (parsed, not wired to a watcher).
    pub watch: bool,
    /// Environment overrides applied on top of the inherited environment.
    pub env: EnvMap,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpreter_from_config() {
        assert_eq!(Interpreter::from_config(None), Interpreter::Shell);
        assert_eq!(Interpreter::from_config(Some("none")), Interpreter::Direct);
        assert_eq!(
            Interpreter::from_config(Some("/usr/bin/node")),
            Interpreter::Program("/usr/bin/node".to_string())
        );
    }

    #[test]
    fn test_env_map_insert_and_get() {
        let mut env = EnvMap::new();
        assert!(env.is_empty());

        env.insert("A", "1");
        env.insert("B", "2");
        assert_eq!(env.len(), 2);
        assert_eq!(env.get("A"), Some("1"));
        assert_eq!(env.get("B"), Some("2"));
        assert_eq!(env.get("C"), None);
    }

    #[test]
    fn test_env_map_duplicate_replaces_in_place() {
        let mut env = EnvMap::new();
        env.insert("A", "1");
        env.insert("B", "2");
        env.insert("A", "3");

        assert_eq!(env.len(), 2);
        assert_eq!(env.get("A"), Some("3"));

        // "A" keeps its original position
        let keys: Vec<&str> = env.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["A", "B"]);
    }

    #[test]
    fn test_env_map_preserves_json_order() {
        let json = r#"{"Z_LAST": "z", "A_FIRST": "a", "M_MID": "m"}"#;
        let env: EnvMap = serde_json::from_str(json).expect("valid JSON object");

        let keys: Vec<&str> = env.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Z_LAST", "A_FIRST", "M_MID"]);
    }

    #[test]
    fn test_env_map_from_iterator() {
        let env: EnvMap = vec![
            ("A".to_string(), "1".to_string()),
            ("A".to_string(), "2".to_string()),
        ]
        .into_iter()
        .collect();

        assert_eq!(env.len(), 1);
        assert_eq!(env.get("A"), Some("2"));
    }
}
