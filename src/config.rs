use serde::Deserialize;
use std::{collections::HashMap, env, fs, io, path::Path};
use thiserror::Error;

pub const TOKEN: &str = "TOKEN";
pub const OWNER: &str = "OWNER";
pub const COLLABORATOR: &str = "COLLABORATOR";
pub const REPO: &str = "REPO";
pub const BASE_URL: &str = "BASE_URL";

const KEYS: [&str; 5] = [TOKEN, OWNER, COLLABORATOR, REPO, BASE_URL];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error")]
    Io(#[from] io::Error),
    #[error("toml parsing error")]
    De(#[from] toml::de::Error),
}

/// String keyed lookup of configuration values.
pub trait ConfigSource {
    fn get(&self, key: &str) -> Option<String>;
}

impl ConfigSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// Reads straight from the process environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct Environment;

impl ConfigSource for Environment {
    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

/// A flat table of settings, e.g.
///
/// ```toml
/// TOKEN = "ghp_..."
/// OWNER = "octocat"
/// REPO = "hello-world"
/// ```
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct Config {
    values: HashMap<String, String>,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Collect the known keys from `source`, skipping the ones it doesn't have.
    pub fn from_source(source: &dyn ConfigSource) -> Self {
        let values = KEYS
            .iter()
            .filter_map(|key| source.get(key).map(|value| ((*key).to_owned(), value)))
            .collect();
        Self { values }
    }

    pub fn from_env() -> Self {
        Self::from_source(&Environment)
    }

    /// Layer `other` on top of `self`; values in `other` win.
    pub fn merge(mut self, other: Config) -> Self {
        self.values.extend(other.values);
        self
    }

    #[cfg(test)]
    pub fn set<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.values.insert(key.into(), value.into());
    }
}

impl ConfigSource for Config {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}
