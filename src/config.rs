// Fri Oct 16 2026 - Alex

use crate::frontend::baseline_args;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0:?}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Compile flags placed before any user-supplied extra arguments.
    pub baseline_args: Vec<String>,
    pub pretty: bool,
    /// Fail the run when the finished database has dangling references.
    pub verify_references: bool,
    /// `None` writes to stdout.
    pub output_file: Option<PathBuf>,
    /// Restrict the build to the closure of these records.
    pub roots: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            baseline_args: baseline_args(),
            pretty: true,
            verify_references: true,
            output_file: None,
            roots: Vec::new(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_verify_references(mut self, verify: bool) -> Self {
        self.verify_references = verify;
        self
    }

    pub fn with_output_file(mut self, output: PathBuf) -> Self {
        self.output_file = Some(output);
        self
    }

    pub fn with_root(mut self, root: &str) -> Self {
        self.roots.push(root.to_string());
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.baseline_args.iter().any(|a| a.trim().is_empty()) {
            return Err(ConfigError::Validation("baseline_args must not contain blank entries".to_string()));
        }
        if self.roots.iter().any(|r| r.trim().is_empty()) {
            return Err(ConfigError::Validation("root names must not be blank".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.baseline_args, vec!["-std=c++17", "--target=x86_64-pc-windows-msvc", "-O0", "-g"]);
        assert!(config.pretty && config.verify_references);
        assert!(config.output_file.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blanks() {
        assert!(Config::new().with_root("  ").validate().is_err());
        let mut config = Config::new();
        config.baseline_args.push(String::new());
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dump.json");
        fs::write(&path, r#"{ "pretty": false, "roots": ["Holder"] }"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config, Config::new().with_pretty(false).with_root("Holder"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dump.json");
        let config = Config::new()
            .with_verify_references(false)
            .with_output_file(PathBuf::from("types.json"));
        config.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), config);
        assert!(matches!(
            Config::load(dir.path().join("missing.json")),
            Err(ConfigError::NotFound(_))
        ));
    }
}
