// Mon Feb 02 2026 - Alex

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output_dir: PathBuf,
    pub pointer_width: usize,
    /// Roots smaller than this are counted but get no report file.
    pub min_root_size: usize,
    pub min_child_size: usize,
    pub min_summary_size: usize,
    pub worker_threads: usize,
    /// Modules whose name contains one of these get their own statics folder.
    pub primary_modules: Vec<String>,
    pub show_progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("dump"),
            pointer_width: 8,
            min_root_size: 1,
            min_child_size: 1,
            min_summary_size: 1,
            worker_threads: num_cpus::get(),
            primary_modules: vec!["Assembly-CSharp".to_string()],
            show_progress: true,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    pub fn with_output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = output_dir;
        self
    }

    pub fn with_pointer_width(mut self, pointer_width: usize) -> Self {
        self.pointer_width = pointer_width;
        self
    }

    pub fn with_min_root_size(mut self, size: usize) -> Self {
        self.min_root_size = size;
        self
    }

    pub fn with_min_child_size(mut self, size: usize) -> Self {
        self.min_child_size = size;
        self
    }

    pub fn with_min_summary_size(mut self, size: usize) -> Self {
        self.min_summary_size = size;
        self
    }

    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = threads;
        self
    }

    pub fn with_primary_modules(mut self, modules: Vec<String>) -> Self {
        self.primary_modules = modules;
        self
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.pointer_width != 4 && self.pointer_width != 8 {
            return Err(format!("pointer_width must be 4 or 8, got {}", self.pointer_width));
        }
        if self.worker_threads == 0 {
            return Err("worker_threads must be greater than 0".to_string());
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err("output_dir must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert_eq!(config.output_dir, PathBuf::from("dump"));
        assert_eq!(config.pointer_width, 8);
        assert_eq!(config.primary_modules, vec!["Assembly-CSharp".to_string()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(Config::new().with_pointer_width(6).validate().is_err());
        assert!(Config::new().with_worker_threads(0).validate().is_err());
        assert!(Config::new().with_output_dir(PathBuf::new()).validate().is_err());
        assert!(Config::new().with_pointer_width(4).validate().is_ok());
    }

    #[test]
    fn test_from_file_fills_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "pointer_width": 4, "min_child_size": 64 }"#).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.pointer_width, 4);
        assert_eq!(config.min_child_size, 64);
        assert_eq!(config.min_root_size, 1);
        assert!(config.show_progress);

        assert!(Config::from_file(dir.path().join("missing.json")).is_err());
    }
}
