// Tue Feb 03 2026 - Alex

use crate::walker::WalkError;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of the dump scaffolding itself. Any of these ends the run.
#[derive(Error, Debug)]
pub enum DumpError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Fatal: {0}")]
    Fatal(String),
}

impl DumpError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// A root that was skipped. The run carries on without it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootFailure {
    pub root: String,
    pub error: WalkError,
}

impl RootFailure {
    pub fn new(root: &str, error: WalkError) -> Self {
        Self {
            root: root.to_string(),
            error,
        }
    }
}

impl fmt::Display for RootFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.root, self.error)
    }
}
