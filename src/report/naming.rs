// Tue Feb 03 2026 - Alex

use ahash::AHashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const MISC_FOLDER: &str = "misc";

/// Makes a type or instance name usable as a single path component.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '<' => '(',
            '>' => ')',
            '.' | '/' | '\\' => '_',
            c => c,
        })
        .collect()
}

/// `<size>-<name>`, so a directory listing sorts by size.
pub fn report_file_name(size: usize, identifier: &str) -> String {
    format!("{}-{}", size, sanitize(identifier))
}

/// Report paths handed out during one run.
///
/// Distinct identifiers can sanitize to the same name, so a path that is
/// already taken gets a `-2`, `-3`, ... suffix.
#[derive(Debug, Default)]
pub struct PathClaims {
    taken: AHashSet<PathBuf>,
}

impl PathClaims {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim(&mut self, dir: &Path, size: usize, identifier: &str) -> PathBuf {
        let base = report_file_name(size, identifier);
        let mut path = dir.join(&base);
        let mut n = 2;
        while !self.taken.insert(path.clone()) {
            path = dir.join(format!("{}-{}", base, n));
            n += 1;
        }
        path
    }
}

/// Directory tree of one dump run.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
    primary_modules: Vec<String>,
}

impl OutputLayout {
    pub fn new(root: &Path, primary_modules: &[String]) -> Self {
        Self {
            root: root.to_path_buf(),
            primary_modules: primary_modules.to_vec(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn statics_dir(&self) -> PathBuf {
        self.root.join("statics")
    }

    pub fn misc_dir(&self) -> PathBuf {
        self.statics_dir().join(MISC_FOLDER)
    }

    pub fn components_dir(&self) -> PathBuf {
        self.root.join("components")
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.root.join("assets")
    }

    pub fn log_path(&self) -> PathBuf {
        self.root.join("log.txt")
    }

    pub fn is_primary(&self, module: &str) -> bool {
        self.primary_modules.iter().any(|p| module.contains(p.as_str()))
    }

    pub fn module_dir(&self, module: &str) -> PathBuf {
        if self.is_primary(module) {
            self.statics_dir().join(sanitize(module))
        } else {
            self.misc_dir()
        }
    }

    /// Wipes any previous run and creates the fixed folders.
    pub fn prepare(&self) -> io::Result<()> {
        if self.root.exists() {
            fs::remove_dir_all(&self.root)?;
        }
        fs::create_dir_all(self.misc_dir())?;
        fs::create_dir_all(self.components_dir())?;
        fs::create_dir_all(self.assets_dir())?;
        Ok(())
    }
}
