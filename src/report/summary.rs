// Tue Feb 03 2026 - Alex

use crate::orchestration::RootFailure;
use itertools::Itertools;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootTotal {
    pub name: String,
    pub size: usize,
}

/// Static roots of one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleTotal {
    pub name: String,
    pub roots: Vec<RootTotal>,
}

impl ModuleTotal {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            roots: Vec::new(),
        }
    }

    pub fn push(&mut self, name: &str, size: usize) {
        self.roots.push(RootTotal {
            name: name.to_string(),
            size,
        });
    }

    pub fn size(&self) -> usize {
        self.roots.iter().map(|r| r.size).sum()
    }

    pub fn sorted_roots(&self) -> Vec<&RootTotal> {
        self.roots.iter().sorted_by(|a, b| b.size.cmp(&a.size)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceTotal {
    pub identifier: String,
    pub type_name: String,
    pub instance_id: i64,
    pub size: usize,
}

/// Everything one dump run measured.
///
/// Sizes are per root, so an object reachable from several roots is
/// counted once for each of them and [`DumpSummary::total_size`] is an
/// over-estimate of the live heap.
#[derive(Debug, Default)]
pub struct DumpSummary {
    pub modules: Vec<ModuleTotal>,
    pub components: Vec<InstanceTotal>,
    pub assets: Vec<InstanceTotal>,
    pub failures: Vec<RootFailure>,
    pub files: Vec<PathBuf>,
}

impl DumpSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn module(&self, name: &str) -> Option<&ModuleTotal> {
        self.modules.iter().find(|m| m.name == name)
    }

    pub(crate) fn module_mut(&mut self, name: &str) -> &mut ModuleTotal {
        let index = match self.modules.iter().position(|m| m.name == name) {
            Some(index) => index,
            None => {
                self.modules.push(ModuleTotal::new(name));
                self.modules.len() - 1
            }
        };
        &mut self.modules[index]
    }

    pub fn components_size(&self) -> usize {
        self.components.iter().map(|c| c.size).sum()
    }

    pub fn assets_size(&self) -> usize {
        self.assets.iter().map(|a| a.size).sum()
    }

    pub fn total_size(&self) -> usize {
        self.modules.iter().map(|m| m.size()).sum::<usize>() + self.components_size() + self.assets_size()
    }

    pub fn root_count(&self) -> usize {
        self.modules.iter().map(|m| m.roots.len()).sum::<usize>() + self.components.len() + self.assets.len()
    }

    pub fn render_log(&self, min_size: usize) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Total tracked memory (including duplicates, so too high) = {}", self.total_size());

        let modules = self.modules.iter().sorted_by(|a, b| b.size().cmp(&a.size()));

        let components_size = self.components_size();
        let assets_size = self.assets_size();
        let mut components_done = false;
        let mut assets_done = false;

        for module in modules {
            let size = module.size();
            if !components_done && size < components_size {
                components_done = true;
                write_instances(&mut out, "Components", components_size, &self.components, min_size);
            }
            if !assets_done && size < assets_size {
                assets_done = true;
                write_instances(&mut out, "Assets", assets_size, &self.assets, min_size);
            }

            let _ = writeln!(out, "Module: {} of total size: {}", module.name, size);
            for root in module.sorted_roots() {
                if root.size >= min_size {
                    let _ = writeln!(out, "    Type: {} of size {}", root.name, root.size);
                }
            }
        }

        if !components_done {
            write_instances(&mut out, "Components", components_size, &self.components, min_size);
        }
        if !assets_done {
            write_instances(&mut out, "Assets", assets_size, &self.assets, min_size);
        }

        for failure in &self.failures {
            let _ = writeln!(out, "{}", failure);
        }
        out
    }

    pub fn write_log(&self, path: &Path, min_size: usize) -> io::Result<()> {
        fs::write(path, self.render_log(min_size))
    }
}

fn write_instances(out: &mut String, label: &str, total: usize, instances: &[InstanceTotal], min_size: usize) {
    let _ = writeln!(out, "{} of total size: {}", label, total);

    let ranked = instances
        .iter()
        .sorted_by(|a, b| b.size.cmp(&a.size))
        .filter(|i| i.size >= min_size);
    for instance in ranked {
        let _ = writeln!(
            out,
            "    Type {} (ID: {}) of size {}",
            instance.type_name, instance.instance_id, instance.size
        );
    }
}
