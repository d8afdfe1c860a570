// Tue Feb 03 2026 - Alex

use crate::config::Config;
use crate::layout::{PointerWidth, TypeLayoutCache};
use crate::orchestration::{DumpError, LiveObject, RootFailure, RootSupplier, WriteDispatcher, WriteTicket};
use crate::report::{DumpSummary, InstanceTotal, OutputLayout, PathClaims, ReportWriter};
use crate::runtime::{TypeHandle, TypeKind, TypeMetadata};
use crate::walker::{ContributionTree, GraphWalker, Root, WalkError};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::mem;
use std::path::Path;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InstanceGroup {
    Components,
    Assets,
}

/// Drives every root of a run through the walker and report writer.
pub struct DumpCoordinator<'a> {
    config: Config,
    meta: &'a dyn TypeMetadata,
    supplier: &'a dyn RootSupplier,
}

impl<'a> DumpCoordinator<'a> {
    pub fn new(config: Config, meta: &'a dyn TypeMetadata, supplier: &'a dyn RootSupplier) -> Self {
        Self { config, meta, supplier }
    }

    pub fn run(&self) -> Result<DumpSummary, DumpError> {
        self.config.validate().map_err(DumpError::InvalidConfig)?;
        let start = Instant::now();

        let layout = OutputLayout::new(&self.config.output_dir, &self.config.primary_modules);
        layout.prepare().map_err(|e| DumpError::io(layout.root(), e))?;

        let cache = TypeLayoutCache::new(PointerWidth::new(self.config.pointer_width));
        let mut run = DumpRun {
            config: &self.config,
            meta: self.meta,
            cache: &cache,
            walker: GraphWalker::new(self.meta, &cache),
            writer: ReportWriter::new(self.config.min_child_size),
            dispatcher: WriteDispatcher::new(self.config.worker_threads)?,
            tickets: Vec::new(),
            claims: PathClaims::new(),
            summary: DumpSummary::new(),
            progress: self.progress_bar(),
        };
        info!("Writing reports on {} threads", run.dispatcher.worker_count());

        let outcome = run.dump_all(self.supplier, &layout);

        // writes already in flight must land before anything is reported
        let joined = run.dispatcher.join(mem::take(&mut run.tickets));
        outcome?;
        run.summary.files.extend(joined?);
        run.progress.finish_with_message("Done");

        let log_path = layout.log_path();
        run.summary
            .write_log(&log_path, self.config.min_summary_size)
            .map_err(|e| DumpError::io(&log_path, e))?;

        info!(
            "Dumped {} roots ({} failed) in {:.2}s, {} bytes tracked",
            run.summary.root_count(),
            run.summary.failures.len(),
            start.elapsed().as_secs_f64(),
            run.summary.total_size()
        );
        Ok(run.summary)
    }

    fn progress_bar(&self) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new(0);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            bar.set_style(style.progress_chars("#>-"));
        }
        bar
    }
}

struct DumpRun<'r> {
    config: &'r Config,
    meta: &'r dyn TypeMetadata,
    cache: &'r TypeLayoutCache,
    walker: GraphWalker<'r>,
    writer: ReportWriter,
    dispatcher: WriteDispatcher,
    tickets: Vec<WriteTicket>,
    claims: PathClaims,
    summary: DumpSummary,
    progress: ProgressBar,
}

impl<'r> DumpRun<'r> {
    fn dump_all(&mut self, supplier: &dyn RootSupplier, layout: &OutputLayout) -> Result<(), DumpError> {
        let modules = supplier.modules();
        let components = supplier.components();
        let assets = supplier.assets();

        let root_count = modules.iter().map(|m| m.types.len()).sum::<usize>() + components.len() + assets.len();
        self.progress.set_length(root_count as u64);

        info!("Analysing statics of {} modules", modules.len());
        self.progress.set_message("Statics");
        for module in &modules {
            let dir = layout.module_dir(&module.name);
            fs::create_dir_all(&dir).map_err(|e| DumpError::io(&dir, e))?;
            self.summary.module_mut(&module.name);

            for &ty in &module.types {
                self.dump_statics(ty, &module.name, &dir, false);
            }
        }

        info!("Analysing {} components", components.len());
        self.progress.set_message("Components");
        self.dump_instances(&components, &layout.components_dir(), InstanceGroup::Components)?;

        info!("Analysing {} assets", assets.len());
        self.progress.set_message("Assets");
        self.dump_instances(&assets, &layout.assets_dir(), InstanceGroup::Assets)?;

        let generics = self.cache.generic_types();
        info!("Analysing statics of {} generic instantiations", generics.len());
        self.progress.set_message("Generic types");
        self.progress.inc_length(generics.len() as u64);
        let misc = layout.misc_dir();
        for ty in generics {
            let module = match self.meta.describe(ty) {
                Ok(desc) => desc.module,
                Err(e) => {
                    self.progress.inc(1);
                    self.fail(&ty.to_string(), e.into());
                    continue;
                }
            };
            self.dump_statics(ty, &module, &misc, true);
        }

        Ok(())
    }

    fn dump_statics(&mut self, ty: TypeHandle, module: &str, dir: &Path, generic_pass: bool) {
        self.progress.inc(1);

        let desc = match self.meta.describe(ty) {
            Ok(desc) => desc,
            Err(e) => {
                self.fail(&ty.to_string(), e.into());
                return;
            }
        };
        if matches!(desc.kind, TypeKind::Enum(_)) || (desc.generic && !generic_pass) {
            return;
        }

        let tree = match self.walker.walk(&Root::Statics(ty)) {
            Ok(tree) => tree,
            Err(e) => {
                self.fail(&desc.name, e);
                return;
            }
        };

        self.summary.module_mut(module).push(&desc.name, tree.size());
        if tree.size() < self.config.min_root_size {
            return;
        }

        let path = self.claims.claim(dir, tree.size(), tree.identifier());
        let writer = self.writer;
        let ticket = self
            .dispatcher
            .dispatch(path, move |target| write_report(&writer, &tree, target));
        self.tickets.push(ticket);
    }

    fn dump_instances(&mut self, objects: &[LiveObject], dir: &Path, group: InstanceGroup) -> Result<(), DumpError> {
        for object in objects {
            self.progress.inc(1);
            let identifier = object.identifier();

            let type_name = match self.meta.describe(object.ty) {
                Ok(desc) => desc.name,
                Err(e) => {
                    self.fail(&identifier, e.into());
                    continue;
                }
            };
            let tree = match self.walker.walk(&object.root()) {
                Ok(tree) => tree,
                Err(e) => {
                    self.fail(&identifier, e);
                    continue;
                }
            };

            if tree.size() >= self.config.min_root_size {
                let path = self.claims.claim(dir, tree.size(), &identifier);
                write_report(&self.writer, &tree, &path).map_err(|e| DumpError::io(&path, e))?;
                self.summary.files.push(path);
            }

            let total = InstanceTotal {
                identifier,
                type_name,
                instance_id: object.instance_id,
                size: tree.size(),
            };
            match group {
                InstanceGroup::Components => self.summary.components.push(total),
                InstanceGroup::Assets => self.summary.assets.push(total),
            }
        }
        Ok(())
    }

    fn fail(&mut self, root: &str, error: WalkError) {
        warn!("Skipping {}: {}", root, error);
        self.summary.failures.push(RootFailure::new(root, error));
    }
}

fn write_report(writer: &ReportWriter, tree: &ContributionTree, path: &Path) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    writer.write_to(tree, &mut out)?;
    out.flush()
}
