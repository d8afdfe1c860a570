// Tue Feb 03 2026 - Alex

use super::args::{Args, Command, DumpArgs, LayoutArgs};
use crate::layout::{LayoutKind, PointerWidth, TypeLayoutCache};
use crate::orchestration::{DumpCoordinator, DumpSummary};
use crate::runtime::TypeMetadata;
use crate::snapshot::HeapSnapshot;
use crate::ui::{print_info, print_success, print_warning};
use anyhow::Context;
use colored::Colorize;
use std::time::Instant;

pub struct CommandHandler {
    quiet: bool,
}

impl CommandHandler {
    pub fn new() -> Self {
        Self { quiet: false }
    }

    pub fn execute(mut self, args: Args) -> anyhow::Result<()> {
        self.quiet = args.quiet;
        self.setup_logging(&args)?;

        match args.command {
            Command::Dump(dump_args) => self.handle_dump(dump_args),
            Command::Layout(layout_args) => self.handle_layout(layout_args),
        }
    }

    fn setup_logging(&self, args: &Args) -> anyhow::Result<()> {
        let level = if args.quiet {
            log::LevelFilter::Error
        } else {
            match args.log_level.to_lowercase().as_str() {
                "trace" => log::LevelFilter::Trace,
                "debug" => log::LevelFilter::Debug,
                "info" => log::LevelFilter::Info,
                "warn" => log::LevelFilter::Warn,
                "error" => log::LevelFilter::Error,
                "off" => log::LevelFilter::Off,
                _ => log::LevelFilter::Info,
            }
        };

        env_logger::Builder::new()
            .filter_level(level)
            .format_timestamp(None)
            .try_init()
            .context("Failed to install logger")?;

        Ok(())
    }

    fn load_snapshot(&self, path: &std::path::Path) -> anyhow::Result<HeapSnapshot> {
        if !self.quiet {
            print_info(&format!("Loading snapshot: {}", path.display()));
        }
        let snapshot = HeapSnapshot::from_file(path)
            .with_context(|| format!("Failed to load snapshot {}", path.display()))?;
        if !self.quiet {
            print_success(&format!(
                "Loaded {} types and {} objects",
                snapshot.type_count(),
                snapshot.object_count()
            ));
        }
        Ok(snapshot)
    }

    fn handle_dump(&self, args: DumpArgs) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;
        let config = args.to_config()?;
        let config = if self.quiet { config.with_progress(false) } else { config };
        let snapshot = self.load_snapshot(&args.snapshot)?;

        let start = Instant::now();
        let output_dir = config.output_dir.clone();
        let summary = DumpCoordinator::new(config, &snapshot, &snapshot)
            .run()
            .context("Dump aborted")?;

        if !self.quiet {
            self.print_dump_summary(&summary);
            print_success(&format!(
                "Reports written to {} in {:.2}s",
                output_dir.display(),
                start.elapsed().as_secs_f64()
            ));
        }
        Ok(())
    }

    fn print_dump_summary(&self, summary: &DumpSummary) {
        println!();
        println!("{}", "Dump Summary".cyan().bold());
        println!("{}", "-".repeat(40).cyan());
        println!("  Roots analysed: {}", summary.root_count().to_string().green());
        println!("  Reports written: {}", summary.files.len().to_string().green());
        println!("  Components: {} bytes", summary.components_size());
        println!("  Assets: {} bytes", summary.assets_size());

        let mut modules: Vec<_> = summary.modules.iter().filter(|m| m.size() > 0).collect();
        modules.sort_by(|a, b| b.size().cmp(&a.size()));
        for module in modules {
            println!("  {}: {} bytes", module.name.cyan(), module.size());
        }
        println!(
            "  Total tracked (with duplicates): {}",
            format!("{} bytes", summary.total_size()).yellow().bold()
        );

        if !summary.failures.is_empty() {
            println!();
            print_warning(&format!("{} roots skipped", summary.failures.len()));
            for failure in &summary.failures {
                println!("  {}", failure.to_string().red());
            }
        }
        println!();
    }

    fn handle_layout(&self, args: LayoutArgs) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;
        let snapshot = self.load_snapshot(&args.snapshot)?;

        let ty = snapshot
            .type_handle(&args.type_name)
            .ok_or_else(|| anyhow::anyhow!("Unknown type: {}", args.type_name))?;
        let kind = if args.nested { LayoutKind::Nested } else { LayoutKind::Root };

        let cache = TypeLayoutCache::new(PointerWidth::new(args.pointer_width));
        let layout = cache.layout(&snapshot, ty, kind)?;

        println!("{} ({:?})", args.type_name.cyan().bold(), kind);
        println!("  Static size: {} bytes", layout.static_size().to_string().green());
        println!("  Statically sized: {}", layout.is_statically_sized());
        if layout.has_dynamic_fields() {
            println!("  Dynamic fields:");
            for field in layout.dynamic_fields() {
                let type_name = snapshot
                    .describe(field.ty)
                    .map(|d| d.name)
                    .unwrap_or_else(|_| field.ty.to_string());
                println!("    {}: {}", field.name, type_name);
            }
        }
        Ok(())
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}
