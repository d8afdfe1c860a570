// Tue Feb 03 2026 - Alex

use crate::config::Config;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "heap-dump")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Estimates how much memory each root of a managed heap keeps alive", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Walk every root and write per-root reports plus a summary log
    Dump(DumpArgs),
    /// Print the computed layout of a single type
    Layout(LayoutArgs),
}

#[derive(Parser, Debug)]
pub struct DumpArgs {
    #[arg(short, long)]
    pub snapshot: PathBuf,

    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub threads: Option<usize>,

    #[arg(long)]
    pub pointer_width: Option<usize>,

    #[arg(long)]
    pub min_child_size: Option<usize>,

    #[arg(long)]
    pub no_progress: bool,
}

impl DumpArgs {
    pub fn validate(&self) -> Result<(), String> {
        if !self.snapshot.exists() {
            return Err(format!("Snapshot does not exist: {}", self.snapshot.display()));
        }
        if let Some(config) = &self.config {
            if !config.exists() {
                return Err(format!("Config file does not exist: {}", config.display()));
            }
        }
        Ok(())
    }

    /// Config file (or defaults) with command line overrides applied.
    pub fn to_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        if let Some(output) = &self.output {
            config = config.with_output_dir(output.clone());
        }
        if let Some(threads) = self.threads {
            config = config.with_worker_threads(threads);
        }
        if let Some(width) = self.pointer_width {
            config = config.with_pointer_width(width);
        }
        if let Some(size) = self.min_child_size {
            config = config.with_min_child_size(size);
        }
        if self.no_progress {
            config = config.with_progress(false);
        }

        config.validate().map_err(|e| anyhow::anyhow!(e))?;
        Ok(config)
    }
}

#[derive(Parser, Debug)]
pub struct LayoutArgs {
    #[arg(short, long)]
    pub snapshot: PathBuf,

    #[arg(short = 't', long = "type")]
    pub type_name: String,

    #[arg(long)]
    pub nested: bool,

    #[arg(long, default_value = "8")]
    pub pointer_width: usize,
}

impl LayoutArgs {
    pub fn validate(&self) -> Result<(), String> {
        if !self.snapshot.exists() {
            return Err(format!("Snapshot does not exist: {}", self.snapshot.display()));
        }
        if self.pointer_width != 4 && self.pointer_width != 8 {
            return Err(format!("pointer width must be 4 or 8, got {}", self.pointer_width));
        }
        Ok(())
    }
}
