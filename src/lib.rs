// Mon Feb 02 2026 - Alex

pub mod config;
pub mod runtime;
pub mod layout;
pub mod walker;
pub mod report;
pub mod orchestration;
pub mod snapshot;
pub mod ui;

pub use config::Config;
pub use layout::{TypeLayout, TypeLayoutCache};
pub use walker::{ContributionTree, GraphWalker};
pub use report::ReportWriter;
pub use orchestration::{DumpCoordinator, DumpSummary};
pub use snapshot::HeapSnapshot;
