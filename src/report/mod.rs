// Tue Feb 03 2026 - Alex

pub mod writer;
pub mod naming;
pub mod summary;

pub use writer::{render, ReportWriter};
pub use naming::{report_file_name, sanitize, OutputLayout, PathClaims};
pub use summary::{DumpSummary, InstanceTotal, ModuleTotal, RootTotal};
