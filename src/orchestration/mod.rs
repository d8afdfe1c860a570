// Tue Feb 03 2026 - Alex

pub mod error;
pub mod supplier;
pub mod dispatcher;
pub mod coordinator;

pub use error::{DumpError, RootFailure};
pub use supplier::{LiveObject, ModuleTypes, RootSupplier};
pub use dispatcher::{WriteDispatcher, WriteTicket};
pub use coordinator::DumpCoordinator;
pub use crate::report::DumpSummary;
