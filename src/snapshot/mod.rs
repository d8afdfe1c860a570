// Tue Feb 03 2026 - Alex

//! JSON heap snapshots.
//!
//! A snapshot is a frozen picture of a managed heap: type metadata, live
//! objects and static field values. [`HeapSnapshot`] serves it through
//! the same [`TypeMetadata`](crate::runtime::TypeMetadata) and
//! [`RootSupplier`](crate::orchestration::RootSupplier) interfaces a live
//! runtime bridge would implement.

pub mod error;
pub mod model;
pub mod heap;

pub use error::SnapshotError;
pub use model::{SnapshotFile, TypeSpec, KindSpec, FieldSpec, ObjectSpec, ValueSpec, StructSpec, LiveObjectSpec};
pub use heap::HeapSnapshot;
