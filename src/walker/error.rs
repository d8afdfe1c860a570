// Mon Feb 02 2026 - Alex

use crate::layout::LayoutError;
use crate::runtime::InstanceHandle;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TraversalError {
    #[error("Object not found: {0:?}")]
    ObjectNotFound(InstanceHandle),
    #[error("Failed to read field {field}: {reason}")]
    FieldRead { field: String, reason: String },
    #[error("Instance {0:?} is not an array")]
    NotAnArray(InstanceHandle),
    #[error("Value of type {0} has no backing storage")]
    MissingStorage(String),
    #[error("Object disposed: {0}")]
    Disposed(String),
}

/// Anything that stops the walk of a single root.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalkError {
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
    #[error("Traversal error: {0}")]
    Traversal(#[from] TraversalError),
}
