// Mon Feb 02 2026 - Alex

use crate::runtime::TypeHandle;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Unknown type: {0}")]
    UnknownType(TypeHandle),
    #[error("Value type {0} contains itself by value")]
    RecursiveValueType(String),
    #[error("Unsupported type construct in {name}: {reason}")]
    Unsupported { name: String, reason: String },
    #[error("Introspection failed for {name}: {reason}")]
    Introspection { name: String, reason: String },
}
