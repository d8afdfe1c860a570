// Tue Feb 03 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Duplicate type: {0}")]
    DuplicateType(String),
    #[error("Unknown type: {0}")]
    UnknownType(String),
    #[error("Duplicate object id: {0}")]
    DuplicateObject(u64),
    #[error("Unknown object id: {0}")]
    UnknownObject(u64),
    #[error("Enum {name} has non-primitive underlying type {underlying}")]
    InvalidEnum { name: String, underlying: String },
    #[error("Invalid value for {ty}: {reason}")]
    InvalidValue { ty: String, reason: String },
    #[error("Malformed array object {id}: {reason}")]
    MalformedArray { id: u64, reason: String },
}
