// Mon Feb 02 2026 - Alex

pub mod types;
pub mod value;
pub mod traits;

pub use types::{TypeHandle, InstanceHandle, TypeKind, PrimitiveType, TypeDescriptor, FieldInfo};
pub use value::Value;
pub use traits::TypeMetadata;
