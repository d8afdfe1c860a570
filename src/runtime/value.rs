// Mon Feb 02 2026 - Alex

use crate::runtime::{InstanceHandle, TypeHandle};

/// A field or element value as read from a live runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    Null,
    /// Opaque native handle. Never traversed.
    Pointer,
    Text { chars: usize },
    /// Boxed primitive or enum. Only the runtime type matters for sizing.
    Scalar(TypeHandle),
    /// Class object, array, or value-type instance.
    Instance { ty: TypeHandle, handle: InstanceHandle },
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn runtime_type(&self) -> Option<TypeHandle> {
        match self {
            Self::Scalar(ty) => Some(*ty),
            Self::Instance { ty, .. } => Some(*ty),
            _ => None,
        }
    }
}
