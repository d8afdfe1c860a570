// Mon Feb 02 2026 - Alex

use crate::runtime::{InstanceHandle, TypeHandle};

/// One independent unit of analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Root {
    /// Static fields of a type.
    Statics(TypeHandle),
    /// Instance fields of a live object.
    Instance {
        handle: InstanceHandle,
        ty: TypeHandle,
        identifier: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootKind {
    Statics,
    Instance,
}

impl Root {
    pub fn kind(&self) -> RootKind {
        match self {
            Self::Statics(_) => RootKind::Statics,
            Self::Instance { .. } => RootKind::Instance,
        }
    }

    pub fn ty(&self) -> TypeHandle {
        match self {
            Self::Statics(ty) => *ty,
            Self::Instance { ty, .. } => *ty,
        }
    }
}
