// Tue Feb 03 2026 - Alex

use crate::runtime::{InstanceHandle, TypeHandle};
use crate::walker::Root;

/// Types declared by one module, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleTypes {
    pub name: String,
    pub types: Vec<TypeHandle>,
}

/// A live engine object analysed through its instance fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveObject {
    pub handle: InstanceHandle,
    pub ty: TypeHandle,
    pub name: String,
    pub instance_id: i64,
}

impl LiveObject {
    pub fn identifier(&self) -> String {
        format!("{}{}", self.name, self.instance_id)
    }

    pub fn root(&self) -> Root {
        Root::Instance {
            handle: self.handle,
            ty: self.ty,
            identifier: self.identifier(),
        }
    }
}

/// Where the roots of a dump come from.
pub trait RootSupplier {
    fn modules(&self) -> Vec<ModuleTypes>;
    fn components(&self) -> Vec<LiveObject>;
    fn assets(&self) -> Vec<LiveObject>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walker::RootKind;

    #[test]
    fn test_live_object_root() {
        let object = LiveObject {
            handle: InstanceHandle(4),
            ty: TypeHandle(2),
            name: "Main Camera".to_string(),
            instance_id: -1204,
        };
        assert_eq!(object.identifier(), "Main Camera-1204");

        let root = object.root();
        assert_eq!(root.kind(), RootKind::Instance);
        assert_eq!(root.ty(), TypeHandle(2));
    }
}
