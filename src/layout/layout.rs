// Mon Feb 02 2026 - Alex

use crate::runtime::FieldInfo;

/// Which cache a layout lives in.
///
/// `Root` layouts describe a value that stands on its own: reference types
/// get the object header, the minimum size floor and the trailing padding.
/// `Nested` layouts describe a base class or an embedded value type whose
/// bytes are absorbed into the containing type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    Root,
    Nested,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeLayout {
    static_size: usize,
    dynamic_fields: Vec<FieldInfo>,
    statically_sized: bool,
}

impl TypeLayout {
    pub fn new(static_size: usize, dynamic_fields: Vec<FieldInfo>, statically_sized: bool) -> Self {
        Self {
            static_size,
            dynamic_fields,
            statically_sized,
        }
    }

    pub fn fixed(static_size: usize) -> Self {
        Self::new(static_size, Vec::new(), true)
    }

    /// Bytes known without looking at an instance.
    pub fn static_size(&self) -> usize {
        self.static_size
    }

    /// Fields whose contribution has to be priced from a live value, base
    /// class fields first.
    pub fn dynamic_fields(&self) -> &[FieldInfo] {
        &self.dynamic_fields
    }

    pub fn has_dynamic_fields(&self) -> bool {
        !self.dynamic_fields.is_empty()
    }

    /// True when nothing inside the type, transitively, is a reference,
    /// array, pointer or interface.
    pub fn is_statically_sized(&self) -> bool {
        self.statically_sized
    }
}
