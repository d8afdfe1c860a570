// Mon Feb 02 2026 - Alex

use crate::layout::{LayoutError, LayoutKind, TypeLayout, TypeLayoutCache};
use crate::runtime::{FieldInfo, TypeDescriptor, TypeHandle, TypeKind, TypeMetadata};
use std::sync::Arc;

/// One structural analysis pass. Recursion into base types and embedded
/// value types goes back through the cache so every intermediate result is
/// published as soon as it is complete.
pub(crate) struct LayoutAnalyzer<'a> {
    cache: &'a TypeLayoutCache,
    meta: &'a dyn TypeMetadata,
    in_progress: Vec<(TypeHandle, LayoutKind)>,
}

enum FieldCost {
    /// Priced entirely from metadata.
    Fixed(usize),
    /// Reference slot plus a per-instance contribution.
    Slot,
    /// Value type holding dynamic fields; priced when traversed.
    Inline,
    /// Native pointer. Never traversed.
    Opaque,
}

impl<'a> LayoutAnalyzer<'a> {
    pub(crate) fn new(cache: &'a TypeLayoutCache, meta: &'a dyn TypeMetadata) -> Self {
        Self {
            cache,
            meta,
            in_progress: Vec::new(),
        }
    }

    pub(crate) fn layout(&mut self, ty: TypeHandle, kind: LayoutKind) -> Result<Arc<TypeLayout>, LayoutError> {
        if let Some(layout) = self.cache.lookup(ty, kind) {
            return Ok(layout);
        }

        if self.in_progress.contains(&(ty, kind)) {
            let name = self.meta.describe(ty).map(|d| d.name).unwrap_or_else(|_| ty.to_string());
            return Err(LayoutError::RecursiveValueType(name));
        }

        self.in_progress.push((ty, kind));
        let computed = self.compute(ty, kind);
        self.in_progress.pop();

        Ok(self.cache.publish(ty, kind, computed?))
    }

    fn compute(&mut self, ty: TypeHandle, kind: LayoutKind) -> Result<TypeLayout, LayoutError> {
        let desc = self.meta.describe(ty)?;
        if desc.generic {
            self.cache.note_generic(ty);
        }

        let ptr = self.cache.pointer_width();

        match desc.kind {
            TypeKind::Pointer => Ok(TypeLayout::new(ptr.bytes(), Vec::new(), false)),
            TypeKind::Array { element, .. } => {
                let element_desc = self.meta.describe(element)?;
                let words = if element_desc.kind.is_value_type() { 3 } else { 4 };
                Ok(TypeLayout::new(ptr.words(words), Vec::new(), false))
            }
            TypeKind::Primitive(prim) | TypeKind::Enum(prim) => Ok(TypeLayout::fixed(prim.size(ptr.bytes()))),
            TypeKind::Class | TypeKind::Text | TypeKind::Interface | TypeKind::Struct => {
                self.compute_aggregate(ty, &desc, kind)
            }
        }
    }

    fn compute_aggregate(&mut self, ty: TypeHandle, desc: &TypeDescriptor, kind: LayoutKind) -> Result<TypeLayout, LayoutError> {
        let ptr = self.cache.pointer_width();
        let boxed_root = kind == LayoutKind::Root && desc.kind.is_reference_type();

        let mut static_size = if boxed_root { ptr.words(2) } else { 0 };
        let mut dynamic_fields: Vec<FieldInfo> = Vec::new();
        let mut statically_sized = desc.kind.is_value_type();

        if let Some(base) = desc.base {
            let base_layout = self.layout(base, LayoutKind::Nested)?;
            static_size += base_layout.static_size();
            dynamic_fields.extend(base_layout.dynamic_fields().iter().cloned());
            statically_sized &= base_layout.is_statically_sized();
        }

        for field in self.meta.instance_fields(ty)? {
            match self.field_cost(&field)? {
                FieldCost::Fixed(size) => static_size += size,
                FieldCost::Slot => {
                    static_size += ptr.bytes();
                    statically_sized = false;
                    dynamic_fields.push(field);
                }
                FieldCost::Inline => {
                    statically_sized = false;
                    dynamic_fields.push(field);
                }
                FieldCost::Opaque => statically_sized = false,
            }
        }

        if boxed_root {
            static_size = ptr.align(static_size.max(ptr.words(3)));
        }

        Ok(TypeLayout::new(static_size, dynamic_fields, statically_sized))
    }

    fn field_cost(&mut self, field: &FieldInfo) -> Result<FieldCost, LayoutError> {
        let desc = self.meta.describe(field.ty)?;
        let cost = match desc.kind {
            TypeKind::Primitive(prim) | TypeKind::Enum(prim) => {
                FieldCost::Fixed(prim.size(self.cache.pointer_width().bytes()))
            }
            TypeKind::Struct => {
                let nested = self.layout(field.ty, LayoutKind::Nested)?;
                if nested.is_statically_sized() {
                    FieldCost::Fixed(nested.static_size())
                } else {
                    FieldCost::Inline
                }
            }
            TypeKind::Pointer => FieldCost::Opaque,
            TypeKind::Class | TypeKind::Text | TypeKind::Interface | TypeKind::Array { .. } => FieldCost::Slot,
        };
        Ok(cost)
    }
}
