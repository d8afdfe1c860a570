// Mon Feb 02 2026 - Alex

use crate::layout::analyzer::LayoutAnalyzer;
use crate::layout::{LayoutError, LayoutKind, PointerWidth, TypeLayout};
use crate::runtime::{TypeHandle, TypeMetadata};
use indexmap::IndexSet;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Memoized type layouts for one dump run.
///
/// Entries are append-only. A layout is inserted only after it has been
/// fully computed, so concurrent readers never see a partial one; two
/// threads racing on the same key compute equal values and the first
/// insert wins.
pub struct TypeLayoutCache {
    pointer_width: PointerWidth,
    layouts: RwLock<HashMap<(TypeHandle, LayoutKind), Arc<TypeLayout>>>,
    generic_types: RwLock<IndexSet<TypeHandle>>,
}

impl TypeLayoutCache {
    pub fn new(pointer_width: PointerWidth) -> Self {
        Self {
            pointer_width,
            layouts: RwLock::new(HashMap::new()),
            generic_types: RwLock::new(IndexSet::new()),
        }
    }

    pub fn pointer_width(&self) -> PointerWidth {
        self.pointer_width
    }

    pub fn layout(&self, meta: &dyn TypeMetadata, ty: TypeHandle, kind: LayoutKind) -> Result<Arc<TypeLayout>, LayoutError> {
        if let Some(layout) = self.lookup(ty, kind) {
            return Ok(layout);
        }
        LayoutAnalyzer::new(self, meta).layout(ty, kind)
    }

    pub fn root_layout(&self, meta: &dyn TypeMetadata, ty: TypeHandle) -> Result<Arc<TypeLayout>, LayoutError> {
        self.layout(meta, ty, LayoutKind::Root)
    }

    pub fn nested_layout(&self, meta: &dyn TypeMetadata, ty: TypeHandle) -> Result<Arc<TypeLayout>, LayoutError> {
        self.layout(meta, ty, LayoutKind::Nested)
    }

    pub fn lookup(&self, ty: TypeHandle, kind: LayoutKind) -> Option<Arc<TypeLayout>> {
        self.layouts.read().get(&(ty, kind)).cloned()
    }

    pub(crate) fn publish(&self, ty: TypeHandle, kind: LayoutKind, layout: TypeLayout) -> Arc<TypeLayout> {
        self.layouts
            .write()
            .entry((ty, kind))
            .or_insert_with(|| Arc::new(layout))
            .clone()
    }

    pub(crate) fn note_generic(&self, ty: TypeHandle) {
        if self.generic_types.read().contains(&ty) {
            return;
        }
        self.generic_types.write().insert(ty);
    }

    /// Generic instantiations met while analysing layouts, in discovery order.
    pub fn generic_types(&self) -> Vec<TypeHandle> {
        self.generic_types.read().iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.layouts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TypeLayoutCache {
    fn default() -> Self {
        Self::new(PointerWidth::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::HeapSnapshot;
    use serde_json::json;

    fn snapshot() -> HeapSnapshot {
        HeapSnapshot::from_value(json!({
            "types": [
                { "name": "Pair", "kind": "struct", "fields": [
                    { "name": "count", "type": "int" },
                    { "name": "ratio", "type": "double" }
                ]},
                { "name": "Empty", "kind": "class" },
                { "name": "Counter", "kind": "class", "fields": [
                    { "name": "value", "type": "int" }
                ]},
                { "name": "Labelled", "kind": "class", "fields": [
                    { "name": "id", "type": "int" },
                    { "name": "label", "type": "string" }
                ]},
                { "name": "Base", "kind": "class", "fields": [
                    { "name": "stamp", "type": "long" },
                    { "name": "tag", "type": "string" }
                ]},
                { "name": "Derived", "kind": "class", "base": "Base", "fields": [
                    { "name": "extra", "type": "int" },
                    { "name": "Shared", "type": "string", "static": true }
                ]},
                { "name": "Named", "kind": "struct", "fields": [
                    { "name": "id", "type": "int" },
                    { "name": "name", "type": "string" }
                ]},
                { "name": "Holder", "kind": "class", "fields": [
                    { "name": "entry", "type": "Named" },
                    { "name": "pair", "type": "Pair" }
                ]},
                { "name": "void*", "kind": "pointer" },
                { "name": "Native", "kind": "class", "fields": [
                    { "name": "handle", "type": "void*" }
                ]},
                { "name": "Flags", "kind": { "enum": "byte" } },
                { "name": "int[]", "kind": { "array": { "element": "int" } } },
                { "name": "string[]", "kind": { "array": { "element": "string" } } },
                { "name": "Pair[]", "kind": { "array": { "element": "Pair" } } },
                { "name": "Loop", "kind": "struct", "fields": [
                    { "name": "inner", "type": "Loop" }
                ]},
                { "name": "List<int>", "kind": "class", "generic": true, "fields": [
                    { "name": "items", "type": "int[]" }
                ]},
                { "name": "IShape", "kind": "interface" },
                { "name": "Canvas", "kind": "class", "fields": [
                    { "name": "shape", "type": "IShape" },
                    { "name": "layer", "type": "int" }
                ]}
            ]
        }))
        .unwrap()
    }

    fn root_size(cache: &TypeLayoutCache, snap: &HeapSnapshot, name: &str) -> usize {
        let ty = snap.type_handle(name).unwrap();
        cache.root_layout(snap, ty).unwrap().static_size()
    }

    #[test]
    fn test_statically_sized_struct_is_not_padded() {
        let snap = snapshot();
        let cache = TypeLayoutCache::default();
        let ty = snap.type_handle("Pair").unwrap();

        let nested = cache.nested_layout(&snap, ty).unwrap();
        assert_eq!(nested.static_size(), 12);
        assert!(!nested.has_dynamic_fields());
        assert!(nested.is_statically_sized());

        let root = cache.root_layout(&snap, ty).unwrap();
        assert_eq!(root.static_size(), 12);
    }

    #[test]
    fn test_empty_class_gets_floor() {
        let snap = snapshot();
        assert_eq!(root_size(&TypeLayoutCache::default(), &snap, "Empty"), 24);
        assert_eq!(root_size(&TypeLayoutCache::new(PointerWidth::new(4)), &snap, "Empty"), 12);
    }

    #[test]
    fn test_class_header_and_padding() {
        let snap = snapshot();
        let cache = TypeLayoutCache::default();
        assert_eq!(root_size(&cache, &snap, "Counter"), 24);

        let ty = snap.type_handle("Labelled").unwrap();
        let layout = cache.root_layout(&snap, ty).unwrap();
        // 16 header + 4 int + 8 slot, padded
        assert_eq!(layout.static_size(), 32);
        assert_eq!(layout.dynamic_fields().len(), 1);
        assert_eq!(layout.dynamic_fields()[0].name, "label");
    }

    #[test]
    fn test_base_type_is_folded_in() {
        let snap = snapshot();
        let cache = TypeLayoutCache::default();
        let derived = snap.type_handle("Derived").unwrap();
        let base = snap.type_handle("Base").unwrap();

        let layout = cache.root_layout(&snap, derived).unwrap();
        assert_eq!(layout.static_size(), 40);
        let names: Vec<_> = layout.dynamic_fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["tag"]);

        assert_eq!(cache.nested_layout(&snap, base).unwrap().static_size(), 16);
        assert_eq!(cache.root_layout(&snap, base).unwrap().static_size(), 32);
    }

    #[test]
    fn test_value_type_with_references_costs_no_slot() {
        let snap = snapshot();
        let cache = TypeLayoutCache::default();

        let named = snap.type_handle("Named").unwrap();
        let nested = cache.nested_layout(&snap, named).unwrap();
        assert_eq!(nested.static_size(), 12);
        assert!(!nested.is_statically_sized());

        let holder = snap.type_handle("Holder").unwrap();
        let layout = cache.root_layout(&snap, holder).unwrap();
        // header 16 + Pair 12 = 28, padded to 32; `entry` is priced per instance
        assert_eq!(layout.static_size(), 32);
        let names: Vec<_> = layout.dynamic_fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["entry"]);
    }

    #[test]
    fn test_pointer_fields_are_opaque() {
        let snap = snapshot();
        let cache = TypeLayoutCache::default();
        let native = snap.type_handle("Native").unwrap();
        let layout = cache.root_layout(&snap, native).unwrap();
        assert_eq!(layout.static_size(), 24);
        assert!(!layout.has_dynamic_fields());
        assert_eq!(root_size(&cache, &snap, "void*"), 8);
    }

    #[test]
    fn test_scalar_and_array_layouts() {
        let snap = snapshot();
        let cache = TypeLayoutCache::default();
        assert_eq!(root_size(&cache, &snap, "Flags"), 1);
        assert_eq!(root_size(&cache, &snap, "double"), 8);
        assert_eq!(root_size(&cache, &snap, "int[]"), 24);
        assert_eq!(root_size(&cache, &snap, "Pair[]"), 24);
        assert_eq!(root_size(&cache, &snap, "string[]"), 32);
    }

    #[test]
    fn test_recursive_value_type_is_an_error() {
        let snap = snapshot();
        let cache = TypeLayoutCache::default();
        let ty = snap.type_handle("Loop").unwrap();
        let err = cache.root_layout(&snap, ty).unwrap_err();
        assert_eq!(err, LayoutError::RecursiveValueType("Loop".to_string()));
    }

    #[test]
    fn test_layouts_are_memoized() {
        let snap = snapshot();
        let cache = TypeLayoutCache::default();
        let ty = snap.type_handle("Derived").unwrap();

        let first = cache.root_layout(&snap, ty).unwrap();
        let entries = cache.len();
        let second = cache.root_layout(&snap, ty).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), entries);
        assert!(cache.lookup(snap.type_handle("Base").unwrap(), LayoutKind::Nested).is_some());
    }

    #[test]
    fn test_generic_types_are_recorded() {
        let snap = snapshot();
        let cache = TypeLayoutCache::default();
        let list = snap.type_handle("List<int>").unwrap();
        assert!(cache.is_empty());
        cache.root_layout(&snap, list).unwrap();
        cache.root_layout(&snap, list).unwrap();
        assert_eq!(cache.generic_types(), vec![list]);
    }

    #[test]
    fn test_interface_field_takes_a_slot() {
        let snap = snapshot();
        let cache = TypeLayoutCache::default();
        let canvas = snap.type_handle("Canvas").unwrap();

        let layout = cache.root_layout(&snap, canvas).unwrap();
        // 16 header + 8 slot + 4 int, padded
        assert_eq!(layout.static_size(), 32);
        let names: Vec<_> = layout.dynamic_fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["shape"]);
    }

    #[test]
    fn test_parallel_lookups_share_one_layout() {
        use rayon::prelude::*;

        let snap = snapshot();
        let cache = TypeLayoutCache::default();
        let ty = snap.type_handle("Derived").unwrap();

        let layouts: Vec<Arc<TypeLayout>> = (0..16)
            .into_par_iter()
            .map(|_| cache.root_layout(&snap, ty).unwrap())
            .collect();

        assert_eq!(layouts.len(), 16);
        assert!(layouts.iter().all(|layout| Arc::ptr_eq(layout, &layouts[0])));
        assert_eq!(layouts[0].static_size(), 40);
        assert!(Arc::ptr_eq(&layouts[0], &cache.root_layout(&snap, ty).unwrap()));
    }
}
