// Tue Feb 03 2026 - Alex

use crate::layout::LayoutError;
use crate::orchestration::{LiveObject, ModuleTypes, RootSupplier};
use crate::runtime::{FieldInfo, InstanceHandle, PrimitiveType, TypeDescriptor, TypeHandle, TypeKind, TypeMetadata, Value};
use crate::snapshot::{KindSpec, LiveObjectSpec, SnapshotError, SnapshotFile, TypeSpec, ValueSpec};
use crate::walker::TraversalError;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::fs;
use std::iter;
use std::path::Path;

const BUILTIN_MODULE: &str = "System";

struct TypeEntry {
    desc: TypeDescriptor,
    fields: Vec<FieldInfo>,
}

struct ObjectEntry {
    ty: TypeHandle,
    fields: HashMap<String, Value>,
    array: Option<ArrayData>,
}

struct ArrayData {
    lengths: Vec<usize>,
    elements: Vec<Value>,
    total: usize,
}

/// A loaded, fully resolved heap snapshot.
///
/// Every type and object reference is resolved at load time, so reads only
/// fail for handles that never came from this snapshot. Fields that the
/// document leaves out read as their type's default: null for references,
/// a scalar for primitives and enums, and a shared zeroed instance for
/// value types.
pub struct HeapSnapshot {
    types: Vec<TypeEntry>,
    type_names: HashMap<String, TypeHandle>,
    objects: Vec<ObjectEntry>,
    object_ids: HashMap<u64, InstanceHandle>,
    statics: HashMap<TypeHandle, HashMap<String, Value>>,
    default_structs: HashMap<TypeHandle, InstanceHandle>,
    components: Vec<LiveObject>,
    assets: Vec<LiveObject>,
}

impl HeapSnapshot {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SnapshotError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, SnapshotError> {
        let file: SnapshotFile = serde_json::from_str(content)?;
        Self::from_model(file)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, SnapshotError> {
        let file: SnapshotFile = serde_json::from_value(value)?;
        Self::from_model(file)
    }

    pub fn from_model(file: SnapshotFile) -> Result<Self, SnapshotError> {
        let mut snapshot = Self {
            types: Vec::new(),
            type_names: HashMap::new(),
            objects: Vec::new(),
            object_ids: HashMap::new(),
            statics: HashMap::new(),
            default_structs: HashMap::new(),
            components: Vec::new(),
            assets: Vec::new(),
        };

        snapshot.register_builtins()?;
        snapshot.load_types(&file.types)?;
        snapshot.create_default_structs();
        snapshot.load_objects(&file)?;
        snapshot.load_statics(&file)?;
        snapshot.components = snapshot.resolve_live(&file.components)?;
        snapshot.assets = snapshot.resolve_live(&file.assets)?;

        log::debug!(
            "Loaded snapshot: {} types, {} objects, {} components, {} assets",
            snapshot.types.len(),
            snapshot.object_ids.len(),
            snapshot.components.len(),
            snapshot.assets.len()
        );

        Ok(snapshot)
    }

    pub fn type_handle(&self, name: &str) -> Option<TypeHandle> {
        self.type_names.get(name).copied()
    }

    pub fn object_handle(&self, id: u64) -> Option<InstanceHandle> {
        self.object_ids.get(&id).copied()
    }

    pub fn object_type(&self, handle: InstanceHandle) -> Option<TypeHandle> {
        self.objects.get(handle.0 as usize).map(|o| o.ty)
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn object_count(&self) -> usize {
        self.object_ids.len()
    }

    fn register_builtins(&mut self) -> Result<(), SnapshotError> {
        for prim in PrimitiveType::all() {
            let desc = TypeDescriptor::new(prim.name(), TypeKind::Primitive(*prim)).with_module(BUILTIN_MODULE);
            self.add_type(desc)?;
        }
        self.add_type(TypeDescriptor::new("string", TypeKind::Text).with_module(BUILTIN_MODULE))?;
        Ok(())
    }

    fn add_type(&mut self, desc: TypeDescriptor) -> Result<TypeHandle, SnapshotError> {
        if self.type_names.contains_key(&desc.name) {
            return Err(SnapshotError::DuplicateType(desc.name));
        }
        let handle = TypeHandle(self.types.len() as u32);
        self.type_names.insert(desc.name.clone(), handle);
        self.types.push(TypeEntry { desc, fields: Vec::new() });
        Ok(handle)
    }

    fn lookup_type(&self, name: &str) -> Result<TypeHandle, SnapshotError> {
        self.type_handle(name).ok_or_else(|| SnapshotError::UnknownType(name.to_string()))
    }

    fn kind_of(&self, ty: TypeHandle) -> &TypeKind {
        &self.types[ty.0 as usize].desc.kind
    }

    fn load_types(&mut self, specs: &[TypeSpec]) -> Result<(), SnapshotError> {
        // names first, so fields and bases may refer to types declared later
        let mut declared = Vec::with_capacity(specs.len());
        for spec in specs {
            let desc = TypeDescriptor::new(&spec.name, TypeKind::Class)
                .with_module(&spec.module)
                .with_generic(spec.generic);
            declared.push((self.add_type(desc)?, spec));
        }

        for (handle, spec) in declared {
            let kind = self.resolve_kind(spec)?;
            let base = spec.base.as_deref().map(|b| self.lookup_type(b)).transpose()?;
            let fields = spec
                .fields
                .iter()
                .map(|f| -> Result<FieldInfo, SnapshotError> {
                    Ok(FieldInfo::new(handle, &f.name, self.lookup_type(&f.ty)?, f.is_static))
                })
                .collect::<Result<Vec<_>, SnapshotError>>()?;

            let entry = &mut self.types[handle.0 as usize];
            entry.desc.kind = kind;
            entry.desc.base = base;
            entry.fields = fields;
        }
        Ok(())
    }

    fn resolve_kind(&self, spec: &TypeSpec) -> Result<TypeKind, SnapshotError> {
        let kind = match &spec.kind {
            KindSpec::Class => TypeKind::Class,
            KindSpec::Struct => TypeKind::Struct,
            KindSpec::Interface => TypeKind::Interface,
            KindSpec::Pointer => TypeKind::Pointer,
            KindSpec::Enum(underlying) => {
                let prim = PrimitiveType::from_name(underlying).ok_or_else(|| SnapshotError::InvalidEnum {
                    name: spec.name.clone(),
                    underlying: underlying.clone(),
                })?;
                TypeKind::Enum(prim)
            }
            KindSpec::Array { element, rank } => TypeKind::Array {
                element: self.lookup_type(element)?,
                rank: *rank,
            },
        };
        Ok(kind)
    }

    fn create_default_structs(&mut self) {
        let structs: Vec<TypeHandle> = (0..self.types.len())
            .map(|i| TypeHandle(i as u32))
            .filter(|ty| matches!(self.kind_of(*ty), TypeKind::Struct))
            .collect();

        for ty in structs {
            let handle = self.push_object(ty);
            self.default_structs.insert(ty, handle);
        }
    }

    fn push_object(&mut self, ty: TypeHandle) -> InstanceHandle {
        let handle = InstanceHandle(self.objects.len() as u64);
        self.objects.push(ObjectEntry {
            ty,
            fields: HashMap::new(),
            array: None,
        });
        handle
    }

    fn load_objects(&mut self, file: &SnapshotFile) -> Result<(), SnapshotError> {
        for spec in &file.objects {
            let ty = self.lookup_type(&spec.ty)?;
            if self.object_ids.contains_key(&spec.id) {
                return Err(SnapshotError::DuplicateObject(spec.id));
            }
            let handle = self.push_object(ty);
            self.object_ids.insert(spec.id, handle);
        }

        for spec in &file.objects {
            let handle = self.object_ids[&spec.id];
            let ty = self.objects[handle.0 as usize].ty;

            match self.kind_of(ty).clone() {
                TypeKind::Array { rank, .. } => {
                    let elements = spec
                        .elements
                        .iter()
                        .map(|v| self.convert(v))
                        .collect::<Result<Vec<_>, SnapshotError>>()?;
                    let lengths = spec.lengths.clone().unwrap_or_else(|| vec![elements.len()]);
                    if lengths.len() != rank {
                        return Err(SnapshotError::MalformedArray {
                            id: spec.id,
                            reason: format!("{} lengths for a rank {} array", lengths.len(), rank),
                        });
                    }
                    let total = element_count(&lengths).ok_or_else(|| SnapshotError::MalformedArray {
                        id: spec.id,
                        reason: format!("element count of {:?} overflows", lengths),
                    })?;
                    if elements.len() > total {
                        return Err(SnapshotError::MalformedArray {
                            id: spec.id,
                            reason: format!("{} elements for {} slots", elements.len(), total),
                        });
                    }
                    self.objects[handle.0 as usize].array = Some(ArrayData { lengths, elements, total });
                }
                TypeKind::Class | TypeKind::Struct => {
                    let fields = self.convert_fields(&spec.fields)?;
                    self.objects[handle.0 as usize].fields = fields;
                }
                _ => {
                    return Err(SnapshotError::InvalidValue {
                        ty: spec.ty.clone(),
                        reason: "objects must be classes, structs or arrays".to_string(),
                    })
                }
            }
        }
        Ok(())
    }

    fn load_statics(&mut self, file: &SnapshotFile) -> Result<(), SnapshotError> {
        for (type_name, values) in &file.statics {
            let ty = self.lookup_type(type_name)?;
            let values = self.convert_fields(values)?;
            self.statics.insert(ty, values);
        }
        Ok(())
    }

    fn resolve_live(&self, specs: &[LiveObjectSpec]) -> Result<Vec<LiveObject>, SnapshotError> {
        specs
            .iter()
            .map(|spec| -> Result<LiveObject, SnapshotError> {
                let handle = self.object_handle(spec.object).ok_or(SnapshotError::UnknownObject(spec.object))?;
                Ok(LiveObject {
                    handle,
                    ty: self.objects[handle.0 as usize].ty,
                    name: spec.name.clone(),
                    instance_id: spec.instance_id,
                })
            })
            .collect()
    }

    fn convert_fields(&mut self, specs: &HashMap<String, ValueSpec>) -> Result<HashMap<String, Value>, SnapshotError> {
        specs
            .iter()
            .map(|(name, spec)| -> Result<(String, Value), SnapshotError> { Ok((name.clone(), self.convert(spec)?)) })
            .collect()
    }

    fn convert(&mut self, spec: &ValueSpec) -> Result<Value, SnapshotError> {
        match spec {
            ValueSpec::Null => Ok(Value::Null),
            ValueSpec::Pointer => Ok(Value::Pointer),
            ValueSpec::Ref(id) => {
                let handle = self.object_handle(*id).ok_or(SnapshotError::UnknownObject(*id))?;
                Ok(Value::Instance {
                    ty: self.objects[handle.0 as usize].ty,
                    handle,
                })
            }
            ValueSpec::Text(text) => Ok(Value::Text {
                chars: text.encode_utf16().count(),
            }),
            ValueSpec::Scalar(type_name) => {
                let ty = self.lookup_type(type_name)?;
                match self.kind_of(ty) {
                    TypeKind::Primitive(_) | TypeKind::Enum(_) => Ok(Value::Scalar(ty)),
                    _ => Err(SnapshotError::InvalidValue {
                        ty: type_name.clone(),
                        reason: "scalars must be primitives or enums".to_string(),
                    }),
                }
            }
            ValueSpec::Struct(spec) => {
                let ty = self.lookup_type(&spec.ty)?;
                if !matches!(self.kind_of(ty), TypeKind::Struct) {
                    return Err(SnapshotError::InvalidValue {
                        ty: spec.ty.clone(),
                        reason: "inline values must be structs".to_string(),
                    });
                }
                let fields = self.convert_fields(&spec.fields)?;
                let handle = self.push_object(ty);
                self.objects[handle.0 as usize].fields = fields;
                Ok(Value::Instance { ty, handle })
            }
        }
    }

    fn default_value(&self, ty: TypeHandle) -> Value {
        match self.types.get(ty.0 as usize).map(|t| &t.desc.kind) {
            Some(TypeKind::Primitive(_)) | Some(TypeKind::Enum(_)) => Value::Scalar(ty),
            Some(TypeKind::Struct) => self
                .default_structs
                .get(&ty)
                .map(|&handle| Value::Instance { ty, handle })
                .unwrap_or(Value::Null),
            _ => Value::Null,
        }
    }

    fn entry(&self, ty: TypeHandle) -> Result<&TypeEntry, LayoutError> {
        self.types.get(ty.0 as usize).ok_or(LayoutError::UnknownType(ty))
    }

    fn object(&self, handle: InstanceHandle) -> Result<&ObjectEntry, TraversalError> {
        self.objects.get(handle.0 as usize).ok_or(TraversalError::ObjectNotFound(handle))
    }

    fn array(&self, handle: InstanceHandle) -> Result<&ArrayData, TraversalError> {
        self.object(handle)?.array.as_ref().ok_or(TraversalError::NotAnArray(handle))
    }
}

fn element_count(lengths: &[usize]) -> Option<usize> {
    lengths.iter().try_fold(1usize, |acc, &n| acc.checked_mul(n))
}

impl TypeMetadata for HeapSnapshot {
    fn describe(&self, ty: TypeHandle) -> Result<TypeDescriptor, LayoutError> {
        self.entry(ty).map(|e| e.desc.clone())
    }

    fn fields(&self, ty: TypeHandle) -> Result<Vec<FieldInfo>, LayoutError> {
        self.entry(ty).map(|e| e.fields.clone())
    }

    fn read_field(&self, owner: Option<InstanceHandle>, field: &FieldInfo) -> Result<Value, TraversalError> {
        let stored = match owner {
            Some(handle) => self.object(handle)?.fields.get(&field.name).copied(),
            None => self.statics.get(&field.owner).and_then(|s| s.get(&field.name)).copied(),
        };
        Ok(stored.unwrap_or_else(|| self.default_value(field.ty)))
    }

    fn array_lengths(&self, array: InstanceHandle) -> Result<Vec<usize>, TraversalError> {
        self.array(array).map(|a| a.lengths.clone())
    }

    fn array_elements(&self, array: InstanceHandle) -> Result<Box<dyn Iterator<Item = Value> + '_>, TraversalError> {
        let object = self.object(array)?;
        let data = self.array(array)?;
        let element = match self.kind_of(object.ty) {
            TypeKind::Array { element, .. } => *element,
            _ => return Err(TraversalError::NotAnArray(array)),
        };

        // unlisted trailing slots hold the element default
        let padding = data.total - data.elements.len();
        let listed = data.elements.iter().copied();
        Ok(Box::new(listed.chain(iter::repeat(self.default_value(element)).take(padding))))
    }
}

impl RootSupplier for HeapSnapshot {
    fn modules(&self) -> Vec<ModuleTypes> {
        let mut modules: IndexMap<&str, Vec<TypeHandle>> = IndexMap::new();
        for (index, entry) in self.types.iter().enumerate() {
            modules
                .entry(entry.desc.module.as_str())
                .or_default()
                .push(TypeHandle(index as u32));
        }
        modules
            .into_iter()
            .map(|(name, types)| ModuleTypes {
                name: name.to_string(),
                types,
            })
            .collect()
    }

    fn components(&self) -> Vec<LiveObject> {
        self.components.clone()
    }

    fn assets(&self) -> Vec<LiveObject> {
        self.assets.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> HeapSnapshot {
        HeapSnapshot::from_value(json!({
            "types": [
                { "name": "Game.Player", "module": "Assembly-CSharp", "kind": "class", "fields": [
                    { "name": "health", "type": "int" },
                    { "name": "name", "type": "string" },
                    { "name": "spot", "type": "Game.Spot" },
                    { "name": "Count", "type": "int", "static": true }
                ]},
                { "name": "Game.Spot", "module": "Assembly-CSharp", "kind": "struct", "fields": [
                    { "name": "x", "type": "float" }
                ]},
                { "name": "Game.Mode", "module": "Assembly-CSharp", "kind": { "enum": "byte" } },
                { "name": "Engine.Asset", "module": "Engine", "kind": "class" },
                { "name": "Game.Player[]", "module": "Assembly-CSharp", "kind": { "array": { "element": "Game.Player" } } }
            ],
            "objects": [
                { "id": 10, "type": "Game.Player", "fields": { "name": { "text": "h\u{e9}llo\u{1F600}" } } },
                { "id": 11, "type": "Game.Player[]", "lengths": [3], "elements": [{ "ref": 10 }] },
                { "id": 12, "type": "Engine.Asset" }
            ],
            "components": [{ "object": 10, "name": "Player", "instance_id": 7 }],
            "assets": [{ "object": 12, "name": "Config", "instance_id": -3 }]
        }))
        .unwrap()
    }

    #[test]
    fn test_builtins_and_declared_types() {
        let snap = sample();
        let int = snap.type_handle("int").unwrap();
        assert_eq!(snap.describe(int).unwrap().kind, TypeKind::Primitive(PrimitiveType::I32));
        assert_eq!(snap.describe(snap.type_handle("string").unwrap()).unwrap().kind, TypeKind::Text);

        let mode = snap.describe(snap.type_handle("Game.Mode").unwrap()).unwrap();
        assert_eq!(mode.kind, TypeKind::Enum(PrimitiveType::U8));
        assert_eq!(mode.module, "Assembly-CSharp");

        let player = snap.type_handle("Game.Player").unwrap();
        assert_eq!(snap.fields(player).unwrap().len(), 4);
        assert_eq!(snap.static_fields(player).unwrap().len(), 1);
        assert_eq!(snap.instance_fields(player).unwrap().len(), 3);
    }

    #[test]
    fn test_missing_fields_read_as_defaults() {
        let snap = sample();
        let player = snap.type_handle("Game.Player").unwrap();
        let handle = snap.object_handle(10).unwrap();
        let fields = snap.fields(player).unwrap();

        let health = snap.read_field(Some(handle), &fields[0]).unwrap();
        assert_eq!(health, Value::Scalar(snap.type_handle("int").unwrap()));

        let name = snap.read_field(Some(handle), &fields[1]).unwrap();
        assert_eq!(name, Value::Text { chars: 7 });

        let spot = snap.read_field(Some(handle), &fields[2]).unwrap();
        assert!(matches!(spot, Value::Instance { ty, .. } if ty == snap.type_handle("Game.Spot").unwrap()));

        let count = snap.read_field(None, &fields[3]).unwrap();
        assert_eq!(count, Value::Scalar(snap.type_handle("int").unwrap()));
    }

    #[test]
    fn test_array_elements_are_padded() {
        let snap = sample();
        let array = snap.object_handle(11).unwrap();
        assert_eq!(snap.array_lengths(array).unwrap(), vec![3]);

        let elements: Vec<Value> = snap.array_elements(array).unwrap().collect();
        assert_eq!(elements.len(), 3);
        assert!(matches!(elements[0], Value::Instance { .. }));
        assert!(elements[1].is_null());

        let player = snap.object_handle(10).unwrap();
        assert_eq!(snap.array_lengths(player).unwrap_err(), TraversalError::NotAnArray(player));
    }

    #[test]
    fn test_supplier_groups_modules_in_order() {
        let snap = sample();
        let modules = snap.modules();
        let names: Vec<_> = modules.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["System", "Assembly-CSharp", "Engine"]);
        assert_eq!(modules[1].types.len(), 4);

        let components = snap.components();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].identifier(), "Player7");
        assert_eq!(snap.assets()[0].identifier(), "Config-3");
    }

    #[test]
    fn test_load_errors() {
        let unknown = HeapSnapshot::from_value(json!({
            "types": [{ "name": "A", "kind": "class", "fields": [{ "name": "b", "type": "B" }] }]
        }));
        assert!(matches!(unknown, Err(SnapshotError::UnknownType(name)) if name == "B"));

        let duplicate = HeapSnapshot::from_value(json!({
            "types": [{ "name": "int", "kind": "struct" }]
        }));
        assert!(matches!(duplicate, Err(SnapshotError::DuplicateType(_))));

        let dangling = HeapSnapshot::from_value(json!({
            "types": [{ "name": "A", "kind": "class", "fields": [{ "name": "next", "type": "A" }] }],
            "objects": [{ "id": 1, "type": "A", "fields": { "next": { "ref": 2 } } }]
        }));
        assert!(matches!(dangling, Err(SnapshotError::UnknownObject(2))));

        let bad_enum = HeapSnapshot::from_value(json!({
            "types": [{ "name": "E", "kind": { "enum": "string" } }]
        }));
        assert!(matches!(bad_enum, Err(SnapshotError::InvalidEnum { .. })));

        let overfull = HeapSnapshot::from_value(json!({
            "types": [{ "name": "int[]", "kind": { "array": { "element": "int" } } }],
            "objects": [{ "id": 1, "type": "int[]", "lengths": [1], "elements": [{ "scalar": "int" }, { "scalar": "int" }] }]
        }));
        assert!(matches!(overfull, Err(SnapshotError::MalformedArray { id: 1, .. })));

        assert!(matches!(HeapSnapshot::parse("{ not json"), Err(SnapshotError::Json(_))));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_overflowing_dimensions_are_a_load_error() {
        let result = HeapSnapshot::from_value(json!({
            "types": [{ "name": "int[,]", "kind": { "array": { "element": "int", "rank": 2 } } }],
            "objects": [{ "id": 1, "type": "int[,]", "lengths": [4294967296u64, 4294967296u64] }]
        }));
        assert!(matches!(result, Err(SnapshotError::MalformedArray { id: 1, .. })));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_sparse_array_padding_is_lazy() {
        let snap = HeapSnapshot::from_value(json!({
            "types": [{ "name": "string[]", "kind": { "array": { "element": "string" } } }],
            "objects": [{ "id": 1, "type": "string[]", "lengths": [1099511627776u64], "elements": [{ "text": "a" }] }]
        }))
        .unwrap();
        let array = snap.object_handle(1).unwrap();

        let mut elements = snap.array_elements(array).unwrap();
        assert_eq!(elements.next(), Some(Value::Text { chars: 1 }));
        assert_eq!(elements.next(), Some(Value::Null));
        assert_eq!(elements.size_hint().0, (1 << 40) - 2);
    }
}
