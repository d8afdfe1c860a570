// Mon Feb 02 2026 - Alex

use crate::layout::{LayoutError, TypeLayout, TypeLayoutCache};
use crate::runtime::{FieldInfo, InstanceHandle, TypeDescriptor, TypeHandle, TypeKind, TypeMetadata, Value};
use crate::walker::{ContributionNode, ContributionTree, Root, TraversalError, VisitedSet, WalkError};
use std::collections::HashSet;
use std::sync::Arc;

/// How a single runtime value is priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    Primitive,
    Enum,
    Text,
    Array,
    ReferenceAggregate,
    ValueAggregate,
}

impl ValueShape {
    /// `None` for pointer-shaped types, which are never priced.
    pub fn of(kind: &TypeKind) -> Option<Self> {
        let shape = match kind {
            TypeKind::Primitive(_) => Self::Primitive,
            TypeKind::Enum(_) => Self::Enum,
            TypeKind::Text => Self::Text,
            TypeKind::Array { .. } => Self::Array,
            TypeKind::Class | TypeKind::Interface => Self::ReferenceAggregate,
            TypeKind::Struct => Self::ValueAggregate,
            TypeKind::Pointer => return None,
        };
        Some(shape)
    }

    /// Shapes compared by reference identity in the visited set.
    pub fn has_identity(self) -> bool {
        matches!(self, Self::Text | Self::Array | Self::ReferenceAggregate)
    }
}

/// Builds a [`ContributionTree`] for one root at a time.
///
/// The layout cache is shared across roots; the visited set is not.
pub struct GraphWalker<'a> {
    meta: &'a dyn TypeMetadata,
    cache: &'a TypeLayoutCache,
}

impl<'a> GraphWalker<'a> {
    pub fn new(meta: &'a dyn TypeMetadata, cache: &'a TypeLayoutCache) -> Self {
        Self { meta, cache }
    }

    pub fn walk(&self, root: &Root) -> Result<ContributionTree, WalkError> {
        let mut visited = VisitedSet::new();

        let node = match root {
            Root::Statics(ty) => {
                let desc = self.meta.describe(*ty)?;
                let mut node = ContributionNode::new(&desc.name, &desc.name);
                for field in self.meta.static_fields(*ty)? {
                    self.parse_field(&field, None, &mut node, &mut visited)?;
                }
                node
            }
            Root::Instance { handle, ty, identifier } => {
                let desc = self.meta.describe(*ty)?;
                let mut node = ContributionNode::new(identifier, &desc.name);
                for field in self.field_chain(*ty)? {
                    self.parse_field(&field, Some(*handle), &mut node, &mut visited)?;
                }
                node
            }
        };

        log::debug!(
            "Walked {} ({} nodes, {} objects, {} bytes)",
            node.identifier(),
            node.node_count(),
            visited.len(),
            node.size()
        );

        Ok(ContributionTree::new(root.kind(), node))
    }

    /// Size of a string with `chars` UTF-16 code units.
    pub fn text_size(&self, chars: usize) -> usize {
        let ptr = self.cache.pointer_width();
        ptr.align(ptr.words(3) + 2 + chars * 2)
    }

    /// Instance fields of `ty` and all its bases, most basic type first.
    fn field_chain(&self, ty: TypeHandle) -> Result<Vec<FieldInfo>, LayoutError> {
        let mut chain = vec![ty];
        let mut seen = HashSet::from([ty]);
        let mut current = self.meta.describe(ty)?;

        while let Some(base) = current.base {
            if !seen.insert(base) {
                return Err(LayoutError::Unsupported {
                    name: current.name,
                    reason: "cyclic base type chain".to_string(),
                });
            }
            chain.push(base);
            current = self.meta.describe(base)?;
        }

        let mut fields = Vec::new();
        for ty in chain.into_iter().rev() {
            fields.extend(self.meta.instance_fields(ty)?);
        }
        Ok(fields)
    }

    fn parse_field(
        &self,
        field: &FieldInfo,
        owner: Option<InstanceHandle>,
        parent: &mut ContributionNode,
        visited: &mut VisitedSet,
    ) -> Result<(), WalkError> {
        if self.meta.describe(field.ty)?.kind.is_pointer() {
            return Ok(());
        }
        let value = self.meta.read_field(owner, field)?;
        self.parse_item(value, &field.name, parent, visited)
    }

    fn parse_item(
        &self,
        value: Value,
        name: &str,
        parent: &mut ContributionNode,
        visited: &mut VisitedSet,
    ) -> Result<(), WalkError> {
        let (ty, handle) = match value {
            Value::Null | Value::Pointer => return Ok(()),
            Value::Text { chars } => {
                parent.add_size(self.text_size(chars));
                return Ok(());
            }
            Value::Scalar(ty) => (ty, None),
            Value::Instance { ty, handle } => (ty, Some(handle)),
        };

        let desc = self.meta.describe(ty)?;
        let shape = match ValueShape::of(&desc.kind) {
            Some(shape) => shape,
            None => return Ok(()),
        };

        let layout = self.cache.root_layout(self.meta, ty)?;
        if !shape.has_identity() && !layout.has_dynamic_fields() {
            // embedded straight into the parent, no node of its own
            parent.add_size(layout.static_size());
            return Ok(());
        }

        let handle = handle.ok_or_else(|| TraversalError::MissingStorage(desc.name.clone()))?;
        if shape.has_identity() && !visited.insert(handle) {
            return Ok(());
        }

        let child = self.build_node(name, &desc, handle, &layout, visited)?;
        parent.push_child(child);
        Ok(())
    }

    fn build_node(
        &self,
        name: &str,
        desc: &TypeDescriptor,
        handle: InstanceHandle,
        layout: &Arc<TypeLayout>,
        visited: &mut VisitedSet,
    ) -> Result<ContributionNode, WalkError> {
        let mut node = ContributionNode::new(name, &desc.name);
        node.add_size(layout.static_size());

        if let TypeKind::Array { element, .. } = desc.kind {
            self.fill_array(&mut node, element, handle, visited)?;
        } else {
            for field in layout.dynamic_fields() {
                self.parse_field(field, Some(handle), &mut node, visited)?;
            }
        }

        Ok(node)
    }

    fn fill_array(
        &self,
        node: &mut ContributionNode,
        element: TypeHandle,
        handle: InstanceHandle,
        visited: &mut VisitedSet,
    ) -> Result<(), WalkError> {
        let lengths = self.meta.array_lengths(handle)?;
        let total = if lengths.is_empty() {
            0
        } else {
            lengths.iter().fold(1usize, |acc, &n| acc.saturating_mul(n))
        };
        node.set_array_length(total);

        let element_desc = self.meta.describe(element)?;
        if element_desc.kind.is_value_type() {
            let element_layout = self.cache.root_layout(self.meta, element)?;
            if !element_layout.has_dynamic_fields() {
                node.add_size(element_layout.static_size().saturating_mul(total));
                return Ok(());
            }
        } else {
            node.add_size(self.cache.pointer_width().bytes().saturating_mul(total));
        }

        for (index, item) in self.meta.array_elements(handle)?.enumerate() {
            self.parse_item(item, &index.to_string(), node, visited)?;
        }
        Ok(())
    }
}
