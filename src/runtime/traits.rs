// Mon Feb 02 2026 - Alex

use crate::layout::LayoutError;
use crate::runtime::{FieldInfo, InstanceHandle, TypeDescriptor, TypeHandle, Value};
use crate::walker::TraversalError;

/// Introspection surface of a host runtime.
///
/// `describe` and `fields` are pure metadata queries and never need a live
/// instance. The read methods operate on live storage and may fail if the
/// object has gone away.
pub trait TypeMetadata: Send + Sync {
    fn describe(&self, ty: TypeHandle) -> Result<TypeDescriptor, LayoutError>;

    /// Declared fields only, static and instance. Inherited fields are
    /// reached through the base type.
    fn fields(&self, ty: TypeHandle) -> Result<Vec<FieldInfo>, LayoutError>;

    /// Reads `field` from `owner`, or from the type's static storage when
    /// `owner` is `None`.
    fn read_field(&self, owner: Option<InstanceHandle>, field: &FieldInfo) -> Result<Value, TraversalError>;

    /// Length of every dimension of an array instance.
    fn array_lengths(&self, array: InstanceHandle) -> Result<Vec<usize>, TraversalError>;

    /// Every element slot in row-major order, `product(array_lengths)` of them.
    fn array_elements(&self, array: InstanceHandle) -> Result<Box<dyn Iterator<Item = Value> + '_>, TraversalError>;

    fn instance_fields(&self, ty: TypeHandle) -> Result<Vec<FieldInfo>, LayoutError> {
        Ok(self.fields(ty)?.into_iter().filter(|f| !f.is_static).collect())
    }

    fn static_fields(&self, ty: TypeHandle) -> Result<Vec<FieldInfo>, LayoutError> {
        Ok(self.fields(ty)?.into_iter().filter(|f| f.is_static).collect())
    }
}
