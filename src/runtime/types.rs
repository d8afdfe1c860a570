// Mon Feb 02 2026 - Alex

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstanceHandle(pub u64);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Primitive(PrimitiveType),
    Enum(PrimitiveType),
    Pointer,
    Text,
    Array { element: TypeHandle, rank: usize },
    Class,
    Struct,
    Interface,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Bool,
    Char,
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    NativeInt,
    NativeUInt,
}

impl TypeKind {
    pub fn is_pointer(&self) -> bool {
        matches!(self, Self::Pointer)
    }

    /// Primitive, enum or struct: stored inline, no reference identity.
    pub fn is_value_type(&self) -> bool {
        matches!(self, Self::Primitive(_) | Self::Enum(_) | Self::Struct)
    }

    /// Types whose instances live behind a reference slot.
    pub fn is_reference_type(&self) -> bool {
        matches!(self, Self::Class | Self::Text | Self::Interface | Self::Array { .. })
    }
}

impl PrimitiveType {
    /// Marshalled width in bytes.
    pub fn size(self, pointer_width: usize) -> usize {
        match self {
            Self::Char | Self::I8 | Self::U8 => 1,
            Self::I16 | Self::U16 => 2,
            Self::Bool | Self::I32 | Self::U32 | Self::F32 => 4,
            Self::I64 | Self::U64 | Self::F64 => 8,
            Self::NativeInt | Self::NativeUInt => pointer_width,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let ty = match name {
            "bool" => Self::Bool,
            "char" => Self::Char,
            "sbyte" => Self::I8,
            "byte" => Self::U8,
            "short" => Self::I16,
            "ushort" => Self::U16,
            "int" => Self::I32,
            "uint" => Self::U32,
            "long" => Self::I64,
            "ulong" => Self::U64,
            "float" => Self::F32,
            "double" => Self::F64,
            "nint" => Self::NativeInt,
            "nuint" => Self::NativeUInt,
            _ => return None,
        };
        Some(ty)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::I8 => "sbyte",
            Self::U8 => "byte",
            Self::I16 => "short",
            Self::U16 => "ushort",
            Self::I32 => "int",
            Self::U32 => "uint",
            Self::I64 => "long",
            Self::U64 => "ulong",
            Self::F32 => "float",
            Self::F64 => "double",
            Self::NativeInt => "nint",
            Self::NativeUInt => "nuint",
        }
    }

    pub fn all() -> &'static [PrimitiveType] {
        &[
            Self::Bool,
            Self::Char,
            Self::I8,
            Self::U8,
            Self::I16,
            Self::U16,
            Self::I32,
            Self::U32,
            Self::I64,
            Self::U64,
            Self::F32,
            Self::F64,
            Self::NativeInt,
            Self::NativeUInt,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub name: String,
    pub module: String,
    pub kind: TypeKind,
    /// `None` when the only ancestor is the runtime's implicit root
    /// (object, value type, array or enum base).
    pub base: Option<TypeHandle>,
    pub generic: bool,
}

impl TypeDescriptor {
    pub fn new(name: &str, kind: TypeKind) -> Self {
        Self {
            name: name.to_string(),
            module: String::new(),
            kind,
            base: None,
            generic: false,
        }
    }

    pub fn with_module(mut self, module: &str) -> Self {
        self.module = module.to_string();
        self
    }

    pub fn with_base(mut self, base: TypeHandle) -> Self {
        self.base = Some(base);
        self
    }

    pub fn with_generic(mut self, generic: bool) -> Self {
        self.generic = generic;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldInfo {
    pub name: String,
    pub ty: TypeHandle,
    /// Type that declares the field.
    pub owner: TypeHandle,
    pub is_static: bool,
}

impl FieldInfo {
    pub fn new(owner: TypeHandle, name: &str, ty: TypeHandle, is_static: bool) -> Self {
        Self {
            name: name.to_string(),
            ty,
            owner,
            is_static,
        }
    }
}

impl fmt::Display for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Display for FieldInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_static {
            write!(f, "static {}: {}", self.name, self.ty)
        } else {
            write!(f, "{}: {}", self.name, self.ty)
        }
    }
}
