// Tue Feb 03 2026 - Alex

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotFile {
    #[serde(default)]
    pub types: Vec<TypeSpec>,
    #[serde(default)]
    pub objects: Vec<ObjectSpec>,
    /// Type name -> static field name -> value.
    #[serde(default)]
    pub statics: HashMap<String, HashMap<String, ValueSpec>>,
    #[serde(default)]
    pub components: Vec<LiveObjectSpec>,
    #[serde(default)]
    pub assets: Vec<LiveObjectSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeSpec {
    pub name: String,
    #[serde(default = "default_module")]
    pub module: String,
    pub kind: KindSpec,
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default)]
    pub generic: bool,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KindSpec {
    Class,
    Struct,
    Interface,
    Pointer,
    /// Underlying primitive name.
    Enum(String),
    Array {
        element: String,
        #[serde(default = "default_rank")]
        rank: usize,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default, rename = "static")]
    pub is_static: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectSpec {
    pub id: u64,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub fields: HashMap<String, ValueSpec>,
    /// Array dimensions. Defaults to one dimension of `elements.len()`.
    #[serde(default)]
    pub lengths: Option<Vec<usize>>,
    #[serde(default)]
    pub elements: Vec<ValueSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueSpec {
    Null,
    Pointer,
    Ref(u64),
    Text(String),
    /// Primitive or enum type name.
    Scalar(String),
    Struct(StructSpec),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructSpec {
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub fields: HashMap<String, ValueSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveObjectSpec {
    pub object: u64,
    pub name: String,
    #[serde(default)]
    pub instance_id: i64,
}

fn default_module() -> String {
    "Default".to_string()
}

fn default_rank() -> usize {
    1
}
