//! JSON assembly manifest schema.
//!
//! A manifest describes one assembly: its name, the assemblies it
//! references, and every type it declares. Type references are strings in
//! the [`type_name`](crate::type_name) grammar.
//!
//! ```json
//! {
//!   "name": "Acme.Core",
//!   "references": ["Acme.Base"],
//!   "types": [
//!     {
//!       "name": "Acme.Pair`2",
//!       "kind": "class",
//!       "genericParams": [{ "name": "A" }, { "name": "B" }],
//!       "properties": [{ "name": "First", "type": "A", "canWrite": true }]
//!     }
//!   ]
//! }
//! ```

use crate::error::{ModelError, Result};
use crate::types::{TypeCategory, Variance};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyManifest {
    pub name: String,
    #[serde(default)]
    pub references: Vec<String>,
    #[serde(default)]
    pub types: Vec<TypeRecord>,
}

impl AssemblyManifest {
    pub fn from_json(text: &str, origin: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|source| ModelError::Manifest {
            origin: origin.to_string(),
            source,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text, &path.display().to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Internal,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRecord {
    /// Full name: ``Ns.Outer`1+Inner``.
    pub name: String,
    #[serde(default)]
    pub kind: TypeCategory,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    /// Parameters declared by this type itself; nested types inherit the
    /// declaring type's parameters implicitly.
    #[serde(default)]
    pub generic_params: Vec<GenericParamRecord>,
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub enum_underlying: Option<String>,
    #[serde(default)]
    pub enum_values: Vec<EnumValueRecord>,
    #[serde(default)]
    pub constructors: Vec<ConstructorRecord>,
    #[serde(default)]
    pub methods: Vec<MethodRecord>,
    #[serde(default)]
    pub properties: Vec<PropertyRecord>,
    #[serde(default)]
    pub fields: Vec<FieldRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericParamRecord {
    pub name: String,
    #[serde(default)]
    pub variance: Variance,
    #[serde(default)]
    pub constraints: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructorRecord {
    #[serde(default)]
    pub parameters: Vec<ParameterRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodRecord {
    pub name: String,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default)]
    pub special_name: bool,
    #[serde(default)]
    pub generic_params: Vec<GenericParamRecord>,
    #[serde(default)]
    pub parameters: Vec<ParameterRecord>,
    /// Omitted for methods returning nothing.
    #[serde(default)]
    pub return_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub optional: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default = "default_true")]
    pub can_read: bool,
    #[serde(default)]
    pub can_write: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default, rename = "static")]
    pub is_static: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnumValueRecord {
    pub name: String,
    pub value: i64,
}

fn default_true() -> bool {
    true
}
