//! Reflective object model for netstub.
//!
//! Assemblies are described by JSON manifests ([`manifest`]) and loaded
//! into a [`TypeUniverse`] by the [`AssemblyLoader`]. The universe interns
//! every type (definitions, constructed generics, arrays, references,
//! pointers and generic parameters) behind a [`TypeId`] so the stub emitter
//! can compare and hash type identities directly.

pub mod embedded_libs;
pub mod error;
pub mod loader;
pub mod manifest;
pub mod type_name;
pub mod types;
pub mod universe;

pub use error::{ModelError, Result};
pub use loader::{AssemblyLoader, LoadedAssembly, LoadedModel, from_manifests};
pub use manifest::AssemblyManifest;
pub use type_name::TypeName;
pub use types::{
    EnumValue, FieldDef, GenericOwner, GenericParam, MethodDef, MethodId, ParameterDef,
    PropertyDef, TypeCategory, TypeDef, TypeId, TypeKind, Variance, well_known,
};
pub use universe::TypeUniverse;

#[cfg(test)]
#[path = "../tests/type_name_tests.rs"]
mod type_name_tests;
#[cfg(test)]
#[path = "../tests/loader_tests.rs"]
mod loader_tests;
#[cfg(test)]
#[path = "../tests/universe_tests.rs"]
mod universe_tests;
