//! Errors raised while loading assembly manifests into a [`TypeUniverse`].
//!
//! [`TypeUniverse`]: crate::TypeUniverse

use std::path::PathBuf;

/// Errors that can occur while reading manifests or building the type universe.
///
/// Every variant is fatal for a generation run: the driver reports it and
/// exits without writing partial output.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// A manifest file could not be read.
    #[error("failed to read manifest '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A manifest file is not valid JSON or does not match the manifest schema.
    #[error("malformed manifest '{origin}': {source}")]
    Manifest {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// A referenced assembly could not be located in any search path.
    #[error("could not resolve assembly '{name}' referenced by '{referenced_by}'")]
    UnresolvedAssembly { name: String, referenced_by: String },

    /// A type-name string does not follow the type-name grammar.
    #[error("invalid type name '{text}' at offset {offset}: {message}")]
    TypeNameSyntax {
        text: String,
        offset: usize,
        message: &'static str,
    },

    /// A type name refers to a type that no loaded assembly declares.
    #[error("unknown type '{name}' referenced from '{context}'")]
    UnknownType { name: String, context: String },

    /// The same full type name was declared twice.
    #[error("type '{0}' is declared more than once")]
    DuplicateType(String),

    /// A generic type was used (or declared) with the wrong number of arguments.
    #[error("type '{name}' expects {expected} generic argument(s) but {found} were given")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    /// A nested type names a declaring type that does not exist.
    #[error("nested type '{0}' has no declaring type in the same assembly set")]
    MissingDeclaringType(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
