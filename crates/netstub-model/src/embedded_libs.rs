//! Embedded core library manifest.
//!
//! The core library declares the runtime types every assembly implicitly
//! depends on (`System.Object`, primitives, `System.Array`, the collection
//! interfaces). It is compiled into the binary and always loaded first.

use crate::error::Result;
use crate::manifest::AssemblyManifest;

pub const CORE_LIBRARY_NAME: &str = "System.Private.CoreLib";

/// Reference names satisfied by the embedded core library when no manifest
/// with that name is found on the search paths.
pub const CORE_FACADES: &[&str] = &["mscorlib", "netstandard", "System.Runtime"];

pub const CORE_LIBRARY_JSON: &str = include_str!("../core/System.Private.CoreLib.json");

pub fn core_library_manifest() -> Result<AssemblyManifest> {
    AssemblyManifest::from_json(CORE_LIBRARY_JSON, CORE_LIBRARY_NAME)
}
