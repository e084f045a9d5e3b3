//! Dependency Tracker and Namespace Worklist
//!
//! Records every type referenced while emitting stubs and drives the
//! fixpoint loop over namespaces:
//! - `register` adds a type to the global known set; a type seen for the
//!   first time marks its namespace dirty
//! - `pop_dirty` hands out one dirty namespace together with the complete
//!   set of known types for it, so the namespace is regenerated in full
//! - the per-pass sets (`current_types`, `current_namespaces` and the two
//!   array flags) collect what the namespace being rendered imports

use indexmap::IndexSet;
use netstub_model::{TypeId, TypeUniverse, well_known};
use std::collections::BTreeSet;
use tracing::trace;

/// Counters describing the worklist state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DependencyStats {
    /// Types registered so far
    pub known_types: usize,
    /// Namespaces waiting for (re)emission
    pub dirty_namespaces: usize,
    /// Namespaces handed out by `pop_dirty`
    pub passes: usize,
}

#[derive(Debug, Default)]
pub struct DependencyTracker {
    /// Every type registered during the run, in registration order
    known: IndexSet<TypeId>,
    /// Namespaces awaiting emission; ordered so popping is deterministic
    dirty: BTreeSet<String>,
    /// Types referenced unqualified by the namespace being rendered
    current_types: IndexSet<TypeId>,
    /// Namespaces referenced in qualified form by the namespace being rendered
    current_namespaces: IndexSet<String>,
    used_base_array: bool,
    used_generic_array: bool,
    passes: usize,
}

impl DependencyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type reference from the namespace being rendered.
    ///
    /// Returns true when the type had not been seen before.
    pub fn register(&mut self, universe: &TypeUniverse, ty: TypeId) -> bool {
        let is_new = self.register_global(universe, ty);
        if !universe.is_named(ty, well_known::NULLABLE) {
            self.current_types.insert(ty);
        }
        is_new
    }

    /// Register a type for emission without adding it to the import set.
    ///
    /// Used for references that are written namespace-qualified.
    pub fn register_global(&mut self, universe: &TypeUniverse, ty: TypeId) -> bool {
        let is_new = self.known.insert(ty);
        if is_new {
            let namespace = universe.namespace_of(ty);
            trace!(ty = %universe.display_name(ty), namespace, "registered type");
            self.dirty.insert(namespace.to_string());
        }
        is_new
    }

    /// Record a use of `System.Array` (`generic == false`) or of the
    /// generic `Array_1` form.
    pub fn register_array(&mut self, universe: &TypeUniverse, generic: bool) {
        if let Some(array) = universe.lookup(well_known::ARRAY) {
            self.register(universe, array);
        }
        if generic {
            self.used_generic_array = true;
        } else {
            self.used_base_array = true;
        }
    }

    pub fn register_namespace(&mut self, namespace: &str) {
        if !self.current_namespaces.contains(namespace) {
            self.current_namespaces.insert(namespace.to_string());
        }
    }

    /// Remove one dirty namespace and return it with every known type
    /// belonging to it.
    pub fn pop_dirty(&mut self, universe: &TypeUniverse) -> Option<(String, Vec<TypeId>)> {
        let namespace = self.dirty.pop_first()?;
        let types = self
            .known
            .iter()
            .copied()
            .filter(|&ty| universe.namespace_of(ty) == namespace)
            .collect();
        self.passes += 1;
        Some((namespace, types))
    }

    /// Reset the per-pass dependency sets before rendering a namespace.
    pub fn clear_current(&mut self) {
        self.current_types.clear();
        self.current_namespaces.clear();
        self.used_base_array = false;
        self.used_generic_array = false;
    }

    pub fn is_known(&self, ty: TypeId) -> bool {
        self.known.contains(&ty)
    }

    pub fn current_types(&self) -> &IndexSet<TypeId> {
        &self.current_types
    }

    pub fn current_namespaces(&self) -> &IndexSet<String> {
        &self.current_namespaces
    }

    pub const fn used_base_array(&self) -> bool {
        self.used_base_array
    }

    pub const fn used_generic_array(&self) -> bool {
        self.used_generic_array
    }

    pub fn stats(&self) -> DependencyStats {
        DependencyStats {
            known_types: self.known.len(),
            dirty_namespaces: self.dirty.len(),
            passes: self.passes,
        }
    }
}
