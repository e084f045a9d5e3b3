//! The explicit emission context threaded through every rendering call.
//!
//! `StubContext` owns all mutable engine state for a run: the dependency
//! tracker and worklist, both scope stacks and the memoized depth caches.
//! Rendering is implemented in further `impl StubContext` blocks across
//! the crate (`type_names`, `overloads`, `stub_writer`, `namespace`).

use crate::dependencies::{DependencyStats, DependencyTracker};
use crate::scope::{ClassScopeStack, SymbolScopeStack};
use crate::source_writer::SourceWriter;
use crate::specificity::SpecificityCache;
use netstub_model::{TypeDef, TypeId, TypeUniverse};
use rustc_hash::{FxHashMap, FxHashSet};

pub struct StubContext<'u> {
    pub(crate) universe: &'u TypeUniverse,
    pub(crate) deps: DependencyTracker,
    pub(crate) class_scopes: ClassScopeStack,
    pub(crate) symbol_scopes: SymbolScopeStack,
    pub(crate) specificity: SpecificityCache,
    pub(crate) interface_depths: FxHashMap<TypeId, u32>,
    /// `(declaring type, namespace, non-generic name)` of every visible
    /// generic definition. A non-generic sibling of one of these is emitted
    /// as `Name_0`.
    pub(crate) generic_families: FxHashSet<FamilyKey>,
}

pub(crate) type FamilyKey = (Option<TypeId>, String, String);

impl<'u> StubContext<'u> {
    pub fn new(universe: &'u TypeUniverse) -> Self {
        Self {
            universe,
            deps: DependencyTracker::new(),
            class_scopes: ClassScopeStack::new(),
            symbol_scopes: SymbolScopeStack::new(),
            specificity: SpecificityCache::default(),
            interface_depths: FxHashMap::default(),
            generic_families: universe
                .definitions()
                .filter(|&(id, def)| def.is_generic() && universe.is_visible(id))
                .map(|(_, def)| family_key(def))
                .collect(),
        }
    }

    /// True for a visible non-generic definition that shares its name with
    /// a generic definition in the same namespace (or the same declaring
    /// type, for nested types).
    pub fn is_overloaded_non_generic(&self, ty: TypeId) -> bool {
        match self.universe.definition(ty) {
            Some(def) if !def.is_generic() && self.universe.is_visible(ty) => {
                self.generic_families.contains(&family_key(def))
            }
            _ => false,
        }
    }

    pub fn universe(&self) -> &'u TypeUniverse {
        self.universe
    }

    /// Register a type for emission (and for the current import set).
    pub fn register(&mut self, ty: TypeId) -> bool {
        self.deps.register(self.universe, ty)
    }

    /// Next namespace to (re)emit with its complete known type set.
    pub fn pop_dirty_namespace(&mut self) -> Option<(String, Vec<TypeId>)> {
        self.deps.pop_dirty(self.universe)
    }

    pub fn clear_current(&mut self) {
        self.deps.clear_current();
    }

    pub fn dependencies(&self) -> &DependencyTracker {
        &self.deps
    }

    pub fn stats(&self) -> DependencyStats {
        self.deps.stats()
    }

    pub fn class_scopes(&self) -> &ClassScopeStack {
        &self.class_scopes
    }

    pub fn class_scopes_mut(&mut self) -> &mut ClassScopeStack {
        &mut self.class_scopes
    }

    pub fn symbol_scopes_mut(&mut self) -> &mut SymbolScopeStack {
        &mut self.symbol_scopes
    }

    /// Render a class body inside a pushed class frame. The writer's
    /// indentation is restored when the frame is left.
    pub(crate) fn in_class_scope<T>(
        &mut self,
        out: &mut SourceWriter,
        name: &str,
        generics: Vec<TypeId>,
        shadow: bool,
        body: impl FnOnce(&mut Self, &mut SourceWriter) -> T,
    ) -> T {
        let indent = out.indent_level();
        let token = self.class_scopes.enter(name, generics, shadow);
        let result = body(self, out);
        self.class_scopes.leave(token);
        out.set_indent_level(indent);
        result
    }
}

fn family_key(def: &TypeDef) -> FamilyKey {
    (
        def.declaring_type,
        def.namespace.clone(),
        def.non_generic_name().to_string(),
    )
}
