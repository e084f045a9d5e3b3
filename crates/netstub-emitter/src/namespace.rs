//! Namespace rendering and the emission worklist driver.
//!
//! A namespace is rendered as its top-level type groups, sorted by name,
//! followed by the import header. When the first pass imports the same
//! short name from several foreign namespaces, those names are reserved
//! per namespace and the body is rendered again with qualified references.

use crate::context::StubContext;
use crate::source_writer::SourceWriter;
use crate::type_names::clean_type_name;
use netstub_model::{TypeId, well_known};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use tracing::{debug, debug_span};

/// The rendered stub of one namespace pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceStub {
    pub namespace: String,
    pub source: String,
    /// Known types of the namespace at the time of rendering
    pub type_count: usize,
}

impl NamespaceStub {
    /// `A/B/__init__.pyi` for namespace `A.B`; `__init__.pyi` for the
    /// global namespace.
    pub fn relative_path(&self) -> PathBuf {
        let mut path = PathBuf::new();
        for segment in self.namespace.split('.').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push("__init__.pyi");
        path
    }
}

type TypeGroups = BTreeMap<String, Vec<TypeId>>;

impl<'u> StubContext<'u> {
    /// Pop the next dirty namespace and render it.
    pub fn next_namespace(&mut self) -> Option<NamespaceStub> {
        let (namespace, types) = self.pop_dirty_namespace()?;
        let source = self.render_namespace(&namespace, &types);
        Some(NamespaceStub {
            namespace,
            source,
            type_count: types.len(),
        })
    }

    /// Render every dirty namespace until the worklist is empty. A
    /// namespace re-dirtied by a later pass is rendered again; `emit`
    /// receives every pass.
    pub fn drain<E>(&mut self, mut emit: impl FnMut(NamespaceStub) -> Result<(), E>) -> Result<usize, E> {
        let mut passes = 0;
        while let Some(stub) = self.next_namespace() {
            passes += 1;
            emit(stub)?;
        }
        Ok(passes)
    }

    /// Render the complete stub text of `namespace`.
    pub fn render_namespace(&mut self, namespace: &str, types: &[TypeId]) -> String {
        let _span = debug_span!("render_namespace", namespace).entered();
        let groups = self.top_level_groups(types);
        let reserved = self.reserved_symbols(&groups);

        let mut body = self.render_body(namespace, &groups, &reserved, &BTreeMap::new());
        let ambiguous = self.ambiguous_imports(namespace, &reserved);
        if !ambiguous.is_empty() {
            debug!(namespace, ?ambiguous, "qualifying ambiguous foreign names");
            body = self.render_body(namespace, &groups, &reserved, &ambiguous);
        }

        let mut source = self.import_header(namespace, &body);
        source.push_str(&body);
        source
    }

    /// Visible top-level types grouped by non-generic name; each group is
    /// ordered by raw name.
    fn top_level_groups(&self, types: &[TypeId]) -> TypeGroups {
        let universe = self.universe;
        let mut groups = TypeGroups::new();
        for &ty in types {
            let Some(def) = universe.definition(ty) else {
                continue;
            };
            if def.declaring_type.is_some() || !universe.is_visible(ty) {
                continue;
            }
            groups.entry(def.non_generic_name().to_string()).or_default().push(ty);
        }
        for members in groups.values_mut() {
            members.sort_by(|&a, &b| universe.raw_name(a).cmp(&universe.raw_name(b)));
            members.dedup();
        }
        groups
    }

    /// Every name the namespace itself binds at file scope.
    fn reserved_symbols(&self, groups: &TypeGroups) -> BTreeSet<String> {
        let universe = self.universe;
        let mut reserved = BTreeSet::new();
        for (name, members) in groups {
            reserved.insert(name.clone());
            if members.iter().any(|&ty| universe.is_named(ty, well_known::ARRAY)) {
                reserved.extend(["Array_0", "Array_1", "Array_GenericClasses"].map(String::from));
                continue;
            }
            for &ty in members {
                reserved.insert(clean_type_name(universe, ty));
            }
            let is_family = members.len() > 1 || members.iter().any(|&ty| universe.is_generic_type_definition(ty));
            if is_family {
                reserved.insert(format!("{name}_0"));
                reserved.insert(format!("{name}_GenericClasses"));
            }
        }
        reserved
    }

    /// Short names the last pass imported from two or more foreign
    /// namespaces, keyed by namespace.
    fn ambiguous_imports(
        &self,
        namespace: &str,
        reserved: &BTreeSet<String>,
    ) -> BTreeMap<String, BTreeSet<String>> {
        let universe = self.universe;
        let mut sources: BTreeMap<String, BTreeSet<&str>> = BTreeMap::new();
        for &ty in self.deps.current_types() {
            let ns = universe.namespace_of(ty);
            if ns == namespace || ns.is_empty() {
                continue;
            }
            let name = clean_type_name(universe, universe.root_type(ty));
            sources.entry(name).or_default().insert(ns);
        }
        let mut ambiguous: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (name, namespaces) in sources {
            if namespaces.len() < 2 || reserved.contains(&name) {
                continue;
            }
            for ns in namespaces {
                ambiguous.entry(ns.to_string()).or_default().insert(name.clone());
            }
        }
        ambiguous
    }

    fn render_body(
        &mut self,
        namespace: &str,
        groups: &TypeGroups,
        reserved: &BTreeSet<String>,
        foreign: &BTreeMap<String, BTreeSet<String>>,
    ) -> String {
        self.deps.clear_current();
        let mut tokens = Vec::with_capacity(foreign.len() + 1);
        for (ns, names) in foreign {
            tokens.push(self.symbol_scopes.enter(ns.clone(), names.iter().cloned()));
        }
        tokens.push(self.symbol_scopes.enter(namespace, reserved.iter().cloned()));

        let mut out = SourceWriter::with_capacity(4096);
        for (name, members) in groups {
            self.write_type_group(&mut out, name, members);
        }

        while let Some(token) = tokens.pop() {
            self.symbol_scopes.leave(token);
        }
        out.into_string()
    }
}
