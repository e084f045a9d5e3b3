//! The import header prepended to a rendered namespace.

use crate::context::StubContext;
use crate::source_writer::SourceWriter;
use crate::type_names::clean_type_name;
use netstub_model::well_known;
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

/// Utility modules imported only when the body uses them.
const UTILITY_MODULES: [&str; 3] = ["typing", "clr", "abc"];

impl<'u> StubContext<'u> {
    /// Imports for `body`, computed from the per-pass dependency sets:
    /// utility modules, whole namespaces used qualified, and one
    /// `from ... import ...` line per foreign namespace, all sorted. Types of
    /// the global namespace cannot be imported and get a comment instead.
    pub fn import_header(&self, namespace: &str, body: &str) -> String {
        let universe = self.universe;
        let mut header = SourceWriter::with_capacity(256);

        let utilities: Vec<&str> = UTILITY_MODULES
            .into_iter()
            .filter(|module| body.contains(&format!("{module}.")))
            .collect();
        if !utilities.is_empty() {
            header.line(&format!("import {}", utilities.join(", ")));
        }

        let qualified: BTreeSet<&str> = self
            .deps
            .current_namespaces()
            .iter()
            .map(String::as_str)
            .filter(|ns| *ns != namespace && !ns.is_empty())
            .collect();
        for ns in qualified {
            header.line(&format!("import {ns}"));
        }

        let mut imports: BTreeMap<&str, BTreeSet<String>> = BTreeMap::new();
        let mut unimportable = BTreeSet::new();
        for &ty in self.deps.current_types() {
            let ns = universe.namespace_of(ty);
            if ns == namespace {
                continue;
            }
            if ns.is_empty() {
                warn!(ty = %universe.display_name(ty), "types in the global namespace cannot be imported");
                unimportable.insert(clean_type_name(universe, universe.root_type(ty)));
                continue;
            }
            let root = universe.root_type(ty);
            let names = imports.entry(ns).or_default();
            if universe.is_named(root, well_known::ARRAY) {
                if self.deps.used_base_array() {
                    names.insert("Array".to_string());
                }
                if self.deps.used_generic_array() {
                    names.insert("Array_1".to_string());
                }
                continue;
            }
            let name = clean_type_name(universe, root);
            if self.is_overloaded_non_generic(root) {
                names.insert(format!("{name}_0"));
            }
            names.insert(name);
        }
        for (ns, names) in imports {
            if names.is_empty() {
                continue;
            }
            let names: Vec<String> = names.into_iter().collect();
            header.line(&format!("from {ns} import {}", names.join(", ")));
        }
        for name in unimportable {
            header.line(&format!("# {name} is in the global namespace and cannot be imported"));
        }
        header.into_string()
    }
}
