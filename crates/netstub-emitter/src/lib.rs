//! Python stub emission for the netstub object model.
//!
//! [`StubContext`] drives the whole projection: types registered with it
//! are emitted namespace by namespace, and every type a rendered stub
//! references is registered in turn until no namespace is dirty.
//!
//! ```text
//! register(ty) -> dirty namespace -> render_namespace -> resolve(...) -> register(...)
//! ```

pub mod context;
pub mod dependencies;
pub mod imports;
pub mod namespace;
pub mod overloads;
pub mod scope;
pub mod source_writer;
pub mod specificity;
pub mod stub_writer;
pub mod type_names;

pub use context::StubContext;
pub use dependencies::{DependencyStats, DependencyTracker};
pub use namespace::NamespaceStub;
pub use overloads::{OverloadEntry, OverloadGroup, operator_name};
pub use scope::{ClassFrame, ClassScopeStack, ScopeToken, SymbolFrame, SymbolScopeStack};
pub use source_writer::SourceWriter;
pub use specificity::{Specificity, SpecificityCache};
pub use type_names::{clean_method_name, clean_type_name, primitive_name, safe_python_name};

#[cfg(test)]
#[path = "../tests/test_support.rs"]
mod test_support;
#[cfg(test)]
#[path = "../tests/scope_tests.rs"]
mod scope_tests;
#[cfg(test)]
#[path = "../tests/type_names_tests.rs"]
mod type_names_tests;
#[cfg(test)]
#[path = "../tests/specificity_tests.rs"]
mod specificity_tests;
#[cfg(test)]
#[path = "../tests/stub_writer_tests.rs"]
mod stub_writer_tests;
#[cfg(test)]
#[path = "../tests/namespace_tests.rs"]
mod namespace_tests;
