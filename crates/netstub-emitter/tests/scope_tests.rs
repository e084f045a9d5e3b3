use crate::{ClassScopeStack, SymbolScopeStack};
use netstub_model::TypeId;

#[test]
fn accessor_tracks_enclosing_frames() {
    let mut scopes = ClassScopeStack::new();
    assert_eq!(scopes.accessor(), "");

    let outer = scopes.enter("Outer_1", vec![TypeId(1)], true);
    let group = scopes.enter("Foo_MethodGroup", Vec::new(), false);
    assert_eq!(scopes.current().map(|f| f.outside_accessor.as_str()), Some("Outer_1."));
    assert_eq!(scopes.accessor(), "Outer_1.Foo_MethodGroup.");
    assert_eq!(scopes.current_name(), Some("Foo_MethodGroup"));

    scopes.leave(group);
    scopes.leave(outer);
    assert!(scopes.is_empty());
}

#[test]
fn accessible_generics_stop_at_nearest_shadowing_frame() {
    let mut scopes = ClassScopeStack::new();
    let a = scopes.enter("A", vec![TypeId(1)], true);
    let b = scopes.enter("B", Vec::new(), false);
    let c = scopes.enter("C", vec![TypeId(2)], false);
    assert_eq!(scopes.accessible_generics(), vec![TypeId(1), TypeId(2)]);

    let d = scopes.enter("D", vec![TypeId(3)], true);
    assert_eq!(
        scopes.accessible_generics(),
        vec![TypeId(3)],
        "A shadowing frame should hide outer generics"
    );

    scopes.leave(d);
    scopes.leave(c);
    scopes.leave(b);
    scopes.leave(a);
}

#[test]
fn scope_helper_pops_its_frame() {
    let mut scopes = ClassScopeStack::new();
    let depth = scopes.scope("Temp", Vec::new(), false, |inner| inner.depth());
    assert_eq!(depth, 1);
    assert_eq!(scopes.depth(), 0);
}

#[test]
#[should_panic(expected = "left out of order")]
fn leaving_outer_class_scope_first_panics() {
    let mut scopes = ClassScopeStack::new();
    let outer = scopes.enter("Outer", Vec::new(), true);
    let _inner = scopes.enter("Inner", Vec::new(), true);
    scopes.leave(outer);
}

#[test]
fn symbol_scope_conflicts_only_for_foreign_namespaces() {
    let mut symbols = SymbolScopeStack::new();
    let token = symbols.enter("Acme", ["Widget".to_string()]);

    assert!(symbols.has_conflict("Widget", "Other"));
    assert!(!symbols.has_conflict("Widget", "Acme"));
    assert!(!symbols.has_conflict("Gadget", "Other"));

    symbols.leave(token);
    assert!(!symbols.has_conflict("Widget", "Other"));
    assert_eq!(symbols.depth(), 0);
}

#[test]
#[should_panic(expected = "left out of order")]
fn leaving_outer_symbol_scope_first_panics() {
    let mut symbols = SymbolScopeStack::new();
    let outer = symbols.enter("Acme", Vec::new());
    let _inner = symbols.enter("Other", Vec::new());
    symbols.leave(outer);
}
