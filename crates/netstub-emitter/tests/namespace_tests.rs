use crate::test_support::{generate, load, stub_of};
use crate::{NamespaceStub, StubContext};
use netstub_model::LoadedModel;
use serde_json::json;
use std::path::PathBuf;

fn widgets() -> LoadedModel {
    load([
        json!({ "name": "Alpha", "types": [{ "name": "Alpha.Widget" }] }),
        json!({ "name": "Beta", "types": [{ "name": "Beta.Widget" }] }),
        json!({
            "name": "Gamma",
            "types": [{
                "name": "Gamma.Panel",
                "fields": [
                    { "name": "a", "type": "Alpha.Widget" },
                    { "name": "b", "type": "Beta.Widget" }
                ]
            }]
        }),
    ])
}

#[test]
fn ambiguous_foreign_names_are_qualified() {
    let model = widgets();
    let stubs = generate(&model, "Gamma");

    assert_eq!(
        stub_of(&stubs, "Gamma"),
        "import Alpha\nimport Beta\n\nclass Panel:\n    a : Alpha.Widget\n    b : Beta.Widget\n\n"
    );
}

#[test]
fn only_reachable_namespaces_are_emitted() {
    let model = widgets();
    let stubs = generate(&model, "Gamma");

    let namespaces: Vec<&str> = stubs.keys().map(String::as_str).collect();
    assert_eq!(namespaces, ["Alpha", "Beta", "Gamma"]);
    assert_eq!(stub_of(&stubs, "Alpha"), "\nclass Widget:\n    pass\n\n");
}

#[test]
fn local_names_force_qualification_of_foreign_ones() {
    let model = load([
        json!({ "name": "Alpha", "types": [{ "name": "Alpha.Widget" }] }),
        json!({
            "name": "Gamma",
            "types": [
                { "name": "Gamma.Widget" },
                { "name": "Gamma.Panel", "fields": [{ "name": "a", "type": "Alpha.Widget" }, { "name": "b", "type": "Gamma.Widget" }] }
            ]
        }),
    ]);
    let stubs = generate(&model, "Gamma");
    let gamma = stub_of(&stubs, "Gamma");

    assert!(gamma.starts_with("import Alpha\n\n"), "Unexpected header:\n{gamma}");
    assert!(gamma.contains("    a : Alpha.Widget\n    b : Widget\n"));
    assert!(!gamma.contains("from Alpha import"));
}

#[test]
fn import_header_lists_foreign_names_sorted() {
    let model = load([json!({
        "name": "Acme",
        "types": [
            {
                "name": "Acme.Holder",
                "fields": [
                    { "name": "items", "type": "System.Collections.Generic.List`1[Acme.Item]" },
                    { "name": "values", "type": "System.Int32[]" }
                ]
            },
            { "name": "Acme.Item" }
        ]
    })]);
    let stubs = generate(&model, "Acme");
    let acme = stub_of(&stubs, "Acme");

    assert!(
        acme.starts_with("from System import Array_1\nfrom System.Collections.Generic import List_1\n\n"),
        "Unexpected header:\n{acme}"
    );
    assert!(acme.contains("    items : List_1[Item]\n    values : Array_1[int]\n"));
}

#[test]
fn global_namespace_references_are_marked_in_the_header() {
    let model = load([json!({
        "name": "Acme",
        "types": [
            { "name": "Loose" },
            { "name": "Acme.User", "fields": [{ "name": "helper", "type": "Loose" }] }
        ]
    })]);
    let stubs = generate(&model, "Acme");
    let acme = stub_of(&stubs, "Acme");

    assert!(
        acme.starts_with("# Loose is in the global namespace and cannot be imported\n"),
        "Unexpected header:\n{acme}"
    );
    assert!(acme.contains("    helper : Loose\n"));
    assert!(stub_of(&stubs, "").contains("class Loose:"));
}

#[test]
fn system_array_is_written_from_its_template() {
    let model = load([json!({
        "name": "Acme",
        "types": [{ "name": "Acme.Holder", "fields": [{ "name": "values", "type": "System.Int32[]" }] }]
    })]);
    let stubs = generate(&model, "Acme");
    let system = stub_of(&stubs, "System");

    assert!(system.contains("class Array_GenericClasses(abc.ABCMeta):\n"));
    assert!(system.contains("class Array(Array_0, metaclass=Array_GenericClasses): ...\n"));
    assert!(system.contains("Array_1_T = typing.TypeVar('Array_1_T', covariant=True)\nclass Array_1(Array_0, typing.Generic[Array_1_T]):...\n"));
    assert!(system.contains("\nclass Array_0("));
}

#[test]
fn generation_is_deterministic() {
    let model = widgets();
    let first = generate(&model, "Gamma");
    let second = generate(&model, "Gamma");
    assert_eq!(first, second);

    let other = widgets();
    assert_eq!(generate(&other, "Gamma"), first, "Independent loads produce the same stubs");
}

#[test]
fn drain_reports_every_pass() {
    let model = widgets();
    let mut ctx = StubContext::new(&model.universe);
    for ty in model.exported_types("Gamma") {
        assert!(ctx.register(ty));
    }
    assert_eq!(ctx.stats().dirty_namespaces, 1);

    let mut seen = Vec::new();
    let passes = ctx
        .drain(|stub| {
            seen.push(stub.namespace);
            Ok::<(), String>(())
        })
        .expect("drain should succeed");

    assert_eq!(passes, 3);
    assert_eq!(seen, ["Gamma", "Alpha", "Beta"]);
    let stats = ctx.stats();
    assert_eq!(stats.dirty_namespaces, 0);
    assert_eq!(stats.passes, 3);
    assert_eq!(stats.known_types, 3);
}

#[test]
fn drain_stops_at_the_first_error() {
    let model = widgets();
    let mut ctx = StubContext::new(&model.universe);
    for ty in model.exported_types("Gamma") {
        ctx.register(ty);
    }
    let result = ctx.drain(|stub| Err(format!("cannot write {}", stub.namespace)));
    assert_eq!(result, Err("cannot write Gamma".to_string()));
}

#[test]
fn namespaces_map_to_package_paths() {
    let stub = |namespace: &str| NamespaceStub {
        namespace: namespace.to_string(),
        source: String::new(),
        type_count: 0,
    };
    assert_eq!(
        stub("System.Collections.Generic").relative_path(),
        PathBuf::from("System/Collections/Generic/__init__.pyi")
    );
    assert_eq!(stub("").relative_path(), PathBuf::from("__init__.pyi"));
}
