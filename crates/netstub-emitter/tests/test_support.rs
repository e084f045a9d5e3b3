use crate::StubContext;
use netstub_model::{AssemblyManifest, LoadedModel, from_manifests};
use std::collections::BTreeMap;
use std::convert::Infallible;

pub(crate) fn manifest(value: serde_json::Value) -> AssemblyManifest {
    serde_json::from_value(value).expect("test manifest should deserialize")
}

pub(crate) fn load(values: impl IntoIterator<Item = serde_json::Value>) -> LoadedModel {
    from_manifests(values.into_iter().map(manifest)).expect("test model should load")
}

/// Emit stubs for every exported type of `assembly` and everything they
/// reach. Returns the final source of each namespace.
pub(crate) fn generate(model: &LoadedModel, assembly: &str) -> BTreeMap<String, String> {
    let mut ctx = StubContext::new(&model.universe);
    for ty in model.exported_types(assembly) {
        ctx.register(ty);
    }
    let mut stubs = BTreeMap::new();
    ctx.drain(|stub| {
        stubs.insert(stub.namespace, stub.source);
        Ok::<(), Infallible>(())
    })
    .expect("drain is infallible here");
    stubs
}

pub(crate) fn stub_of<'a>(stubs: &'a BTreeMap<String, String>, namespace: &str) -> &'a str {
    stubs
        .get(namespace)
        .unwrap_or_else(|| panic!("Expected a stub for namespace {namespace}, got {:?}", stubs.keys()))
}
