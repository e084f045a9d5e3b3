//! Emitter benchmark
//!
//! Measures stub rendering over synthetic assemblies with many types and
//! heavily overloaded members.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use netstub::emitter::StubContext;
use netstub::model::{AssemblyManifest, LoadedModel, from_manifests};
use serde_json::{Value, json};
use std::convert::Infallible;

const PARAM_TYPES: [&str; 6] = [
    "System.Int32",
    "System.String",
    "System.Double",
    "System.Object",
    "System.Char",
    "System.Boolean",
];

/// `types` classes spread over four namespaces, each with `overloads`
/// overloads of `Process` and a generic sibling every fifth type.
fn synthetic_manifest(types: usize, overloads: usize) -> Value {
    let mut records = Vec::new();
    for i in 0..types {
        let namespace = format!("Bench.Ns{}", i % 4);
        let methods: Vec<Value> = (0..overloads)
            .map(|j| {
                json!({
                    "name": "Process",
                    "parameters": [
                        { "name": "a", "type": PARAM_TYPES[j % PARAM_TYPES.len()] },
                        { "name": "b", "type": PARAM_TYPES[(j / PARAM_TYPES.len()) % PARAM_TYPES.len()] }
                    ],
                    "returnType": "System.String"
                })
            })
            .collect();
        let base = if i >= 4 {
            format!("Bench.Ns{}.Type{}", (i - 4) % 4, i - 4)
        } else {
            "System.Object".to_string()
        };
        records.push(json!({
            "name": format!("{namespace}.Type{i}"),
            "base": base,
            "properties": [{ "name": "Count", "type": "System.Int32" }],
            "methods": methods
        }));
        if i % 5 == 0 {
            records.push(json!({
                "name": format!("{namespace}.Type{i}`1"),
                "genericParams": [{ "name": "T" }],
                "methods": [{ "name": "Get", "returnType": "T" }]
            }));
        }
    }
    json!({ "name": "Bench", "types": records })
}

fn load(types: usize, overloads: usize) -> LoadedModel {
    let manifest: AssemblyManifest =
        serde_json::from_value(synthetic_manifest(types, overloads)).expect("bench manifest");
    from_manifests([manifest]).expect("bench model")
}

fn emit_all(model: &LoadedModel) -> usize {
    let mut ctx = StubContext::new(&model.universe);
    for ty in model.exported_types("Bench") {
        ctx.register(ty);
    }
    let mut bytes = 0;
    ctx.drain(|stub| {
        bytes += stub.source.len();
        Ok::<(), Infallible>(())
    })
    .expect("infallible");
    bytes
}

/// Benchmark: full emission over growing assemblies
fn bench_emit_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("emitter_scaling");
    for &(types, overloads) in &[(20, 4), (100, 8), (400, 12)] {
        let model = load(types, overloads);
        let bytes = emit_all(&model) as u64;
        group.throughput(Throughput::Bytes(bytes));
        group.bench_with_input(
            BenchmarkId::new("emit", format!("{types}types_{overloads}overloads")),
            &model,
            |b, model| b.iter(|| black_box(emit_all(model))),
        );
    }
    group.finish();
}

/// Benchmark: manifest loading and universe finalization
fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("model_load");
    let manifest = synthetic_manifest(200, 8);
    group.bench_function("load_200_types", |b| {
        b.iter(|| {
            let manifest: AssemblyManifest = serde_json::from_value(manifest.clone()).expect("bench manifest");
            black_box(from_manifests([manifest]).expect("bench model"))
        })
    });
    group.finish();
}

criterion_group!(benches, bench_emit_scaling, bench_load);
criterion_main!(benches);
