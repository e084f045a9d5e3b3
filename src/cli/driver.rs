//! End-to-end generation: load manifests, register exported types and
//! drain the emission worklist into a sink.

use anyhow::{Context, Result};
use netstub_emitter::StubContext;
use netstub_model::AssemblyLoader;
use netstub_model::embedded_libs::CORE_LIBRARY_NAME;
use rustc_hash::FxHashSet;
use std::collections::BTreeSet;
use std::io::Write;
use tracing::{debug, info, info_span};

use super::config::ResolvedConfig;
use super::reporter::Reporter;
use super::sink::StubSink;

/// Outcome of one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateSummary {
    /// Assemblies whose exported types seeded the run, core library first.
    pub assemblies: Vec<String>,
    /// Distinct namespaces written.
    pub namespaces: BTreeSet<String>,
    /// Namespace renders, rewrites included.
    pub passes: usize,
    /// Types known to the emitter when the worklist emptied.
    pub types: usize,
}

pub fn run(
    config: &ResolvedConfig,
    sink: &mut dyn StubSink,
    reporter: &Reporter,
    console: &mut dyn Write,
) -> Result<GenerateSummary> {
    let _span = info_span!("generate", dest = %config.dest_path.display()).entered();

    let mut loader = AssemblyLoader::with_core_library().context("failed to load the embedded core library")?;
    for path in &config.search_paths {
        writeln!(console, "{}", reporter.search_path(path))?;
        loader.add_search_path(path);
    }

    writeln!(console, "{}", reporter.building())?;
    let mut seen = FxHashSet::default();
    let mut targets = Vec::with_capacity(config.assemblies.len());
    for path in &config.assemblies {
        let name = loader
            .load_file(path)
            .with_context(|| format!("failed to load assembly manifest: {}", path.display()))?;
        if name != CORE_LIBRARY_NAME && seen.insert(name.clone()) {
            targets.push(name);
        }
    }
    let model = loader.build().context("failed to build the type model")?;

    let mut ctx = StubContext::new(&model.universe);
    let mut summary = GenerateSummary::default();
    let seeds = std::iter::once((CORE_LIBRARY_NAME.to_string(), true)).chain(targets.into_iter().map(|t| (t, false)));
    for (assembly, built_in) in seeds {
        writeln!(console, "{}", reporter.generating_assembly(&assembly, built_in))?;
        let exported = model.exported_types(&assembly);
        info!(assembly = %assembly, types = exported.len(), "registering exported types");
        for ty in exported {
            ctx.register(ty);
        }
        summary.assemblies.push(assembly);
    }

    let passes = ctx.drain(|stub| -> Result<()> {
        debug!(namespace = %stub.namespace, types = stub.type_count, "rendered namespace");
        sink.write_stub(&stub.namespace, &stub.source)
            .with_context(|| format!("failed to save stub for namespace '{}'", stub.namespace))?;
        summary.namespaces.insert(stub.namespace);
        Ok(())
    })?;
    summary.passes = passes;
    summary.types = ctx.stats().known_types;

    info!(
        namespaces = summary.namespaces.len(),
        passes = summary.passes,
        "stub generation finished"
    );
    writeln!(console, "{}", reporter.saved(&config.dest_path))?;
    Ok(summary)
}
