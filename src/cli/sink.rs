//! Destinations for rendered namespace stubs.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::info;

pub trait StubSink {
    /// Store the stub of `namespace`, replacing any earlier version.
    fn write_stub(&mut self, namespace: &str, source: &str) -> Result<()>;
}

/// Writes `A.B.C` to `<root>/A/B/C/<file name>`; the global namespace
/// goes to `<root>/<file name>`.
pub struct DirectorySink {
    root: PathBuf,
    file_name: String,
    writes: usize,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            file_name: file_name.into(),
            writes: 0,
        }
    }

    pub fn path_for(&self, namespace: &str) -> PathBuf {
        let mut path = self.root.clone();
        for segment in namespace.split('.').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(&self.file_name);
        path
    }

    /// Number of files written, rewrites included.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl StubSink for DirectorySink {
    fn write_stub(&mut self, namespace: &str, source: &str) -> Result<()> {
        let path = self.path_for(namespace);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory: {}", parent.display()))?;
        }
        std::fs::write(&path, source).with_context(|| format!("failed to write stub: {}", path.display()))?;
        self.writes += 1;
        info!(namespace, path = %path.display(), "wrote stub");
        Ok(())
    }
}

/// Keeps the latest stub of each namespace in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    stubs: BTreeMap<String, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, namespace: &str) -> Option<&str> {
        self.stubs.get(namespace).map(String::as_str)
    }

    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.stubs.keys().map(String::as_str)
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.stubs
    }
}

impl StubSink for MemorySink {
    fn write_stub(&mut self, namespace: &str, source: &str) -> Result<()> {
        self.stubs.insert(namespace.to_string(), source.to_string());
        Ok(())
    }
}
