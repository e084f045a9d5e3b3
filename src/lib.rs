//! netstub: Python interface stubs for .NET assemblies.
//!
//! The object model lives in `netstub-model` and the stub projection in
//! `netstub-emitter`; this crate adds logging setup and the command-line
//! front end that ties them to the filesystem.

pub use netstub_emitter as emitter;
pub use netstub_model as model;

pub mod tracing_config;

#[cfg(feature = "cli")]
pub mod cli;
