//! `netstub.json` project files and their merge with CLI arguments.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::args::CliArgs;

pub const DEFAULT_STUB_FILE_NAME: &str = "__init__.pyi";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    #[serde(default)]
    pub out_dir: Option<PathBuf>,
    #[serde(default)]
    pub assemblies: Vec<PathBuf>,
    #[serde(default)]
    pub search_paths: Vec<PathBuf>,
    #[serde(default)]
    pub stub_file_name: Option<String>,
}

/// Everything the driver needs, with every path absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub dest_path: PathBuf,
    pub assemblies: Vec<PathBuf>,
    pub search_paths: Vec<PathBuf>,
    pub stub_file_name: String,
}

pub fn parse_project(source: &str) -> Result<ProjectConfig> {
    serde_json::from_str(source).context("failed to parse project JSON")
}

/// Load a project file, resolving its relative paths against the
/// directory containing it.
pub fn load_project(path: &Path) -> Result<ProjectConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read project file: {}", path.display()))?;
    let mut config =
        parse_project(&source).with_context(|| format!("failed to parse project file: {}", path.display()))?;

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    config.out_dir = config.out_dir.map(|dir| base.join(dir));
    config.assemblies = config.assemblies.iter().map(|p| base.join(p)).collect();
    config.search_paths = config.search_paths.iter().map(|p| base.join(p)).collect();
    Ok(config)
}

/// Merge the optional project file with CLI arguments. CLI values win;
/// relative CLI paths resolve against `cwd`.
pub fn resolve_config(args: &CliArgs, cwd: &Path) -> Result<ResolvedConfig> {
    let project = match &args.project {
        Some(path) => load_project(&cwd.join(path))?,
        None => ProjectConfig::default(),
    };

    let dest_path = match (&args.dest_path, project.out_dir) {
        (Some(dest), _) => cwd.join(dest),
        (None, Some(out_dir)) => out_dir,
        (None, None) => bail!("no destination directory given: pass --dest-path or set outDir in netstub.json"),
    };

    let assemblies: Vec<PathBuf> = if args.target_dlls.is_empty() {
        project.assemblies
    } else {
        args.target_dlls.iter().map(|p| cwd.join(p)).collect()
    };
    if assemblies.is_empty() {
        bail!("no target assemblies given: pass --target-dlls or list assemblies in netstub.json");
    }

    let search_paths = if args.search_paths.is_empty() {
        project.search_paths
    } else {
        args.search_paths.iter().map(|p| cwd.join(p)).collect()
    };

    let stub_file_name = args
        .file_name
        .clone()
        .or(project.stub_file_name)
        .unwrap_or_else(|| DEFAULT_STUB_FILE_NAME.to_string());

    Ok(ResolvedConfig {
        dest_path,
        assemblies,
        search_paths,
        stub_file_name,
    })
}
