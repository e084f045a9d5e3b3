use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the netstub binary.
#[derive(Parser, Debug)]
#[command(
    name = "netstub",
    version,
    about = "Generate Python interface stubs (.pyi) for .NET assemblies"
)]
pub struct CliArgs {
    /// Directory the stub packages are written to.
    #[arg(short = 'o', long = "dest-path", alias = "destPath")]
    pub dest_path: Option<PathBuf>,

    /// Assembly manifests to generate stubs for (comma separated).
    #[arg(long = "target-dlls", alias = "targetDlls", value_delimiter = ',')]
    pub target_dlls: Vec<PathBuf>,

    /// Extra directories searched for referenced assemblies (comma separated).
    #[arg(long = "search-paths", alias = "searchPaths", value_delimiter = ',')]
    pub search_paths: Vec<PathBuf>,

    /// Path to a netstub.json project file.
    #[arg(short = 'p', long = "project")]
    pub project: Option<PathBuf>,

    /// File name of each generated stub.
    #[arg(long = "file-name")]
    pub file_name: Option<String>,

    /// Disable colored error output.
    #[arg(long = "no-color")]
    pub no_color: bool,
}
