use colored::Colorize;
use std::path::Path;

/// Formats console progress lines and the final error message.
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    pub fn search_path(&self, path: &Path) -> String {
        format!("search path {}", path.display())
    }

    pub fn building(&self) -> String {
        "building stubs...".to_string()
    }

    pub fn generating_assembly(&self, name: &str, built_in: bool) -> String {
        if built_in {
            format!("Generating Built-in Assembly: {name}")
        } else {
            format!("Generating Assembly: {name}")
        }
    }

    pub fn saved(&self, dest: &Path) -> String {
        format!("stubs saved to {}", dest.display())
    }

    /// `error: failed generating stubs | <cause chain>`
    pub fn error(&self, err: &anyhow::Error) -> String {
        let label = if self.color {
            "error:".red().bold().to_string()
        } else {
            "error:".to_string()
        };
        format!("{label} failed generating stubs | {err:#}")
    }
}
