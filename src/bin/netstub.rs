#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use std::path::Path;

use netstub::cli::args::CliArgs;
use netstub::cli::config::resolve_config;
use netstub::cli::driver;
use netstub::cli::reporter::Reporter;
use netstub::cli::sink::DirectorySink;

fn main() -> Result<()> {
    // NETSTUB_LOG / RUST_LOG enable tracing; NETSTUB_LOG_FORMAT=tree|json|text.
    netstub::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let reporter = Reporter::new(!args.no_color && std::io::stderr().is_terminal());

    if let Err(err) = generate(&args, &cwd, &reporter) {
        eprintln!("{}", reporter.error(&err));
        std::process::exit(1);
    }
    Ok(())
}

fn generate(args: &CliArgs, cwd: &Path, reporter: &Reporter) -> Result<()> {
    let config = resolve_config(args, cwd)?;
    let mut sink = DirectorySink::new(&config.dest_path, &config.stub_file_name);
    let stdout = std::io::stdout();
    let mut console = stdout.lock();
    driver::run(&config, &mut sink, reporter, &mut console)?;
    Ok(())
}
