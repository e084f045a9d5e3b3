//! End-to-end tests: manifests on disk in, a tree of `.pyi` packages out.

use netstub::cli::config::{DEFAULT_STUB_FILE_NAME, ResolvedConfig};
use netstub::cli::driver;
use netstub::cli::reporter::Reporter;
use netstub::cli::sink::DirectorySink;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::Command;
use walkdir::WalkDir;

const ACME: &str = r#"{
    "name": "Acme",
    "types": [
        {
            "name": "Acme.Pair",
            "constructors": [{ "parameters": [{ "name": "key", "type": "System.String" }] }],
            "properties": [{ "name": "Key", "type": "System.String", "canRead": true }]
        },
        { "name": "Acme.Pair`2", "genericParams": [{ "name": "TKey" }, { "name": "TValue" }] },
        { "name": "Acme.Tools.Hammer", "base": "Acme.Pair" }
    ]
}"#;

fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).expect("write fixture");
    path
}

/// Stub files under `root`, relative and with `/` separators.
fn stub_files(root: &Path) -> BTreeSet<String> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            let relative = entry.path().strip_prefix(root).expect("entry under root");
            relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect()
}

fn generate_into(dest: &Path, assemblies: Vec<PathBuf>) -> driver::GenerateSummary {
    let config = ResolvedConfig {
        dest_path: dest.to_path_buf(),
        assemblies,
        search_paths: Vec::new(),
        stub_file_name: DEFAULT_STUB_FILE_NAME.to_string(),
    };
    let mut sink = DirectorySink::new(&config.dest_path, &config.stub_file_name);
    let mut console = Vec::new();
    driver::run(&config, &mut sink, &Reporter::new(false), &mut console).expect("generation should succeed")
}

#[test]
fn writes_one_package_per_namespace() {
    let temp = tempfile::tempdir().expect("temp dir");
    let acme = write(temp.path(), "Acme.json", ACME);
    let dest = temp.path().join("stubs");

    let summary = generate_into(&dest, vec![acme]);

    let files = stub_files(&dest);
    for expected in [
        "Acme/__init__.pyi",
        "Acme/Tools/__init__.pyi",
        "System/__init__.pyi",
    ] {
        assert!(files.contains(expected), "Expected {expected} in {files:?}");
    }
    assert_eq!(files.len(), summary.namespaces.len());
}

#[test]
fn generic_family_and_cross_namespace_imports() {
    let temp = tempfile::tempdir().expect("temp dir");
    let acme = write(temp.path(), "Acme.json", ACME);
    let dest = temp.path().join("stubs");

    generate_into(&dest, vec![acme]);

    let acme_stub = std::fs::read_to_string(dest.join("Acme").join("__init__.pyi")).expect("Acme stub");
    assert!(acme_stub.contains("class Pair_0:"), "non-generic sibling is renamed:\n{acme_stub}");
    assert!(acme_stub.contains("def __init__(self, key: str) -> None: ..."));
    assert!(acme_stub.contains("def Key(self) -> str: ..."));
    assert!(acme_stub.contains("class Pair(Pair_0, metaclass=Pair_GenericClasses): ..."));

    let tools_stub =
        std::fs::read_to_string(dest.join("Acme").join("Tools").join("__init__.pyi")).expect("Tools stub");
    assert!(tools_stub.contains("from Acme import Pair, Pair_0\n"), "imports:\n{tools_stub}");
    assert!(tools_stub.contains("class Hammer(Pair_0):"));
}

#[test]
fn repeated_runs_are_byte_identical() {
    let temp = tempfile::tempdir().expect("temp dir");
    let acme = write(temp.path(), "Acme.json", ACME);
    let first = temp.path().join("first");
    let second = temp.path().join("second");

    generate_into(&first, vec![acme.clone()]);
    generate_into(&second, vec![acme]);

    let files = stub_files(&first);
    assert_eq!(files, stub_files(&second));
    for file in files {
        let a = std::fs::read(first.join(&file)).expect("first output");
        let b = std::fs::read(second.join(&file)).expect("second output");
        assert_eq!(a, b, "{file} differs between runs");
    }
}

#[test]
fn binary_reports_failures_and_exits_non_zero() {
    let temp = tempfile::tempdir().expect("temp dir");
    let output = Command::new(env!("CARGO_BIN_EXE_netstub"))
        .current_dir(temp.path())
        .args(["--dest-path", "stubs", "--target-dlls", "Missing.json", "--no-color"])
        .output()
        .expect("run netstub");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error: failed generating stubs | failed to load assembly manifest"),
        "stderr was: {stderr}"
    );
}

#[test]
fn binary_generates_from_a_project_file() {
    let temp = tempfile::tempdir().expect("temp dir");
    write(temp.path(), "Acme.json", ACME);
    write(
        temp.path(),
        "netstub.json",
        r#"{ "outDir": "out", "assemblies": ["Acme.json"], "stubFileName": "stub.pyi" }"#,
    );

    let output = Command::new(env!("CARGO_BIN_EXE_netstub"))
        .current_dir(temp.path())
        .args(["-p", "netstub.json"])
        .output()
        .expect("run netstub");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Generating Assembly: Acme"));
    assert!(temp.path().join("out").join("Acme").join("stub.pyi").is_file());
}
