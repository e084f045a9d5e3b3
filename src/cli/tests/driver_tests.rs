use super::config::{DEFAULT_STUB_FILE_NAME, ResolvedConfig};
use super::driver::run;
use super::reporter::Reporter;
use super::sink::MemorySink;
use std::path::{Path, PathBuf};

fn write_manifest(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(format!("{name}.json"));
    std::fs::write(&path, body).expect("write manifest");
    path
}

fn config(dest: &Path, assemblies: Vec<PathBuf>, search_paths: Vec<PathBuf>) -> ResolvedConfig {
    ResolvedConfig {
        dest_path: dest.to_path_buf(),
        assemblies,
        search_paths,
        stub_file_name: DEFAULT_STUB_FILE_NAME.to_string(),
    }
}

#[test]
fn generates_target_and_core_namespaces() {
    let temp = tempfile::tempdir().expect("temp dir");
    let acme = write_manifest(
        temp.path(),
        "Acme",
        r#"{ "name": "Acme", "types": [{ "name": "Acme.Widget" }] }"#,
    );
    let dest = temp.path().join("stubs");

    let mut sink = MemorySink::new();
    let mut console = Vec::new();
    let summary = run(
        &config(&dest, vec![acme], Vec::new()),
        &mut sink,
        &Reporter::new(false),
        &mut console,
    )
    .expect("generation should succeed");

    assert_eq!(summary.assemblies, vec!["System.Private.CoreLib".to_string(), "Acme".to_string()]);
    assert!(summary.namespaces.contains("Acme"));
    assert!(summary.namespaces.contains("System"));
    assert!(summary.passes >= summary.namespaces.len());
    assert!(summary.types > 0);
    assert_eq!(sink.get("Acme"), Some("\nclass Widget:\n    pass\n\n"));

    let console = String::from_utf8(console).expect("utf8 console");
    let lines: Vec<&str> = console.lines().collect();
    assert_eq!(
        lines,
        vec![
            "building stubs...",
            "Generating Built-in Assembly: System.Private.CoreLib",
            "Generating Assembly: Acme",
            &format!("stubs saved to {}", dest.display()),
        ]
    );
}

#[test]
fn references_resolve_through_search_paths() {
    let temp = tempfile::tempdir().expect("temp dir");
    let refs = temp.path().join("refs");
    std::fs::create_dir_all(&refs).expect("refs dir");
    write_manifest(
        &refs,
        "Acme.Core",
        r#"{ "name": "Acme.Core", "types": [{ "name": "Acme.Core.Shape" }] }"#,
    );
    let app = write_manifest(
        temp.path(),
        "Acme.App",
        r#"{
            "name": "Acme.App",
            "references": ["Acme.Core"],
            "types": [{ "name": "Acme.App.Circle", "base": "Acme.Core.Shape" }]
        }"#,
    );

    let mut sink = MemorySink::new();
    let mut console = Vec::new();
    let summary = run(
        &config(temp.path(), vec![app], vec![refs.clone()]),
        &mut sink,
        &Reporter::new(false),
        &mut console,
    )
    .expect("generation should succeed");

    let console = String::from_utf8(console).expect("utf8 console");
    assert!(console.starts_with(&format!("search path {}\n", refs.display())));
    assert!(!summary.assemblies.contains(&"Acme.Core".to_string()));

    let app_stub = sink.get("Acme.App").expect("app stub");
    assert!(app_stub.contains("from Acme.Core import Shape\n"));
    assert!(app_stub.contains("class Circle(Shape):"));
    let core_stub = sink.get("Acme.Core").expect("referenced namespace is emitted on demand");
    assert!(core_stub.contains("class Shape:"));
}

#[test]
fn duplicate_targets_are_generated_once() {
    let temp = tempfile::tempdir().expect("temp dir");
    let acme = write_manifest(
        temp.path(),
        "Acme",
        r#"{ "name": "Acme", "types": [{ "name": "Acme.Widget" }] }"#,
    );

    let mut sink = MemorySink::new();
    let mut console = Vec::new();
    let summary = run(
        &config(temp.path(), vec![acme.clone(), acme], Vec::new()),
        &mut sink,
        &Reporter::new(false),
        &mut console,
    )
    .expect("generation should succeed");

    assert_eq!(summary.assemblies.iter().filter(|name| *name == "Acme").count(), 1);
}

#[test]
fn missing_manifest_reports_its_path() {
    let temp = tempfile::tempdir().expect("temp dir");
    let missing = temp.path().join("Missing.json");

    let mut sink = MemorySink::new();
    let mut console = Vec::new();
    let err = run(
        &config(temp.path(), vec![missing.clone()], Vec::new()),
        &mut sink,
        &Reporter::new(false),
        &mut console,
    )
    .expect_err("missing manifest should fail");

    assert!(
        err.to_string()
            .contains(&format!("failed to load assembly manifest: {}", missing.display()))
    );
    assert_eq!(sink.namespaces().count(), 0);
}

#[test]
fn unresolved_reference_fails_the_run() {
    let temp = tempfile::tempdir().expect("temp dir");
    let app = write_manifest(
        temp.path(),
        "Acme.App",
        r#"{ "name": "Acme.App", "references": ["Acme.Nowhere"] }"#,
    );

    let mut sink = MemorySink::new();
    let mut console = Vec::new();
    let err = run(
        &config(temp.path(), vec![app], Vec::new()),
        &mut sink,
        &Reporter::new(false),
        &mut console,
    )
    .expect_err("unresolved reference should fail");

    assert!(format!("{err:#}").contains("Acme.Nowhere"));
}

#[test]
fn error_line_carries_the_cause_chain() {
    let err = anyhow::anyhow!("manifest is empty").context("failed to load assembly manifest: A.json");
    let line = Reporter::new(false).error(&err);
    assert_eq!(
        line,
        "error: failed generating stubs | failed to load assembly manifest: A.json: manifest is empty"
    );
}
