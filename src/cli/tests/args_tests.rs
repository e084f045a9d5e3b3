use super::args::CliArgs;
use clap::Parser;
use std::path::PathBuf;

#[test]
fn parses_destination_and_comma_separated_lists() {
    let args = CliArgs::try_parse_from([
        "netstub",
        "--dest-path",
        "out",
        "--target-dlls",
        "Acme.json,Other.json",
        "--search-paths",
        "refs,lib",
    ])
    .expect("args should parse");

    assert_eq!(args.dest_path, Some(PathBuf::from("out")));
    assert_eq!(
        args.target_dlls,
        vec![PathBuf::from("Acme.json"), PathBuf::from("Other.json")]
    );
    assert_eq!(args.search_paths, vec![PathBuf::from("refs"), PathBuf::from("lib")]);
    assert!(args.project.is_none());
    assert!(!args.no_color);
}

#[test]
fn short_flags_and_camel_case_aliases() {
    let args = CliArgs::try_parse_from([
        "netstub",
        "-o",
        "stubs",
        "-p",
        "netstub.json",
        "--targetDlls",
        "A.json",
        "--no-color",
    ])
    .expect("args should parse");

    assert_eq!(args.dest_path, Some(PathBuf::from("stubs")));
    assert_eq!(args.project, Some(PathBuf::from("netstub.json")));
    assert_eq!(args.target_dlls, vec![PathBuf::from("A.json")]);
    assert!(args.no_color);
}

#[test]
fn repeated_list_flags_accumulate() {
    let args = CliArgs::try_parse_from([
        "netstub",
        "--target-dlls",
        "A.json",
        "--target-dlls",
        "B.json,C.json",
    ])
    .expect("args should parse");

    assert_eq!(args.target_dlls.len(), 3);
    assert!(args.dest_path.is_none());
}

#[test]
fn rejects_unknown_flags() {
    let result = CliArgs::try_parse_from(["netstub", "--emit-python2"]);
    assert!(result.is_err(), "Unknown flags should be rejected");
}
