//! Filesystem-backed analysis: real files, include directories and the JSON boundary.

use std::fs;
use std::path::Path;

use svtopo::{Analyzer, AnalyzerConfig, FsLoader, Request, Response, SourceLoader, run_json};
use tempfile::TempDir;

fn write(dir: &Path, rel: &str, text: &str) -> String {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, text).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn analyzes_files_on_disk_with_include_dirs() {
    let dir = TempDir::new().unwrap();
    let top = write(dir.path(), "rtl/top.sv", "`include \"defs.svh\"\nmodule top;\n  core u_core ();\nendmodule\n");
    let core = write(dir.path(), "rtl/core.sv", "module core;\n  alu u_alu ();\nendmodule\n");
    write(dir.path(), "include/defs.svh", "`define WIDTH 8\nmodule defs_helper; endmodule\n");
    let include = dir.path().join("include").to_string_lossy().into_owned();

    let request = Request::new(vec![top.clone(), core.clone()], vec![include]);
    let analysis = Analyzer::new(AnalyzerConfig::default()).analyze(&request);
    let m = &analysis.modules;

    assert_eq!(m.declarations["top"].file, top);
    assert_eq!(m.declarations["core"].line, 1);
    assert!(m.declarations["defs_helper"].file.ends_with("defs.svh"));
    assert_eq!(m.exports.keys().collect::<Vec<_>>(), ["defs_helper", "top"]);
    assert_eq!(m.missing.keys().collect::<Vec<_>>(), ["alu"]);
    assert!(analysis.diagnostics.is_empty(), "{:?}", analysis.diagnostics);
}

#[test]
fn include_directories_are_not_scanned_as_sources() {
    let dir = TempDir::new().unwrap();
    let top = write(dir.path(), "top.sv", "module top; endmodule\n");
    write(dir.path(), "inc/unused.sv", "module unused; endmodule\n");
    let include = dir.path().join("inc").to_string_lossy().into_owned();

    let analysis = Analyzer::default().analyze(&Request::new(vec![top], vec![include]));
    assert_eq!(analysis.modules.declarations.keys().collect::<Vec<_>>(), ["top"]);
}

#[test]
fn unreadable_and_oversized_files_become_diagnostics() {
    let dir = TempDir::new().unwrap();
    let big = write(dir.path(), "big.sv", "module big; endmodule\n");
    let ok = write(dir.path(), "ok.sv", "module ok; endmodule\n");
    let gone = dir.path().join("gone.sv").to_string_lossy().into_owned();

    let config = AnalyzerConfig::default().with_max_source_size(21);
    let analysis = Analyzer::new(config).analyze(&Request::new(vec![gone, big, ok.clone()], vec![]));
    let codes: Vec<String> = analysis.diagnostics.iter().map(|d| d.code()).collect();
    assert_eq!(codes, ["svtopo::io", "svtopo::io"]);
    assert!(analysis.diagnostics[1].message().contains("too large"));
    assert_eq!(analysis.modules.declarations.keys().collect::<Vec<_>>(), ["ok"]);
}

#[test]
fn fs_loader_decodes_invalid_utf8_lossily() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("latin1.sv");
    fs::write(&path, b"module m; // caf\xe9\nendmodule\n").unwrap();
    let text = FsLoader::new().load(&path).unwrap();
    assert!(text.contains('\u{FFFD}'));

    let analysis = Analyzer::default().analyze(&Request::new(vec![path.to_string_lossy().into_owned()], vec![]));
    assert_eq!(analysis.modules.exports.keys().collect::<Vec<_>>(), ["m"]);
}

#[test]
fn run_json_end_to_end() {
    let dir = TempDir::new().unwrap();
    let top = write(dir.path(), "top.sv", "module top; leaf u0 (), u1 (); endmodule\n");
    let request = serde_json::json!({ "files": { "include": [], "source": [top] } }).to_string();

    let response: Response = serde_json::from_str(&run_json(&request).unwrap()).unwrap();
    assert_eq!(response.modules.instances["leaf"].len(), 2);
    assert_eq!(response.modules.missing["leaf"][1].file, top);
    assert!(response.diagnostics.is_empty());
}

#[test]
fn run_json_reports_missing_files_in_the_response() {
    let request = r#"{"files": {"source": ["/definitely/not/here.sv"]}}"#;
    let json = run_json(request).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["diagnostics"][0]["code"], "svtopo::io");
    assert_eq!(value["diagnostics"][0]["file"], "/definitely/not/here.sv");
    assert!(value["diagnostics"][0].get("line").is_none());
}
