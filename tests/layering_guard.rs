//! Layering guardrails for the workspace crates.
//!
//! - `svtopo_core` is a dependency-free vocabulary crate.
//! - `svtopo_syntax` performs no IO and no serialization: it must not depend on serde or on the root crate.
//!
//! These tests scan the member manifests and fail if a forbidden dependency appears in `[dependencies]`.

fn dependency_names(manifest: &str) -> Vec<String> {
    let mut in_dependencies = false;
    let mut names = Vec::new();

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        // Track when we enter/exit the `[dependencies]` table.
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
            continue;
        }

        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Strip inline comments for robustness.
        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        if let Some((name, _)) = line_no_comment.split_once('=') {
            names.push(name.trim().to_string());
        }
    }
    names
}

#[test]
fn core_crate_has_no_dependencies() {
    let manifest = include_str!("../crates/svtopo_core/Cargo.toml");
    let deps = dependency_names(manifest);
    assert!(deps.is_empty(), "svtopo_core must stay dependency-free, found {deps:?}");
}

#[test]
fn syntax_crate_stays_free_of_io_and_serialization() {
    let manifest = include_str!("../crates/svtopo_syntax/Cargo.toml");
    for dep in dependency_names(manifest) {
        assert!(
            !matches!(dep.as_str(), "serde" | "serde_json" | "svtopo" | "tracing-subscriber" | "clap"),
            "`{dep}` must not appear in svtopo_syntax [dependencies]"
        );
    }
}

#[test]
fn manifest_scanner_reads_dependency_tables() {
    let manifest = "[package]\nname = \"x\"\n\n[dependencies]\nfoo = \"1\" # note\nbar = { path = \"b\" }\n\n[dev-dependencies]\nbaz = \"1\"\n";
    assert_eq!(dependency_names(manifest), ["foo", "bar"]);
}

#[test]
fn workspace_metadata_points_at_files_in_the_tree() {
    let manifest = include_str!("../Cargo.toml");
    let readme = manifest
        .lines()
        .filter_map(|line| line.trim().strip_prefix("readme = "))
        .map(|value| value.trim_matches('"'))
        .next();
    if let Some(readme) = readme {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join(readme);
        assert!(path.is_file(), "workspace readme `{readme}` does not exist");
    }
    for key in ["repository", "homepage"] {
        assert!(
            !manifest.lines().any(|line| line.trim().starts_with(&format!("{key} = \""))),
            "`{key}` must not name an unpublished location"
        );
    }
}
