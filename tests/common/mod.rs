// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

use larder::{parse_descriptor, PackageDescriptor};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A small descriptor with one gated requirement per option.
pub fn demo_descriptor() -> PackageDescriptor {
    parse_descriptor(
        r#"
[package]
name = "demo"
version = "1.0"
license = "BSD-3-Clause"
description = "demo package"

[source]
url = "https://example.com/demo-1.0.tar.gz"
checksum = "sha256:abc"

[[option]]
name = "featureA"
default = true
define = "HAVE_A"

[[option]]
name = "featureB"
default = false
define = "HAVE_B"

[[requires]]
name = "depX"
version = "1.0"
when = "featureA"

[[requires]]
name = "depY"
version = "2.0"
when = "featureB"

[[copy]]
pattern = "LICENSE"
dst = "licenses"

[[copy]]
pattern = "*.hpp"
src = "include"
dst = "include"

[[alias]]
target = "demo"
aliased = "demo::demo"
"#,
    )
    .unwrap()
}

/// Write a header-only source tree matching `demo_descriptor`'s copy
/// rules under a fresh temp directory.
///
/// Returns (TempDir, source_root) - keep the TempDir alive to prevent
/// cleanup.
pub fn demo_source_tree() -> (TempDir, std::path::PathBuf) {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = temp_dir.path().join("source");

    fs::create_dir_all(source.join("include/demo")).unwrap();
    fs::write(source.join("LICENSE"), "BSD-3-Clause\n").unwrap();
    fs::write(source.join("include/demo.hpp"), "#pragma once\n").unwrap();
    fs::write(
        source.join("include/demo/core.hpp"),
        "#pragma once\nnamespace demo {}\n",
    )
    .unwrap();

    (temp_dir, source)
}

/// Snapshot a directory tree as relative path -> file contents.
pub fn snapshot_tree(root: &Path) -> BTreeMap<String, Vec<u8>> {
    let mut tree = BTreeMap::new();
    for entry in walkdir::WalkDir::new(root) {
        let entry = entry.unwrap();
        if entry.file_type().is_file() {
            let rel = entry
                .path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .into_owned();
            tree.insert(rel, fs::read(entry.path()).unwrap());
        }
    }
    tree
}
