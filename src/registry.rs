// src/registry.rs

//! Built-in recipe registry
//!
//! The shipped recipes are TOML tables embedded at compile time and
//! parsed once into an immutable lookup table on first access. The
//! registry is the find-by-name surface the CLI and orchestrator use.

use crate::descriptor::PackageDescriptor;
use crate::error::{Error, Result};
use crate::parser::parse_descriptor;
use std::collections::BTreeMap;
use std::sync::OnceLock;

const BUILTIN_RECIPES: &[(&str, &str)] = &[
    ("xtensor-io", include_str!("../recipes/xtensor-io.toml")),
    ("xtensor-python", include_str!("../recipes/xtensor-python.toml")),
    ("xtensor-zarr", include_str!("../recipes/xtensor-zarr.toml")),
    ("z5", include_str!("../recipes/z5.toml")),
    ("zarray", include_str!("../recipes/zarray.toml")),
];

fn registry() -> &'static BTreeMap<String, PackageDescriptor> {
    static REGISTRY: OnceLock<BTreeMap<String, PackageDescriptor>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut table = BTreeMap::new();
        for (name, content) in BUILTIN_RECIPES {
            // Embedded recipes are covered by tests; a parse failure
            // here is a packaging bug, not a runtime condition.
            let descriptor = parse_descriptor(content)
                .unwrap_or_else(|e| panic!("embedded recipe '{}' is invalid: {}", name, e));
            table.insert(descriptor.package.name.clone(), descriptor);
        }
        table
    })
}

/// Look up a built-in recipe by package name
pub fn find(name: &str) -> Result<&'static PackageDescriptor> {
    registry()
        .get(name)
        .ok_or_else(|| Error::UnknownPackage(name.to_string()))
}

/// All built-in recipes, ordered by package name
pub fn all() -> impl Iterator<Item = &'static PackageDescriptor> {
    registry().values()
}
