// src/descriptor.rs

//! Recipe descriptor format definitions
//!
//! A descriptor is the immutable static configuration for one package:
//! metadata, boolean build options, option-gated requirements, file
//! copy rules, exported CMake alias targets, and optional compiler
//! minimums. Descriptors are TOML files; requirements, options, copy
//! rules, and aliases are arrays of tables so declaration order
//! survives parsing.
//!
//! # Example Descriptor
//!
//! ```toml
//! [package]
//! name = "zarray"
//! version = "0.1.0"
//! license = "BSD-3-Clause"
//! homepage = "https://github.com/xtensor-stack/zarray"
//! description = "Dynamically typed N-D expression system"
//!
//! [source]
//! url = "https://github.com/xtensor-stack/zarray/archive/0.1.0.tar.gz"
//! checksum = "sha256:..."
//!
//! [[option]]
//! name = "xsimd"
//! default = true
//! define = "ZARRAY_USE_XSIMD"
//!
//! [[requires]]
//! name = "xsimd"
//! version = "7.4.10"
//! when = "xsimd"
//!
//! [[copy]]
//! pattern = "LICENSE"
//! dst = "licenses"
//!
//! [[copy]]
//! pattern = "*.hpp"
//! src = "include"
//! dst = "include"
//!
//! [[alias]]
//! target = "zarray"
//! aliased = "zarray::zarray"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A complete package descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageDescriptor {
    /// Package metadata
    pub package: PackageSection,

    /// Source archive location and checksum
    pub source: SourceSection,

    /// Build-time boolean options, in declaration order
    #[serde(default, rename = "option")]
    pub options: Vec<OptionSpec>,

    /// Upstream requirements, in declaration order
    #[serde(default, rename = "requires")]
    pub requirements: Vec<Requirement>,

    /// File copy rules applied during staging, in declaration order
    #[serde(default, rename = "copy")]
    pub copy_rules: Vec<CopyRule>,

    /// Exported CMake alias targets, in declaration order
    #[serde(default, rename = "alias")]
    pub aliases: Vec<AliasTarget>,

    /// Minimum supported compiler versions, keyed by compiler id
    #[serde(default)]
    pub compilers: BTreeMap<String, String>,
}

impl PackageDescriptor {
    /// Look up an option by name
    pub fn option(&self, name: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.name == name)
    }

    /// Relative path of the generated build-integration module
    pub fn module_file_rel_path(&self) -> String {
        format!("lib/cmake/{}-targets.cmake", self.package.name)
    }
}

/// Package metadata section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageSection {
    /// Package name, used for find-by-name lookup
    pub name: String,

    /// Pinned upstream version
    pub version: String,

    /// SPDX license identifier
    #[serde(default)]
    pub license: Option<String>,

    /// Upstream project homepage
    #[serde(default)]
    pub homepage: Option<String>,

    /// Short description
    #[serde(default)]
    pub description: Option<String>,

    /// Search topics
    #[serde(default)]
    pub topics: Vec<String>,
}

/// Source archive section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSection {
    /// Archive URL
    pub url: String,

    /// Pinned checksum, `sha256:<hex>`
    pub checksum: String,
}

/// One boolean build option
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Option name
    pub name: String,

    /// Default value when the invoker supplies no selection
    pub default: bool,

    /// Preprocessor define exported when the option is true
    #[serde(default)]
    pub define: Option<String>,

    /// Preprocessor define exported when the option is false
    ///
    /// Used for paired defines like shared/static build markers.
    #[serde(default)]
    pub define_off: Option<String>,
}

/// One upstream requirement, optionally gated on an option
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Requirement {
    /// Dependency package name
    pub name: String,

    /// Pinned dependency version
    pub version: String,

    /// Option gating this requirement; ungated requirements are
    /// always requested
    #[serde(default)]
    pub when: Option<String>,

    /// Whether a recipe for this dependency exists. Resolving an
    /// enabled requirement with no recipe is a hard failure.
    #[serde(default = "default_true")]
    pub available: bool,
}

fn default_true() -> bool {
    true
}

/// One file copy rule applied during staging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyRule {
    /// Glob matched against file names under `src`
    pub pattern: String,

    /// Subdirectory of the source root to search, empty for the root
    #[serde(default)]
    pub src: String,

    /// Destination subdirectory of the package root
    pub dst: String,
}

/// One exported CMake alias target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasTarget {
    /// Friendly target name consumers link against
    pub target: String,

    /// Underlying namespaced library target
    pub aliased: String,
}

/// A resolved dependency with its pinned version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencySpec {
    pub name: String,
    pub version: String,
}

impl std::fmt::Display for DependencySpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.name, self.version)
    }
}
