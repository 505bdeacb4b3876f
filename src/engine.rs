// src/engine.rs

//! The recipe engine: descriptor in, package artifacts out
//!
//! The engine is a pure descriptor-to-artifact transform run once per
//! package build by an external orchestrator. Given a descriptor and a
//! concrete option selection it validates the compiler, resolves the
//! requirement list, stages the install tree, and reports the metadata
//! downstream consumers need (resolved dependencies, exported defines,
//! integration-module path). There is no state between invocations.

use crate::descriptor::{DependencySpec, PackageDescriptor};
use crate::error::Result;
use crate::fetch::{fetch_source, unpack_archive};
use crate::parser::validate_descriptor;
use crate::resolve::resolve_requirements;
use crate::selection::{compute_defines, OptionSelection};
use crate::staging::stage_package;
use crate::version::validate_compiler;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Configuration for the engine, supplied by the orchestrator
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Directory for downloaded source archives
    pub source_cache: PathBuf,
    /// Compiler identifier reported by the build environment
    pub compiler_id: Option<String>,
    /// Compiler version reported by the build environment
    pub compiler_version: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            source_cache: PathBuf::from("/var/cache/larder/sources"),
            compiler_id: None,
            compiler_version: None,
        }
    }
}

/// Metadata exported to downstream consumers after packaging
#[derive(Debug, Clone)]
pub struct PackageMetadata {
    /// Package name, for find-by-name lookup
    pub name: String,
    /// Packaged version
    pub version: String,
    /// Resolved dependencies with pinned versions, in declaration order
    pub requires: Vec<DependencySpec>,
    /// Preprocessor defines exported for the selection
    pub defines: Vec<String>,
    /// Relative path of the generated build-integration module
    pub module_path: String,
}

/// The recipe engine
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Create an engine with the given configuration
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Create an engine with default configuration
    pub fn with_defaults() -> Self {
        Self::new(EngineConfig::default())
    }

    /// Fetch the descriptor's source archive into the cache
    pub fn fetch(&self, descriptor: &PackageDescriptor) -> Result<PathBuf> {
        fetch_source(
            &descriptor.source.url,
            &descriptor.source.checksum,
            &self.config.source_cache,
        )
    }

    /// Fetch and unpack the source tree under `work_dir`
    ///
    /// Returns the root of the unpacked tree.
    pub fn prepare_source(
        &self,
        descriptor: &PackageDescriptor,
        work_dir: &Path,
    ) -> Result<PathBuf> {
        let archive = self.fetch(descriptor)?;
        let source_root = work_dir.join("source");
        unpack_archive(&archive, &source_root)?;
        Ok(source_root)
    }

    /// Evaluate a descriptor against a selection without touching disk
    ///
    /// Produces the same metadata as [`Engine::package`] minus the
    /// staged tree; used for dry runs and dependency queries.
    pub fn evaluate(
        &self,
        descriptor: &PackageDescriptor,
        selection: &OptionSelection,
    ) -> Result<PackageMetadata> {
        self.check_compiler(descriptor)?;
        let requires = resolve_requirements(descriptor, selection)?;
        let defines = compute_defines(descriptor, selection);

        Ok(PackageMetadata {
            name: descriptor.package.name.clone(),
            version: descriptor.package.version.clone(),
            requires,
            defines,
            module_path: descriptor.module_file_rel_path(),
        })
    }

    /// Package a descriptor: validate, resolve, and stage
    ///
    /// `source_root` is an unpacked source tree (see
    /// [`Engine::prepare_source`]); the staged package lands at
    /// `dest_root`.
    pub fn package(
        &self,
        descriptor: &PackageDescriptor,
        selection: &OptionSelection,
        source_root: &Path,
        dest_root: &Path,
    ) -> Result<PackageMetadata> {
        info!(
            "Packaging {} version {}",
            descriptor.package.name, descriptor.package.version
        );

        for warning in validate_descriptor(descriptor)? {
            warn!("{}: {}", descriptor.package.name, warning);
        }

        let metadata = self.evaluate(descriptor, selection)?;
        stage_package(descriptor, source_root, dest_root)?;

        Ok(metadata)
    }

    fn check_compiler(&self, descriptor: &PackageDescriptor) -> Result<()> {
        if let (Some(id), Some(version)) = (&self.config.compiler_id, &self.config.compiler_version)
        {
            validate_compiler(descriptor, id, version)?;
        }
        Ok(())
    }
}
