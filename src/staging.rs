// src/staging.rs

//! Package staging
//!
//! Staging turns an unpacked source tree into the install layout:
//! headers under `include/`, the license under `licenses/`, and the
//! generated build-integration module under `lib/cmake/`. All work
//! happens in a temporary directory next to the destination and is
//! committed with a rename at the end, so a failed run never leaves a
//! half-staged destination behind. Re-running over an existing
//! destination replaces it with an identical tree.

use crate::descriptor::{CopyRule, PackageDescriptor};
use crate::error::{Error, Result};
use crate::integration::emit_integration_snippet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Stage a package from an unpacked source tree into `dest_root`
pub fn stage_package(
    descriptor: &PackageDescriptor,
    source_root: &Path,
    dest_root: &Path,
) -> Result<()> {
    let parent = dest_root.parent().ok_or_else(|| {
        Error::StagingError(format!(
            "Destination {} has no parent directory",
            dest_root.display()
        ))
    })?;
    fs::create_dir_all(parent)?;

    // Same parent as the destination so the final rename stays on one
    // filesystem.
    let staging = tempfile::Builder::new()
        .prefix(".staging-")
        .tempdir_in(parent)
        .map_err(|e| Error::StagingError(format!("Failed to create staging directory: {}", e)))?;

    for rule in &descriptor.copy_rules {
        let copied = apply_copy_rule(rule, source_root, staging.path())?;
        if copied == 0 {
            return Err(Error::StagingError(format!(
                "Copy rule '{}' matched no files under {}",
                rule.pattern,
                source_root.join(&rule.src).display()
            )));
        }
        debug!("Copied {} files for pattern '{}'", copied, rule.pattern);
    }

    if !descriptor.aliases.is_empty() {
        let module_path = staging.path().join(descriptor.module_file_rel_path());
        if let Some(dir) = module_path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&module_path, emit_integration_snippet(descriptor))?;
    }

    // The TempDir guard stays armed until the rename lands, so a
    // failed commit cleans up the staging directory.
    if dest_root.exists() {
        fs::remove_dir_all(dest_root)
            .map_err(|e| Error::StagingError(format!("Failed to replace destination: {}", e)))?;
    }
    fs::rename(staging.path(), dest_root)
        .map_err(|e| Error::StagingError(format!("Failed to commit staging directory: {}", e)))?;
    let _ = staging.into_path();

    info!(
        "Staged {} {} into {}",
        descriptor.package.name,
        descriptor.package.version,
        dest_root.display()
    );
    Ok(())
}

/// Copy every file matching one rule, preserving relative paths
///
/// Patterns without a path separator match file names anywhere under
/// the rule's source subdirectory; patterns with a separator match the
/// path relative to it.
fn apply_copy_rule(rule: &CopyRule, source_root: &Path, staging: &Path) -> Result<usize> {
    let base = if rule.src.is_empty() {
        source_root.to_path_buf()
    } else {
        source_root.join(&rule.src)
    };

    let pattern = glob::Pattern::new(&rule.pattern)
        .map_err(|e| Error::StagingError(format!("Invalid glob '{}': {}", rule.pattern, e)))?;
    let match_full_path = rule.pattern.contains('/');

    let mut copied = 0;
    for entry in WalkDir::new(&base).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            Error::StagingError(format!("Failed to walk {}: {}", base.display(), e))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let rel = entry
            .path()
            .strip_prefix(&base)
            .map_err(|e| Error::StagingError(format!("Path outside source tree: {}", e)))?;

        let matched = if match_full_path {
            pattern.matches_path(rel)
        } else {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| pattern.matches(name))
        };
        if !matched {
            continue;
        }

        let target = staging.join(&rule.dst).join(rel);
        if let Some(dir) = target.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::copy(entry.path(), &target).map_err(|e| {
            Error::StagingError(format!("Failed to copy {}: {}", entry.path().display(), e))
        })?;
        copied += 1;
    }

    Ok(copied)
}
