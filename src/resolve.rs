// src/resolve.rs

//! Requirement resolution
//!
//! Each requirement carries an optional gating option. Resolution
//! walks the declared list in order and keeps every requirement whose
//! gate evaluates true (ungated requirements always do). A requirement
//! that is enabled but marked unavailable aborts resolution: the
//! orchestrator must not proceed with a dependency it cannot supply.

use crate::descriptor::{DependencySpec, PackageDescriptor};
use crate::error::{Error, Result};
use crate::selection::OptionSelection;

/// Resolve the requirement list for a concrete option selection
pub fn resolve_requirements(
    descriptor: &PackageDescriptor,
    selection: &OptionSelection,
) -> Result<Vec<DependencySpec>> {
    let mut resolved = Vec::new();

    for requirement in &descriptor.requirements {
        let enabled = match &requirement.when {
            Some(gate) => selection.enabled(gate),
            None => true,
        };

        if !enabled {
            continue;
        }

        if !requirement.available {
            return Err(Error::RecipeNotFound(requirement.name.clone()));
        }

        resolved.push(DependencySpec {
            name: requirement.name.clone(),
            version: requirement.version.clone(),
        });
    }

    Ok(resolved)
}
