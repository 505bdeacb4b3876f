// src/parser.rs

//! Descriptor file parsing

use crate::descriptor::PackageDescriptor;
use crate::error::{Error, Result};
use std::collections::HashSet;
use std::path::Path;

/// Parse a descriptor from a TOML string
pub fn parse_descriptor(content: &str) -> Result<PackageDescriptor> {
    toml::from_str(content).map_err(|e| Error::ParseError(format!("Invalid descriptor: {}", e)))
}

/// Parse a descriptor from a file
pub fn parse_descriptor_file(path: &Path) -> Result<PackageDescriptor> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::IoError(format!("Failed to read descriptor file: {}", e)))?;

    parse_descriptor(&content)
}

/// Validate a descriptor for completeness and correctness
///
/// Hard errors abort the build; soft problems come back as warnings.
pub fn validate_descriptor(descriptor: &PackageDescriptor) -> Result<Vec<String>> {
    let mut warnings = Vec::new();

    if descriptor.package.name.is_empty() {
        return Err(Error::ParseError("Package name cannot be empty".to_string()));
    }
    if descriptor.package.version.is_empty() {
        return Err(Error::ParseError("Package version cannot be empty".to_string()));
    }

    if !descriptor.source.checksum.starts_with("sha256:") {
        return Err(Error::ParseError(format!(
            "Invalid checksum format: {}. Expected sha256:...",
            descriptor.source.checksum
        )));
    }

    // Duplicate option names would make gating ambiguous
    let mut seen = HashSet::new();
    for option in &descriptor.options {
        if !seen.insert(option.name.as_str()) {
            return Err(Error::ParseError(format!(
                "Duplicate option '{}' in package '{}'",
                option.name, descriptor.package.name
            )));
        }
    }

    // Every requirement gate must name a declared option
    for requirement in &descriptor.requirements {
        if let Some(gate) = &requirement.when {
            if descriptor.option(gate).is_none() {
                return Err(Error::ParseError(format!(
                    "Requirement '{}' is gated on undeclared option '{}'",
                    requirement.name, gate
                )));
            }
        }
    }

    for rule in &descriptor.copy_rules {
        if rule.pattern.is_empty() {
            return Err(Error::ParseError("Copy rule with empty pattern".to_string()));
        }
        if rule.dst.is_empty() {
            return Err(Error::ParseError(format!(
                "Copy rule '{}' has no destination",
                rule.pattern
            )));
        }
    }

    if descriptor.package.license.is_none() {
        warnings.push("Missing package license".to_string());
    }
    if descriptor.package.description.is_none() {
        warnings.push("Missing package description".to_string());
    }
    if descriptor.aliases.is_empty() {
        warnings.push("No alias targets exported".to_string());
    }

    Ok(warnings)
}
