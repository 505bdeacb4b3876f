// src/version.rs

//! Compiler version handling
//!
//! Compiler versions in recipes and settings are short dotted strings
//! like "5.0", "4.9", or "16". They are not full semver, so parsing is
//! lenient: missing minor/patch components default to zero, and
//! comparison uses semver ordering on the normalized form.

use crate::descriptor::PackageDescriptor;
use crate::error::{Error, Result};
use semver::Version;
use std::cmp::Ordering;
use std::fmt;

/// A normalized compiler version
#[derive(Debug, Clone)]
pub struct CompilerVersion {
    version: Version,
    raw: String,
}

// Equality and ordering compare the normalized version, not the raw
// spelling: "5" and "5.0.0" are the same compiler version.
impl PartialEq for CompilerVersion {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
    }
}

impl Eq for CompilerVersion {}

impl CompilerVersion {
    /// Parse a dotted version string
    ///
    /// Accepts "N", "N.N", and "N.N.N"; every component must be a
    /// non-negative integer.
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::ConfigError("Empty compiler version".to_string()));
        }

        let mut parts = trimmed.split('.');
        let mut component = |name: &str| -> Result<u64> {
            match parts.next() {
                None => Ok(0),
                Some(p) => p.parse::<u64>().map_err(|_| {
                    Error::ConfigError(format!(
                        "Invalid {} component in compiler version '{}'",
                        name, s
                    ))
                }),
            }
        };

        let major = component("major")?;
        let minor = component("minor")?;
        let patch = component("patch")?;

        if parts.next().is_some() {
            return Err(Error::ConfigError(format!(
                "Compiler version '{}' has too many components",
                s
            )));
        }

        Ok(Self {
            version: Version::new(major, minor, patch),
            raw: trimmed.to_string(),
        })
    }
}

impl fmt::Display for CompilerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl Ord for CompilerVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.version.cmp(&other.version)
    }
}

impl PartialOrd for CompilerVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Check a compiler against the descriptor's declared minimums
///
/// Fails when the reported version is strictly below the minimum for
/// that compiler id. Compilers the descriptor does not constrain pass
/// unconditionally.
pub fn validate_compiler(
    descriptor: &PackageDescriptor,
    compiler_id: &str,
    compiler_version: &str,
) -> Result<()> {
    let Some(minimum) = descriptor.compilers.get(compiler_id) else {
        return Ok(());
    };

    let minimum_version = CompilerVersion::parse(minimum)?;
    let found = CompilerVersion::parse(compiler_version)?;

    if found < minimum_version {
        return Err(Error::UnsupportedCompiler {
            package: descriptor.package.name.clone(),
            compiler: compiler_id.to_string(),
            minimum: minimum.clone(),
            found: compiler_version.to_string(),
        });
    }

    Ok(())
}
