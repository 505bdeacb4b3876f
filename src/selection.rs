// src/selection.rs

//! Option selections: concrete boolean assignments for a descriptor
//!
//! A selection starts from the descriptor's declared defaults; the
//! invoking orchestrator overrides individual options by name. Setting
//! an option the descriptor never declared is a configuration error,
//! not a silent no-op.

use crate::descriptor::PackageDescriptor;
use crate::error::{Error, Result};
use std::collections::HashMap;

/// A concrete assignment of every declared option to a boolean
#[derive(Debug, Clone)]
pub struct OptionSelection {
    package: String,
    values: HashMap<String, bool>,
}

impl OptionSelection {
    /// Build a selection from the descriptor's default values
    pub fn defaults(descriptor: &PackageDescriptor) -> Self {
        let values = descriptor
            .options
            .iter()
            .map(|o| (o.name.clone(), o.default))
            .collect();

        Self {
            package: descriptor.package.name.clone(),
            values,
        }
    }

    /// Override one option by name
    pub fn set(&mut self, name: &str, value: bool) -> Result<()> {
        match self.values.get_mut(name) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(Error::UnknownOption {
                package: self.package.clone(),
                option: name.to_string(),
            }),
        }
    }

    /// Look up an option's value; absent options are false
    pub fn enabled(&self, name: &str) -> bool {
        self.values.get(name).copied().unwrap_or(false)
    }
}

/// Compute the preprocessor defines exported for a selection
///
/// Returns, in option declaration order, each true option's `define`
/// and each false option's `define_off` (when declared). Output is a
/// pure function of descriptor and selection, so repeated calls are
/// identical.
pub fn compute_defines(descriptor: &PackageDescriptor, selection: &OptionSelection) -> Vec<String> {
    let mut defines = Vec::new();

    for option in &descriptor.options {
        let value = selection.enabled(&option.name);
        let emitted = if value { &option.define } else { &option.define_off };
        if let Some(define) = emitted {
            defines.push(define.clone());
        }
    }

    defines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_descriptor;

    fn descriptor() -> PackageDescriptor {
        parse_descriptor(
            r#"
[package]
name = "demo"
version = "1.0"

[source]
url = "https://example.com/demo-1.0.tar.gz"
checksum = "sha256:abc"

[[option]]
name = "zlib"
default = false
define = "HAVE_ZLIB"

[[option]]
name = "shared"
default = false
define = "DEMO_SHARED"
define_off = "DEMO_STATIC"

[[option]]
name = "quiet"
default = true
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let descriptor = descriptor();
        let selection = OptionSelection::defaults(&descriptor);
        assert!(!selection.enabled("zlib"));
        assert!(selection.enabled("quiet"));
    }

    #[test]
    fn test_set_unknown_option() {
        let descriptor = descriptor();
        let mut selection = OptionSelection::defaults(&descriptor);
        assert!(selection.set("nosuch", true).is_err());
    }

    #[test]
    fn test_defines_iff_true() {
        let descriptor = descriptor();
        let mut selection = OptionSelection::defaults(&descriptor);
        assert_eq!(compute_defines(&descriptor, &selection), vec!["DEMO_STATIC"]);

        selection.set("zlib", true).unwrap();
        assert_eq!(
            compute_defines(&descriptor, &selection),
            vec!["HAVE_ZLIB", "DEMO_STATIC"]
        );

        selection.set("shared", true).unwrap();
        assert_eq!(
            compute_defines(&descriptor, &selection),
            vec!["HAVE_ZLIB", "DEMO_SHARED"]
        );
    }

    #[test]
    fn test_option_without_define_emits_nothing() {
        let descriptor = descriptor();
        let selection = OptionSelection::defaults(&descriptor);
        // "quiet" defaults to true but declares no define
        assert!(!compute_defines(&descriptor, &selection)
            .iter()
            .any(|d| d.contains("QUIET")));
    }
}
