// src/integration.rs

//! Build-integration snippet generation
//!
//! Downstream CMake builds find packages by a friendly target name
//! (`z5`) while the installed target carries a namespace
//! (`z5::z5`). The generated module bridges the two with one
//! conditional alias stanza per exported target. Output must be
//! byte-identical across runs for the same descriptor: build caches
//! key on the file's content.

use crate::descriptor::PackageDescriptor;
use std::fmt::Write;

/// Render the alias module for a descriptor
///
/// One stanza per alias target, in declaration order.
pub fn emit_integration_snippet(descriptor: &PackageDescriptor) -> String {
    let mut content = String::new();

    for alias in &descriptor.aliases {
        // Infallible: writing to a String cannot fail
        let _ = write!(
            content,
            "if(TARGET {aliased} AND NOT TARGET {target})\n    \
             add_library({target} INTERFACE IMPORTED)\n    \
             set_property(TARGET {target} PROPERTY INTERFACE_LINK_LIBRARIES {aliased})\nendif()\n",
            target = alias.target,
            aliased = alias.aliased,
        );
    }

    content
}
