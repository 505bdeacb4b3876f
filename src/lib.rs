// src/lib.rs

//! Larder: recipe engine for packaging header-only C++ libraries
//!
//! Each package is described by an immutable [`PackageDescriptor`]
//! loaded from a TOML recipe: metadata, boolean build options,
//! option-gated requirements, file copy rules, exported CMake alias
//! targets, and compiler minimums. The [`Engine`] evaluates a
//! descriptor against a concrete [`OptionSelection`] and produces the
//! resolved dependency list, a staged install tree, a deterministic
//! build-integration module, and the exported preprocessor defines.
//!
//! # Architecture
//!
//! - Descriptors are static configuration: parsed once, never mutated
//! - Conditional logic is declarative (gate, effect) pairs evaluated
//!   uniformly by the shared engine
//! - All failures are hard: configuration and environment problems
//!   abort the build for operator attention, never retry

pub mod descriptor;
pub mod engine;
mod error;
pub mod fetch;
pub mod integration;
pub mod parser;
pub mod registry;
pub mod resolve;
pub mod selection;
pub mod staging;
pub mod version;

pub use descriptor::{
    AliasTarget, CopyRule, DependencySpec, OptionSpec, PackageDescriptor, Requirement,
};
pub use engine::{Engine, EngineConfig, PackageMetadata};
pub use error::{Error, Result};
pub use integration::emit_integration_snippet;
pub use parser::{parse_descriptor, parse_descriptor_file, validate_descriptor};
pub use resolve::resolve_requirements;
pub use selection::{compute_defines, OptionSelection};
pub use staging::stage_package;
pub use version::{validate_compiler, CompilerVersion};
