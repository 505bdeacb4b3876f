// tests/engine.rs

//! End-to-end engine coverage: resolution across every option
//! combination, deterministic snippet emission, staging idempotence,
//! and the packaging flow.

mod common;

use common::{demo_descriptor, demo_source_tree, snapshot_tree};
use larder::{
    emit_integration_snippet, registry, resolve_requirements, stage_package, validate_compiler,
    Engine, EngineConfig, Error, OptionSelection,
};

#[test]
fn gated_requirements_resolve_exactly() {
    let descriptor = demo_descriptor();
    let selection = OptionSelection::defaults(&descriptor);

    // featureA defaults true, featureB false
    let deps = resolve_requirements(&descriptor, &selection).unwrap();
    let names: Vec<&str> = deps.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["depX"]);
}

/// For every built-in recipe and every option combination, a gated
/// requirement is requested iff its gate is true, ungated requirements
/// are always requested, and declaration order is preserved. An
/// enabled-but-unavailable requirement must be a hard error.
#[test]
fn resolution_invariant_holds_for_all_combinations() {
    for descriptor in registry::all() {
        let n = descriptor.options.len();
        assert!(n <= 16, "combination sweep would be too large");

        for bits in 0u32..(1 << n) {
            let mut selection = OptionSelection::defaults(descriptor);
            for (i, option) in descriptor.options.iter().enumerate() {
                selection.set(&option.name, bits & (1 << i) != 0).unwrap();
            }

            let expects_missing = descriptor.requirements.iter().any(|r| {
                !r.available
                    && r.when
                        .as_ref()
                        .map(|gate| selection.enabled(gate))
                        .unwrap_or(true)
            });

            match resolve_requirements(descriptor, &selection) {
                Ok(deps) => {
                    assert!(!expects_missing, "{}: missing dep not reported", descriptor.package.name);
                    let expected: Vec<&str> = descriptor
                        .requirements
                        .iter()
                        .filter(|r| {
                            r.when
                                .as_ref()
                                .map(|gate| selection.enabled(gate))
                                .unwrap_or(true)
                        })
                        .map(|r| r.name.as_str())
                        .collect();
                    let actual: Vec<&str> = deps.iter().map(|d| d.name.as_str()).collect();
                    assert_eq!(actual, expected, "{}: wrong resolution", descriptor.package.name);
                }
                Err(Error::RecipeNotFound(_)) => {
                    assert!(expects_missing, "{}: spurious missing-recipe error", descriptor.package.name);
                }
                Err(e) => panic!("{}: unexpected error {:?}", descriptor.package.name, e),
            }
        }
    }
}

#[test]
fn snippet_emission_is_deterministic() {
    for descriptor in registry::all() {
        let first = emit_integration_snippet(descriptor);
        let second = emit_integration_snippet(descriptor);
        assert_eq!(first, second);
        assert!(first.contains(&format!("NOT TARGET {})", descriptor.package.name)));
    }
}

#[test]
fn compiler_minimums_from_registry() {
    let zarr = registry::find("xtensor-zarr").unwrap();
    assert!(validate_compiler(zarr, "gcc", "4.9").is_err());
    assert!(validate_compiler(zarr, "gcc", "5.0").is_ok());
    assert!(validate_compiler(zarr, "clang", "3.9").is_err());
    assert!(validate_compiler(zarr, "Visual Studio", "15.9").is_err());
    assert!(validate_compiler(zarr, "Visual Studio", "16").is_ok());

    // Unconstrained packages accept anything
    let zarray = registry::find("zarray").unwrap();
    assert!(validate_compiler(zarray, "gcc", "3.0").is_ok());
}

#[test]
fn staging_is_idempotent() {
    let descriptor = demo_descriptor();
    let (work, source) = demo_source_tree();
    let dest = work.path().join("package");

    stage_package(&descriptor, &source, &dest).unwrap();
    let first = snapshot_tree(&dest);
    assert!(first.contains_key("licenses/LICENSE"));
    assert!(first.contains_key("include/demo.hpp"));
    assert!(first.contains_key("include/demo/core.hpp"));
    assert!(first.contains_key("lib/cmake/demo-targets.cmake"));

    stage_package(&descriptor, &source, &dest).unwrap();
    let second = snapshot_tree(&dest);
    assert_eq!(first, second);
}

#[test]
fn staged_module_matches_emitted_snippet() {
    let descriptor = demo_descriptor();
    let (work, source) = demo_source_tree();
    let dest = work.path().join("package");

    stage_package(&descriptor, &source, &dest).unwrap();
    let on_disk = std::fs::read_to_string(dest.join("lib/cmake/demo-targets.cmake")).unwrap();
    assert_eq!(on_disk, emit_integration_snippet(&descriptor));
}

#[test]
fn package_flow_reports_metadata() {
    let descriptor = demo_descriptor();
    let (work, source) = demo_source_tree();
    let dest = work.path().join("package");

    let engine = Engine::new(EngineConfig {
        source_cache: work.path().join("cache"),
        compiler_id: Some("gcc".to_string()),
        compiler_version: Some("11.2".to_string()),
    });

    let mut selection = OptionSelection::defaults(&descriptor);
    selection.set("featureB", true).unwrap();

    let metadata = engine
        .package(&descriptor, &selection, &source, &dest)
        .unwrap();

    assert_eq!(metadata.name, "demo");
    assert_eq!(metadata.version, "1.0");
    let names: Vec<&str> = metadata.requires.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["depX", "depY"]);
    assert_eq!(metadata.defines, vec!["HAVE_A", "HAVE_B"]);
    assert_eq!(metadata.module_path, "lib/cmake/demo-targets.cmake");
    assert!(dest.join("include/demo.hpp").exists());
}

#[test]
fn enabling_unavailable_dependency_fails_packaging() {
    let io = registry::find("xtensor-io").unwrap();
    let mut selection = OptionSelection::defaults(io);
    selection.set("highfive", true).unwrap();

    let engine = Engine::with_defaults();
    match engine.evaluate(io, &selection) {
        Err(Error::RecipeNotFound(name)) => assert_eq!(name, "highfive"),
        other => panic!("expected RecipeNotFound, got {:?}", other),
    }
}
