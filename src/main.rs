// src/main.rs

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use larder::{registry, Engine, EngineConfig, OptionSelection, PackageDescriptor};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "larder")]
#[command(author, version, about = "Recipe engine for packaging header-only C++ libraries", long_about = None)]
struct Cli {
    /// Source archive cache directory
    #[arg(long, default_value = "/var/cache/larder/sources")]
    cache_dir: PathBuf,

    /// Compiler identifier reported by the build environment
    #[arg(long)]
    compiler: Option<String>,

    /// Compiler version reported by the build environment
    #[arg(long)]
    compiler_version: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in recipes
    List,
    /// Show one recipe's metadata, options, and requirements
    Show {
        /// Package name
        package: String,
    },
    /// Resolve requirements and defines for an option selection
    Resolve {
        /// Package name
        package: String,
        /// Option overrides as name=true or name=false
        #[arg(short, long = "option", value_name = "NAME=BOOL")]
        options: Vec<String>,
    },
    /// Print the generated build-integration module
    Emit {
        /// Package name
        package: String,
    },
    /// Download and verify the source archive
    Fetch {
        /// Package name
        package: String,
    },
    /// Stage a package into an install prefix
    Package {
        /// Package name
        package: String,
        /// Unpacked source tree; fetched and unpacked when omitted
        #[arg(long)]
        source_root: Option<PathBuf>,
        /// Destination install prefix
        #[arg(long)]
        dest: PathBuf,
        /// Option overrides as name=true or name=false
        #[arg(short, long = "option", value_name = "NAME=BOOL")]
        options: Vec<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let engine = Engine::new(EngineConfig {
        source_cache: cli.cache_dir.clone(),
        compiler_id: cli.compiler.clone(),
        compiler_version: cli.compiler_version.clone(),
    });

    match cli.command {
        Commands::List => {
            for descriptor in registry::all() {
                println!(
                    "{}/{} - {}",
                    descriptor.package.name,
                    descriptor.package.version,
                    descriptor.package.description.as_deref().unwrap_or("")
                );
            }
        }

        Commands::Show { package } => {
            let descriptor = registry::find(&package)?;
            show_descriptor(descriptor);
        }

        Commands::Resolve { package, options } => {
            let descriptor = registry::find(&package)?;
            let selection = build_selection(descriptor, &options)?;
            let metadata = engine.evaluate(descriptor, &selection)?;

            println!("requires:");
            for dep in &metadata.requires {
                println!("  {}", dep);
            }
            println!("defines:");
            for define in &metadata.defines {
                println!("  {}", define);
            }
        }

        Commands::Emit { package } => {
            let descriptor = registry::find(&package)?;
            print!("{}", larder::emit_integration_snippet(descriptor));
        }

        Commands::Fetch { package } => {
            let descriptor = registry::find(&package)?;
            let path = engine.fetch(descriptor)?;
            println!("{}", path.display());
        }

        Commands::Package {
            package,
            source_root,
            dest,
            options,
        } => {
            let descriptor = registry::find(&package)?;
            let selection = build_selection(descriptor, &options)?;

            let work_dir = tempfile::tempdir().context("Failed to create work directory")?;
            let source_root = match source_root {
                Some(root) => root,
                None => engine.prepare_source(descriptor, work_dir.path())?,
            };

            let metadata = engine.package(descriptor, &selection, &source_root, &dest)?;

            println!("staged {} {} -> {}", metadata.name, metadata.version, dest.display());
            println!("module: {}", metadata.module_path);
            for dep in &metadata.requires {
                println!("requires: {}", dep);
            }
            for define in &metadata.defines {
                println!("define: {}", define);
            }
        }
    }

    Ok(())
}

fn show_descriptor(descriptor: &PackageDescriptor) {
    println!("name:        {}", descriptor.package.name);
    println!("version:     {}", descriptor.package.version);
    if let Some(license) = &descriptor.package.license {
        println!("license:     {}", license);
    }
    if let Some(homepage) = &descriptor.package.homepage {
        println!("homepage:    {}", homepage);
    }
    if let Some(description) = &descriptor.package.description {
        println!("description: {}", description);
    }

    if !descriptor.options.is_empty() {
        println!("options:");
        for option in &descriptor.options {
            println!("  {} (default: {})", option.name, option.default);
        }
    }

    if !descriptor.requirements.is_empty() {
        println!("requires:");
        for requirement in &descriptor.requirements {
            match &requirement.when {
                Some(gate) => println!(
                    "  {}/{} (when {})",
                    requirement.name, requirement.version, gate
                ),
                None => println!("  {}/{}", requirement.name, requirement.version),
            }
        }
    }

    if !descriptor.compilers.is_empty() {
        println!("compiler minimums:");
        for (compiler, minimum) in &descriptor.compilers {
            println!("  {} >= {}", compiler, minimum);
        }
    }
}

/// Parse `name=true` / `name=false` overrides onto descriptor defaults
fn build_selection(descriptor: &PackageDescriptor, overrides: &[String]) -> Result<OptionSelection> {
    let mut selection = OptionSelection::defaults(descriptor);

    for entry in overrides {
        let Some((name, value)) = entry.split_once('=') else {
            bail!("Invalid option override '{}', expected NAME=BOOL", entry);
        };
        let value: bool = value
            .parse()
            .with_context(|| format!("Invalid boolean in option override '{}'", entry))?;
        selection.set(name, value)?;
    }

    Ok(selection)
}
