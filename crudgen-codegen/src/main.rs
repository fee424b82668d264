//! CLI entry point for crudgen-codegen

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crudgen_codegen::codegen::{build_options, EntityOptions, UnsupportedKindPolicy};
use crudgen_codegen::config::CodegenConfig;
use crudgen_codegen::parser;

#[derive(Parser)]
#[command(name = "crudgen-codegen")]
#[command(about = "Generate a GraphQL + ORM server skeleton from JSON data-model definitions")]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory of JSON model definitions (overrides config)
    #[arg(short, long)]
    models: Option<PathBuf>,

    /// Output directory (overrides config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Dry run - show what would be generated without writing files
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate every artifact (default)
    Generate,
    /// Inspect definitions (show classified associations for debugging)
    Inspect,
    /// Print the options record of one definition as JSON
    Options {
        /// Definition file
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (before logging, so we can use config.log_level)
    let mut config = CodegenConfig::load(cli.config.as_deref())?;

    // Priority: RUST_LOG env var > config.log_level > default (debug for dev, info for release)
    let default_level = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };
    let log_level = config.log_level.as_deref().unwrap_or(default_level);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .init();

    // Apply CLI overrides
    if let Some(models) = cli.models {
        config.models_dir = models;
    }
    if let Some(output) = cli.output {
        config.output_dir = output;
    }
    if cli.dry_run {
        config.dry_run = true;
    }

    let policy = if config.strict_associations {
        UnsupportedKindPolicy::Reject
    } else {
        UnsupportedKindPolicy::Skip
    };

    match &cli.command {
        Some(Commands::Options { file }) => return print_options(file, policy),
        Some(Commands::Inspect) => {
            config.validate()?;
            return inspect_models(&config, policy);
        }
        Some(Commands::Generate) | None => {}
    }

    config.validate()?;

    info!("Generating code from models in {:?}", config.models_dir);
    let report = crudgen_codegen::generate(&config)?;

    let verb = if config.dry_run { "Would write" } else { "Wrote" };
    println!(
        "{} {} files for {} entities into {}",
        verb,
        report.written.len(),
        report.entities.len(),
        config.output_dir.display()
    );
    for failure in &report.entity_failures {
        println!("  FAILED {}: {}", failure.path.display(), failure.error);
    }
    for failure in &report.artifact_failures {
        println!("  FAILED {}: {}", failure.path.display(), failure.error);
    }

    if !report.is_success() {
        bail!("{} failure(s) during generation", report.failure_count());
    }

    info!("Code generation completed successfully");
    Ok(())
}

fn print_options(file: &Path, policy: UnsupportedKindPolicy) -> Result<()> {
    let definition = parser::load_definition(file)?;
    let options = build_options(&definition, policy)?;
    println!("{}", serde_json::to_string_pretty(&options)?);
    Ok(())
}

fn inspect_models(config: &CodegenConfig, policy: UnsupportedKindPolicy) -> Result<()> {
    let definitions = parser::load_definitions(&config.models_dir)?;

    println!("Parsed {} definitions:\n", definitions.len());
    for loaded in definitions {
        let options = loaded
            .definition
            .and_then(|definition| build_options(&definition, policy));
        match options {
            Ok(options) => print_entity(&options),
            Err(err) => println!("{}: {}\n", loaded.path.display(), err),
        }
    }

    Ok(())
}

fn print_entity(options: &EntityOptions) {
    println!("Model: {} ({})", options.name, options.storage_type);
    println!("  Table: {}", options.table);
    println!("  Attributes: {}", options.attributes_str);
    println!(
        "  String attributes: {}",
        options.array_attribute_string.join(", ")
    );

    let associations = &options.associations;
    if associations.classified_count() > 0 {
        println!("  Associations:");
        for (bucket, label) in [
            (&associations.implicit_associations, "implicit"),
            (&associations.explicit_resolvers, "explicit"),
        ] {
            for association in bucket.iter() {
                println!(
                    "    - {} -> {} [{} {}, {:?}]",
                    association.name,
                    association.target,
                    label,
                    association.shape.as_str(),
                    association.arity()
                );
            }
        }
    }
    for skipped in &associations.unsupported {
        println!("    - {} skipped (type {})", skipped.name, skipped.kind);
    }
    if !associations.mutation_attributes.is_empty() {
        println!("  Mutation attributes: {}", associations.mutation_attributes);
    }
    println!();
}
