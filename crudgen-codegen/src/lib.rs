//! crudgen-codegen: Generate a GraphQL + ORM server skeleton from JSON data-model definitions
//!
//! Each definition file describes one entity: its storage type, attributes and
//! associations. The generator classifies every association, assembles a
//! per-entity options record, and renders from it:
//!
//! - GraphQL schema and resolvers
//! - ORM models (or remote-service model skeletons)
//! - Table, foreign-key and join-table migrations
//!
//! # Usage in build.rs
//!
//! Configure in your `Cargo.toml`:
//!
//! ```toml
//! [package.metadata.crudgen-codegen]
//! models_dir = "models"
//! output_dir = "server"
//! ```
//!
//! Then use a minimal `build.rs`:
//!
//! ```rust,ignore
//! fn main() {
//!     crudgen_codegen::generate_from_cargo_metadata()
//!         .expect("Failed to generate server code");
//! }
//! ```
//!
//! # Alternative: Programmatic Configuration
//!
//! ```rust,ignore
//! let report = crudgen_codegen::CodegenBuilder::new("models")
//!     .output_dir("server")
//!     .exclude_models(&["draft"])
//!     .generate()?;
//! println!("{} files written", report.written.len());
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! crudgen-codegen --models ./models --output ./server generate
//! ```

pub mod codegen;
pub mod config;
pub mod error;
pub mod parser;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use codegen::{BuiltinRenderer, CodeGenerator, DryRunWriter, FsWriter};
pub use codegen::{EntityOptions, GenerationReport};
pub use config::CodegenConfig;
pub use error::{CodegenError, Result};

/// Main entry point for code generation
///
/// Only an unreadable models directory fails the call; per-entity and
/// per-artifact failures are listed in the returned report.
pub fn generate(config: &CodegenConfig) -> Result<GenerationReport> {
    info!("Reading model definitions from {:?}", config.models_dir);
    let definitions = parser::load_definitions(&config.models_dir)?;
    info!("Found {} definition files", definitions.len());

    let definitions = filter_entities(definitions, &config.include_models, &config.exclude_models);
    debug!(
        "After filtering: {} definitions (include={}, exclude={})",
        definitions.len(),
        config.include_models,
        config.exclude_models
    );

    let report = if config.dry_run {
        CodeGenerator::new(config, BuiltinRenderer, DryRunWriter).generate(definitions)
    } else {
        let writer = FsWriter::with_format_command(config.format_command.clone());
        CodeGenerator::new(config, BuiltinRenderer, writer).generate(definitions)
    };

    info!("Code generation complete");
    Ok(report)
}

/// Filter definitions based on include/exclude patterns
///
/// Definitions that failed to parse have no model name and are kept so their
/// failure shows up in the report.
fn filter_entities(
    definitions: Vec<parser::LoadedDefinition>,
    include: &str,
    exclude: &str,
) -> Vec<parser::LoadedDefinition> {
    let include_all = include.trim() == "*" || include.trim().is_empty();
    let include_set: HashSet<String> = if include_all {
        HashSet::new()
    } else {
        include.split(',').map(|s| s.trim().to_string()).collect()
    };
    let exclude_set: HashSet<String> = exclude
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    definitions
        .into_iter()
        .filter(|loaded| match &loaded.definition {
            Ok(definition) => {
                let name = &definition.name;
                let included = include_all || include_set.contains(name);
                let excluded = exclude_set.contains(name);
                included && !excluded
            }
            Err(_) => true,
        })
        .collect()
}

/// Builder pattern for easy configuration in build.rs
pub struct CodegenBuilder {
    config: CodegenConfig,
}

impl CodegenBuilder {
    /// Create a new builder reading definitions from the given directory
    pub fn new(models_dir: impl AsRef<Path>) -> Self {
        Self {
            config: CodegenConfig::default_with_models(models_dir.as_ref().to_path_buf()),
        }
    }

    /// Set the root directory of the generated sources
    pub fn output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config.output_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set models to include
    pub fn include_models(mut self, models: &[&str]) -> Self {
        self.config.include_models = models.join(",");
        self
    }

    /// Set models to exclude
    pub fn exclude_models(mut self, models: &[&str]) -> Self {
        self.config.exclude_models = models.join(",");
        self
    }

    /// Skip table and association migrations
    pub fn without_migrations(mut self) -> Self {
        self.config.generate_migrations = false;
        self
    }

    /// Skip associations of unknown type instead of failing their entity
    pub fn lenient_associations(mut self) -> Self {
        self.config.strict_associations = false;
        self
    }

    /// Run a formatter command on every written file
    pub fn format_command(mut self, command: &str) -> Self {
        self.config.format_command = Some(command.to_string());
        self
    }

    /// Enable dry run mode (preview without writing files)
    pub fn dry_run(mut self) -> Self {
        self.config.dry_run = true;
        self
    }

    /// Generate the code
    pub fn generate(self) -> Result<GenerationReport> {
        generate(&self.config)
    }
}

/// Configuration for `[package.metadata.crudgen-codegen]` in Cargo.toml
#[derive(Debug, Clone, Default, serde::Deserialize)]
struct CargoMetadataConfig {
    /// Directory of JSON definitions (required)
    models_dir: Option<String>,

    /// Output directory (optional, defaults to OUT_DIR)
    output_dir: Option<String>,

    /// Models to include (optional, defaults to all)
    #[serde(default)]
    include_models: Vec<String>,

    /// Models to exclude (optional)
    #[serde(default)]
    exclude_models: Vec<String>,

    /// Whether to generate migrations (default: true)
    generate_migrations: Option<bool>,

    /// Whether unknown association types fail their entity (default: true)
    strict_associations: Option<bool>,

    /// Formatter run on every written file
    format_command: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct CargoToml {
    package: Option<CargoPackage>,
}

#[derive(Debug, serde::Deserialize)]
struct CargoPackage {
    metadata: Option<CargoPackageMetadata>,
}

#[derive(Debug, serde::Deserialize)]
struct CargoPackageMetadata {
    #[serde(rename = "crudgen-codegen")]
    crudgen_codegen: Option<CargoMetadataConfig>,
}

/// Generate code from `[package.metadata.crudgen-codegen]` in Cargo.toml
///
/// Unlike [`generate`], any failed entity or artifact turns into
/// [`CodegenError::Incomplete`] so the build stops.
///
/// ```toml
/// [package.metadata.crudgen-codegen]
/// models_dir = "models"
/// exclude_models = ["draft"]
/// strict_associations = false
/// ```
pub fn generate_from_cargo_metadata() -> Result<GenerationReport> {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").map_err(|_| {
        CodegenError::ConfigError(
            "CARGO_MANIFEST_DIR not set - are you running from build.rs?".into(),
        )
    })?;

    let cargo_toml_path = PathBuf::from(&manifest_dir).join("Cargo.toml");
    let cargo_toml_content = std::fs::read_to_string(&cargo_toml_path)?;

    let cargo_toml: CargoToml = toml::from_str(&cargo_toml_content).map_err(|e| {
        CodegenError::ConfigError(format!(
            "Failed to parse {}: {}",
            cargo_toml_path.display(),
            e
        ))
    })?;

    let metadata_config = cargo_toml
        .package
        .and_then(|p| p.metadata)
        .and_then(|m| m.crudgen_codegen)
        .ok_or_else(|| {
            CodegenError::ConfigError(
                "Missing [package.metadata.crudgen-codegen] section in Cargo.toml".into(),
            )
        })?;

    let models_dir = metadata_config.models_dir.ok_or_else(|| {
        CodegenError::ConfigError(
            "models_dir is required in [package.metadata.crudgen-codegen]".into(),
        )
    })?;

    // Resolve models_dir relative to manifest dir
    let models_path = PathBuf::from(&manifest_dir).join(&models_dir);

    let mut builder = CodegenBuilder::new(&models_path);

    if let Some(output_dir) = metadata_config.output_dir {
        builder = builder.output_dir(PathBuf::from(&manifest_dir).join(output_dir));
    } else {
        let out_dir = std::env::var("OUT_DIR").map(PathBuf::from).map_err(|_| {
            CodegenError::ConfigError("OUT_DIR not set - are you running from build.rs?".into())
        })?;
        builder = builder.output_dir(out_dir);
    }

    if !metadata_config.include_models.is_empty() {
        let models: Vec<&str> = metadata_config
            .include_models
            .iter()
            .map(|s| s.as_str())
            .collect();
        builder = builder.include_models(&models);
    }
    if !metadata_config.exclude_models.is_empty() {
        let models: Vec<&str> = metadata_config
            .exclude_models
            .iter()
            .map(|s| s.as_str())
            .collect();
        builder = builder.exclude_models(&models);
    }

    if let Some(false) = metadata_config.generate_migrations {
        builder = builder.without_migrations();
    }
    if let Some(false) = metadata_config.strict_associations {
        builder = builder.lenient_associations();
    }
    if let Some(command) = metadata_config.format_command {
        builder = builder.format_command(&command);
    }

    println!("cargo:rerun-if-changed={}", models_path.display());
    println!("cargo:rerun-if-changed={}", cargo_toml_path.display());

    builder.generate()?.into_result()
}
