//! Main code generator orchestrator
//!
//! Entities are processed one at a time in input order. Every artifact is
//! rendered and written independently; its outcome lands in the
//! [`GenerationReport`] and never stops sibling artifacts or later entities.

use std::collections::HashSet;
use std::path::PathBuf;

use tracing::{debug, error, info, warn};

use super::associations::UnsupportedKindPolicy;
use super::commons;
use super::migration_namer::MigrationNamer;
use super::options::{build_options, EntityOptions};
use super::renderer::{IndexedModel, Renderer, Template, TemplateContext};
use super::writer::ArtifactWriter;
use crate::config::CodegenConfig;
use crate::error::{CodegenError, Result};
use crate::parser::{LoadedDefinition, RelationShape, StorageType};

pub const SCHEMAS_DIR: &str = "schemas";
pub const RESOLVERS_DIR: &str = "resolvers";
pub const MODELS_DIR: &str = "models";
pub const WEBSERVICE_MODELS_DIR: &str = "models-webservice";

/// An artifact the orchestrator intends to produce
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedArtifact {
    pub template: Template,
    pub path: PathBuf,
}

impl PlannedArtifact {
    fn new(template: Template, path: PathBuf) -> Self {
        Self { template, path }
    }
}

/// An entity that could not be loaded or classified
#[derive(Debug)]
pub struct EntityFailure {
    pub path: PathBuf,
    pub error: CodegenError,
}

/// An artifact that could not be rendered or written
#[derive(Debug)]
pub struct ArtifactFailure {
    pub path: PathBuf,
    /// `None` for static files
    pub template: Option<Template>,
    pub error: CodegenError,
}

/// Outcome of one generation run
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Entities whose options were assembled, in processing order
    pub entities: Vec<String>,
    pub written: Vec<PathBuf>,
    pub entity_failures: Vec<EntityFailure>,
    pub artifact_failures: Vec<ArtifactFailure>,
}

impl GenerationReport {
    pub fn failure_count(&self) -> usize {
        self.entity_failures.len() + self.artifact_failures.len()
    }

    pub fn is_success(&self) -> bool {
        self.failure_count() == 0
    }

    /// Turn a report with failures into [`CodegenError::Incomplete`]
    pub fn into_result(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(CodegenError::Incomplete {
                failures: self.failure_count(),
            })
        }
    }
}

/// Main code generator that orchestrates rendering and writing
pub struct CodeGenerator<'a, R, W> {
    config: &'a CodegenConfig,
    renderer: R,
    writer: W,
    namer: MigrationNamer,
}

impl<'a, R: Renderer, W: ArtifactWriter> CodeGenerator<'a, R, W> {
    /// Create a new code generator with the given configuration
    pub fn new(config: &'a CodegenConfig, renderer: R, writer: W) -> Self {
        Self {
            config,
            renderer,
            writer,
            namer: MigrationNamer::new(),
        }
    }

    /// Replace the migration namer (e.g. to pin the clock)
    pub fn with_namer(mut self, namer: MigrationNamer) -> Self {
        self.namer = namer;
        self
    }

    fn policy(&self) -> UnsupportedKindPolicy {
        if self.config.strict_associations {
            UnsupportedKindPolicy::Reject
        } else {
            UnsupportedKindPolicy::Skip
        }
    }

    /// Generate every artifact for the given definitions
    pub fn generate(&mut self, definitions: Vec<LoadedDefinition>) -> GenerationReport {
        let mut report = GenerationReport::default();
        let mut assembled: Vec<EntityOptions> = Vec::new();
        let policy = self.policy();

        for loaded in definitions {
            let options = loaded
                .definition
                .and_then(|definition| build_options(&definition, policy));
            let options = match options {
                Ok(options) => options,
                Err(err) => {
                    error!("Skipping {}: {}", loaded.path.display(), err);
                    report.entity_failures.push(EntityFailure {
                        path: loaded.path,
                        error: err,
                    });
                    continue;
                }
            };

            info!("Generating {} ({})", options.name, options.storage_type);
            for artifact in self.plan_entity(&options) {
                self.emit(
                    artifact.template,
                    TemplateContext::Entity(&options),
                    artifact.path,
                    &mut report,
                );
            }
            report.entities.push(options.name.clone());
            assembled.push(options);
        }

        // Named after every base-table migration so they always sort after them
        if self.config.generate_migrations {
            self.generate_association_migrations(&assembled, &mut report);
        }
        self.generate_batch_files(&assembled, &mut report);

        info!(
            "Generated {} file(s) for {} entities, {} failure(s)",
            report.written.len(),
            report.entities.len(),
            report.failure_count()
        );
        report
    }

    /// Artifacts of one entity, excluding association migrations
    pub fn plan_entity(&mut self, options: &EntityOptions) -> Vec<PlannedArtifact> {
        let config = self.config;
        let out = &config.output_dir;
        let file_name = format!("{}.js", options.name_lc);

        match options.storage_type {
            StorageType::Sql => {
                let mut plan = vec![
                    PlannedArtifact::new(Template::Schema, out.join(SCHEMAS_DIR).join(&file_name)),
                    PlannedArtifact::new(
                        Template::Resolvers,
                        out.join(RESOLVERS_DIR).join(&file_name),
                    ),
                    PlannedArtifact::new(Template::Model, out.join(MODELS_DIR).join(&file_name)),
                ];
                if config.generate_migrations {
                    plan.push(PlannedArtifact::new(
                        Template::Migration,
                        self.namer.next_path(out, &options.name_lc),
                    ));
                }
                plan
            }
            StorageType::Webservice => vec![
                PlannedArtifact::new(Template::Schema, out.join(SCHEMAS_DIR).join(&file_name)),
                PlannedArtifact::new(
                    Template::WebserviceModel,
                    out.join(WEBSERVICE_MODELS_DIR).join(&file_name),
                ),
                PlannedArtifact::new(
                    Template::WebserviceResolvers,
                    out.join(RESOLVERS_DIR).join(&file_name),
                ),
            ],
        }
    }

    /// Add-column and join-table migrations for implicit associations
    fn generate_association_migrations(
        &mut self,
        assembled: &[EntityOptions],
        report: &mut GenerationReport,
    ) {
        let config = self.config;
        let mut through_tables: HashSet<&str> = HashSet::new();

        for owner in assembled.iter().filter(|o| o.is_relational()) {
            let implicit = &owner.associations.implicit_associations;

            for association in implicit.get(RelationShape::BelongsTo) {
                let column = association.target_key.as_deref().unwrap_or_default();
                let path = self.namer.next_path(
                    &config.output_dir,
                    &format!("z-column-{}-to-{}", column, owner.table),
                );
                self.emit(
                    Template::AssociationMigration,
                    TemplateContext::Association { owner, association },
                    path,
                    report,
                );
            }

            for association in implicit.get(RelationShape::BelongsToMany) {
                let keys_in = association.keys_in.as_deref().unwrap_or_default();
                if !through_tables.insert(keys_in) {
                    warn!(
                        "Join table {} already generated, skipping '{}' of {}",
                        keys_in, association.name, owner.name
                    );
                    continue;
                }
                let path = self
                    .namer
                    .next_path(&config.output_dir, &format!("z-through-{}", keys_in));
                self.emit(
                    Template::ThroughMigration,
                    TemplateContext::Association { owner, association },
                    path,
                    report,
                );
            }
        }
    }

    /// Resolvers index plus the static shared files
    fn generate_batch_files(&self, assembled: &[EntityOptions], report: &mut GenerationReport) {
        let out = &self.config.output_dir;

        let models: Vec<IndexedModel> = assembled
            .iter()
            .map(|o| IndexedModel {
                name: o.name.clone(),
                name_lc: o.name_lc.clone(),
            })
            .collect();
        self.emit(
            Template::ResolversIndex,
            TemplateContext::Index(&models),
            out.join(RESOLVERS_DIR).join("index.js"),
            report,
        );

        self.write_static(
            out.join(SCHEMAS_DIR).join("commons.js"),
            commons::schema_commons(),
            report,
        );
        self.write_static(
            out.join(MODELS_DIR).join("index.js"),
            commons::models_index(),
            report,
        );
    }

    fn emit(
        &self,
        template: Template,
        context: TemplateContext<'_>,
        path: PathBuf,
        report: &mut GenerationReport,
    ) {
        let outcome = self
            .renderer
            .render(template, &context)
            .and_then(|contents| self.writer.write(&path, &contents));
        match outcome {
            Ok(()) => {
                debug!("{} written ({})", path.display(), template);
                report.written.push(path);
            }
            Err(err) => {
                error!("Failed to generate {}: {}", path.display(), err);
                report.artifact_failures.push(ArtifactFailure {
                    path,
                    template: Some(template),
                    error: err,
                });
            }
        }
    }

    fn write_static(&self, path: PathBuf, contents: &str, report: &mut GenerationReport) {
        match self.writer.write(&path, contents) {
            Ok(()) => report.written.push(path),
            Err(err) => {
                error!("Failed to write {}: {}", path.display(), err);
                report.artifact_failures.push(ArtifactFailure {
                    path,
                    template: None,
                    error: err,
                });
            }
        }
    }
}
