//! Template rendering contract and the built-in renderer

use std::fmt;

use super::associations::ClassifiedAssociation;
use super::options::EntityOptions;
use super::{migration_generator, model_generator, resolver_generator, schema_generator};
use crate::error::{CodegenError, Result};

/// Artifact templates the orchestrator can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Template {
    Schema,
    Resolvers,
    Model,
    Migration,
    WebserviceModel,
    WebserviceResolvers,
    AssociationMigration,
    ThroughMigration,
    ResolversIndex,
}

impl Template {
    pub fn name(&self) -> &'static str {
        match self {
            Template::Schema => "create-schemas",
            Template::Resolvers => "create-resolvers",
            Template::Model => "create-models",
            Template::Migration => "create-migrations",
            Template::WebserviceModel => "create-models-webservice",
            Template::WebserviceResolvers => "create-resolvers-webservice",
            Template::AssociationMigration => "create-association-migration",
            Template::ThroughMigration => "create-through-migration",
            Template::ResolversIndex => "create-resolvers-index",
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A model listed in the resolvers index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedModel {
    pub name: String,
    pub name_lc: String,
}

/// Data handed to a template
#[derive(Debug, Clone, Copy)]
pub enum TemplateContext<'a> {
    Entity(&'a EntityOptions),
    Association {
        owner: &'a EntityOptions,
        association: &'a ClassifiedAssociation,
    },
    Index(&'a [IndexedModel]),
}

/// Turns a template plus its context into source text
pub trait Renderer {
    fn render(&self, template: Template, context: &TemplateContext<'_>) -> Result<String>;
}

/// Renderer emitting GraphQL + Sequelize style JavaScript
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinRenderer;

impl Renderer for BuiltinRenderer {
    fn render(&self, template: Template, context: &TemplateContext<'_>) -> Result<String> {
        match (template, context) {
            (Template::Schema, TemplateContext::Entity(opts)) => {
                Ok(schema_generator::generate_schema(opts))
            }
            (Template::Resolvers, TemplateContext::Entity(opts)) => {
                Ok(resolver_generator::generate_resolvers(opts))
            }
            (Template::WebserviceResolvers, TemplateContext::Entity(opts)) => {
                Ok(resolver_generator::generate_webservice_resolvers(opts))
            }
            (Template::Model, TemplateContext::Entity(opts)) => model_generator::generate_model(opts),
            (Template::WebserviceModel, TemplateContext::Entity(opts)) => {
                Ok(model_generator::generate_webservice_model(opts))
            }
            (Template::Migration, TemplateContext::Entity(opts)) => {
                migration_generator::generate_table_migration(opts)
            }
            (Template::AssociationMigration, TemplateContext::Association { owner, association }) => {
                Ok(migration_generator::generate_column_migration(owner, association))
            }
            (Template::ThroughMigration, TemplateContext::Association { owner, association }) => {
                Ok(migration_generator::generate_through_migration(owner, association))
            }
            (Template::ResolversIndex, TemplateContext::Index(models)) => {
                Ok(resolver_generator::generate_resolvers_index(models))
            }
            (template, _) => Err(CodegenError::TemplateError(format!(
                "{} rendered with a mismatched context",
                template
            ))),
        }
    }
}
