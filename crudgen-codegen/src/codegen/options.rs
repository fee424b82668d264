//! Per-entity options record consumed by templates

use indexmap::IndexMap;
use serde::Serialize;

use super::associations::{classify_associations, AssociationsInfo, UnsupportedKindPolicy};
use super::attributes::{attributes_to_string, string_attributes};
use super::naming::{capitalize, pluralize, uncapitalize};
use crate::error::Result;
use crate::parser::{EntityDefinition, StorageType};

/// Everything a template needs to know about one entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityOptions {
    /// Name as declared
    pub name: String,
    pub name_cp: String,
    pub name_lc: String,
    pub name_pl: String,
    pub name_pl_cp: String,
    pub storage_type: StorageType,
    /// Table name (plural, lower-case first character)
    pub table: String,
    pub attributes: IndexMap<String, String>,
    pub attributes_str: String,
    /// Text-typed attribute names, `id` first
    pub array_attribute_string: Vec<String>,
    pub associations: AssociationsInfo,
    pub indices: Vec<String>,
}

impl EntityOptions {
    /// Build options rejecting unsupported association kinds
    pub fn from_definition(definition: &EntityDefinition) -> Result<Self> {
        build_options(definition, UnsupportedKindPolicy::default())
    }

    pub fn is_relational(&self) -> bool {
        self.storage_type.is_relational()
    }

    /// Argument list of the create/update mutations: declared attributes
    /// followed by the foreign keys introduced by associations
    pub fn mutation_arguments(&self) -> String {
        [
            self.attributes_str.as_str(),
            self.associations.mutation_attributes.as_str(),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// Assemble the options record of one entity
///
/// Pure: the same definition always yields an equal record.
pub fn build_options(
    definition: &EntityDefinition,
    policy: UnsupportedKindPolicy,
) -> Result<EntityOptions> {
    let name = definition.name.as_str();
    let name_lc = uncapitalize(name);
    let name_pl = pluralize(&name_lc);

    let associations =
        classify_associations(&definition.associations, definition.storage_type, policy)?;

    Ok(EntityOptions {
        name: name.to_string(),
        name_cp: capitalize(name),
        table: name_pl.clone(),
        name_pl,
        name_pl_cp: pluralize(&capitalize(name)),
        name_lc,
        storage_type: definition.storage_type,
        attributes: definition.attributes.clone(),
        attributes_str: attributes_to_string(&definition.attributes),
        array_attribute_string: string_attributes(&definition.attributes),
        associations,
        indices: definition.indices.clone(),
    })
}
