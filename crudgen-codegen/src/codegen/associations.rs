//! Association classifier
//!
//! Splits the declared associations of one entity by arity (which GraphQL
//! field shape the schema gets) and by resolution mechanism: associations
//! between two relational entities are resolved by the ORM ("implicit"),
//! everything that crosses a storage boundary needs a hand-rolled resolver
//! ("explicit").

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, warn};

use super::attributes::attributes_to_string;
use super::naming::{capitalize, pluralize, uncapitalize};
use crate::error::{CodegenError, Result};
use crate::parser::{Arity, AssociationKind, AssociationSpec, RelationShape, StorageType};

/// GraphQL type of foreign-key attributes added to mutations
pub const FOREIGN_KEY_TYPE: &str = "Int";

/// What to do with an association whose `type` is not recognized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnsupportedKindPolicy {
    /// Fail classification of the owning entity
    #[default]
    Reject,
    /// Log, record in [`AssociationsInfo::unsupported`] and carry on
    Skip,
}

/// A declared association decorated with every spelling templates need
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedAssociation {
    pub name: String,
    pub name_lc: String,
    pub name_cp: String,
    pub kind: AssociationKind,
    pub shape: RelationShape,
    pub target: String,
    pub target_lc: String,
    pub target_lc_pl: String,
    pub target_pl: String,
    pub target_cp: String,
    pub target_cp_pl: String,
    pub target_storage_type: StorageType,
    pub target_key: Option<String>,
    pub source_key: Option<String>,
    pub keys_in: Option<String>,
}

impl ClassifiedAssociation {
    pub fn new(name: &str, kind: AssociationKind, spec: &AssociationSpec) -> Self {
        let target = spec.target.as_str();
        Self {
            name: name.to_string(),
            name_lc: uncapitalize(name),
            name_cp: capitalize(name),
            kind,
            shape: kind.shape(),
            target: target.to_string(),
            target_lc: uncapitalize(target),
            target_lc_pl: pluralize(&uncapitalize(target)),
            target_pl: pluralize(target),
            target_cp: capitalize(target),
            target_cp_pl: capitalize(&pluralize(target)),
            target_storage_type: spec.target_storage_type,
            target_key: spec.target_key.clone(),
            source_key: spec.source_key.clone(),
            keys_in: spec.keys_in.clone(),
        }
    }

    pub fn arity(&self) -> Arity {
        self.kind.arity()
    }
}

/// GraphQL field data for a to-many association
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManyTarget {
    pub target: String,
    pub target_cp: String,
    pub target_cp_pl: String,
}

/// Associations grouped by relation shape; every shape is always present
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeBuckets {
    belongs_to: Vec<ClassifiedAssociation>,
    has_one: Vec<ClassifiedAssociation>,
    has_many: Vec<ClassifiedAssociation>,
    belongs_to_many: Vec<ClassifiedAssociation>,
}

impl ShapeBuckets {
    pub fn get(&self, shape: RelationShape) -> &[ClassifiedAssociation] {
        match shape {
            RelationShape::BelongsTo => &self.belongs_to,
            RelationShape::HasOne => &self.has_one,
            RelationShape::HasMany => &self.has_many,
            RelationShape::BelongsToMany => &self.belongs_to_many,
        }
    }

    fn push(&mut self, association: ClassifiedAssociation) {
        let bucket = match association.shape {
            RelationShape::BelongsTo => &mut self.belongs_to,
            RelationShape::HasOne => &mut self.has_one,
            RelationShape::HasMany => &mut self.has_many,
            RelationShape::BelongsToMany => &mut self.belongs_to_many,
        };
        bucket.push(association);
    }

    pub fn len(&self) -> usize {
        RelationShape::ALL.iter().map(|s| self.get(*s).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All associations, grouped by shape in [`RelationShape::ALL`] order
    pub fn iter(&self) -> impl Iterator<Item = &ClassifiedAssociation> {
        RelationShape::ALL
            .into_iter()
            .flat_map(move |shape| self.get(shape).iter())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.iter().any(|a| a.name == name)
    }
}

/// An association skipped under [`UnsupportedKindPolicy::Skip`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsupportedAssociation {
    pub name: String,
    pub kind: String,
}

/// Classification of all associations of one entity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociationsInfo {
    pub schema_attributes_many: IndexMap<String, ManyTarget>,
    pub schema_attributes_one: IndexMap<String, String>,
    pub explicit_resolvers: ShapeBuckets,
    pub implicit_associations: ShapeBuckets,
    /// Extra scalar arguments of create/update mutations, flattened
    pub mutation_attributes: String,
    pub unsupported: Vec<UnsupportedAssociation>,
}

impl AssociationsInfo {
    /// Total associations across both resolution buckets
    pub fn classified_count(&self) -> usize {
        self.explicit_resolvers.len() + self.implicit_associations.len()
    }
}

/// Classify the associations of an entity stored in `storage_type`
pub fn classify_associations(
    associations: &IndexMap<String, AssociationSpec>,
    storage_type: StorageType,
    policy: UnsupportedKindPolicy,
) -> Result<AssociationsInfo> {
    let mut info = AssociationsInfo::default();
    let mut mutation_attributes: IndexMap<String, String> = IndexMap::new();

    for (name, spec) in associations.iter() {
        let Some(kind) = AssociationKind::from_type(&spec.kind) else {
            match policy {
                UnsupportedKindPolicy::Reject => {
                    return Err(CodegenError::UnsupportedAssociationKind {
                        association: name.to_string(),
                        kind: spec.kind.clone(),
                    });
                }
                UnsupportedKindPolicy::Skip => {
                    warn!(
                        "Association type {} not supported, skipping '{}'",
                        spec.kind, name
                    );
                    info.unsupported.push(UnsupportedAssociation {
                        name: name.to_string(),
                        kind: spec.kind.clone(),
                    });
                    continue;
                }
            }
        };

        check_required_keys(name, kind, spec)?;

        if kind.shape() == RelationShape::BelongsTo {
            if let Some(target_key) = &spec.target_key {
                mutation_attributes.insert(target_key.clone(), FOREIGN_KEY_TYPE.to_string());
            }
        }

        match kind.arity() {
            Arity::Many => {
                info.schema_attributes_many.insert(
                    name.clone(),
                    ManyTarget {
                        target: spec.target.clone(),
                        target_cp: capitalize(&spec.target),
                        target_cp_pl: capitalize(&pluralize(&spec.target)),
                    },
                );
            }
            Arity::One => {
                info.schema_attributes_one.insert(name.clone(), spec.target.clone());
            }
        }

        let association = ClassifiedAssociation::new(name, kind, spec);
        if storage_type.is_relational() && spec.target_storage_type.is_relational() {
            debug!("{} ({}) -> implicit association", name, kind);
            info.implicit_associations.push(association);
        } else {
            debug!("{} ({}) -> explicit resolver", name, kind);
            info.explicit_resolvers.push(association);
        }
    }

    info.mutation_attributes = attributes_to_string(&mutation_attributes);
    Ok(info)
}

fn check_required_keys(name: &str, kind: AssociationKind, spec: &AssociationSpec) -> Result<()> {
    let missing = match kind.shape() {
        RelationShape::BelongsTo if spec.target_key.is_none() => Some("targetKey"),
        RelationShape::BelongsToMany if spec.keys_in.is_none() => Some("keysIn"),
        _ => None,
    };
    match missing {
        Some(field) => Err(CodegenError::malformed(
            format!("association '{}'", name),
            format!("{} requires {}", kind, field),
        )),
        None => Ok(()),
    }
}
