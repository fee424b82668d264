//! Data structures for parsed model definitions

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Where the records of an entity live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum StorageType {
    /// Relational table managed by the ORM
    Sql,
    /// Generic remote service reached through its own read API
    Webservice,
}

impl StorageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageType::Sql => "sql",
            StorageType::Webservice => "webservice",
        }
    }

    pub fn is_relational(&self) -> bool {
        matches!(self, StorageType::Sql)
    }
}

impl FromStr for StorageType {
    type Err = String;

    /// Case-insensitive: `SQL`, `Sql` and `sql` are the same engine
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sql" => Ok(StorageType::Sql),
            "webservice" => Ok(StorageType::Webservice),
            other => Err(format!(
                "unknown storage type '{}' (expected 'sql' or 'webservice')",
                other
            )),
        }
    }
}

impl TryFrom<String> for StorageType {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arity + ownership pattern of an association, independent of storage engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationShape {
    BelongsTo,
    HasOne,
    HasMany,
    BelongsToMany,
}

impl RelationShape {
    pub const ALL: [RelationShape; 4] = [
        RelationShape::BelongsTo,
        RelationShape::HasOne,
        RelationShape::HasMany,
        RelationShape::BelongsToMany,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationShape::BelongsTo => "belongsTo",
            RelationShape::HasOne => "hasOne",
            RelationShape::HasMany => "hasMany",
            RelationShape::BelongsToMany => "belongsToMany",
        }
    }
}

impl fmt::Display for RelationShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arity {
    One,
    Many,
}

/// The recognized association `type` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssociationKind {
    #[serde(rename = "sql_hasMany")]
    SqlHasMany,
    #[serde(rename = "sql_belongsToMany")]
    SqlBelongsToMany,
    #[serde(rename = "cross_hasMany")]
    CrossHasMany,
    #[serde(rename = "sql_hasOne")]
    SqlHasOne,
    #[serde(rename = "sql_belongsTo")]
    SqlBelongsTo,
    #[serde(rename = "cross_hasOne")]
    CrossHasOne,
    #[serde(rename = "cross_belongsTo")]
    CrossBelongsTo,
}

impl AssociationKind {
    pub const ALL: [AssociationKind; 7] = [
        AssociationKind::SqlHasMany,
        AssociationKind::SqlBelongsToMany,
        AssociationKind::CrossHasMany,
        AssociationKind::SqlHasOne,
        AssociationKind::SqlBelongsTo,
        AssociationKind::CrossHasOne,
        AssociationKind::CrossBelongsTo,
    ];

    /// Parse a declared `type` value; anything outside the known set is `None`
    pub fn from_type(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssociationKind::SqlHasMany => "sql_hasMany",
            AssociationKind::SqlBelongsToMany => "sql_belongsToMany",
            AssociationKind::CrossHasMany => "cross_hasMany",
            AssociationKind::SqlHasOne => "sql_hasOne",
            AssociationKind::SqlBelongsTo => "sql_belongsTo",
            AssociationKind::CrossHasOne => "cross_hasOne",
            AssociationKind::CrossBelongsTo => "cross_belongsTo",
        }
    }

    /// The suffix token of the `type` value, after the engine prefix
    pub fn shape(&self) -> RelationShape {
        match self {
            AssociationKind::SqlBelongsTo | AssociationKind::CrossBelongsTo => {
                RelationShape::BelongsTo
            }
            AssociationKind::SqlHasOne | AssociationKind::CrossHasOne => RelationShape::HasOne,
            AssociationKind::SqlHasMany | AssociationKind::CrossHasMany => RelationShape::HasMany,
            AssociationKind::SqlBelongsToMany => RelationShape::BelongsToMany,
        }
    }

    pub fn arity(&self) -> Arity {
        match self {
            AssociationKind::SqlHasMany
            | AssociationKind::SqlBelongsToMany
            | AssociationKind::CrossHasMany => Arity::Many,
            AssociationKind::SqlHasOne
            | AssociationKind::SqlBelongsTo
            | AssociationKind::CrossHasOne
            | AssociationKind::CrossBelongsTo => Arity::One,
        }
    }
}

impl fmt::Display for AssociationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entity, as declared in a single JSON file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDefinition {
    /// Entity name
    #[serde(rename = "model")]
    pub name: String,

    pub storage_type: StorageType,

    /// Attribute name -> GraphQL primitive type name, in declaration order
    pub attributes: IndexMap<String, String>,

    /// Association name -> association description, in declaration order
    #[serde(default)]
    pub associations: IndexMap<String, AssociationSpec>,

    #[serde(default)]
    pub indices: Vec<String>,
}

/// One declared association of an entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociationSpec {
    /// Raw `type` value; parsed into [`AssociationKind`] by the classifier so
    /// that unknown kinds can be reported against the association name
    #[serde(rename = "type")]
    pub kind: String,

    pub target: String,

    pub target_storage_type: StorageType,

    /// Foreign-key attribute name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_key: Option<String>,

    /// Owner-side key of a many-to-many join table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_key: Option<String>,

    /// Join-table name (many-to-many only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keys_in: Option<String>,
}
