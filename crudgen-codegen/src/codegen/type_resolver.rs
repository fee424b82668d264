//! GraphQL primitive to ORM column type mapping

use crate::error::{CodegenError, Result};

/// Column type of the generated ORM model and migrations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrmType {
    String,
    Integer,
    Float,
    Boolean,
    DateOnly,
    Date,
    Time,
    Json,
}

impl OrmType {
    /// Type expression as written in generated model/migration code
    pub fn to_type_string(&self) -> &'static str {
        match self {
            OrmType::String => "Sequelize.STRING",
            OrmType::Integer => "Sequelize.INTEGER",
            OrmType::Float => "Sequelize.FLOAT",
            OrmType::Boolean => "Sequelize.BOOLEAN",
            OrmType::DateOnly => "Sequelize.DATEONLY",
            OrmType::Date => "Sequelize.DATE",
            OrmType::Time => "Sequelize.TIME",
            OrmType::Json => "Sequelize.JSON",
        }
    }
}

/// Resolve attribute primitive names to ORM types
pub struct TypeResolver;

impl TypeResolver {
    /// Get the ORM type for a declared attribute primitive
    pub fn resolve(primitive: &str) -> Result<OrmType> {
        let ty = match primitive {
            "String" => OrmType::String,
            "Int" => OrmType::Integer,
            "Float" => OrmType::Float,
            "Boolean" => OrmType::Boolean,
            "Date" => OrmType::DateOnly,
            "DateTime" => OrmType::Date,
            "Time" => OrmType::Time,
            "Json" => OrmType::Json,
            other => return Err(CodegenError::UnsupportedDataType(other.to_string())),
        };
        Ok(ty)
    }
}
