//! Model definition loader using serde_json

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::error::Category;
use tracing::debug;

use super::definition::*;
use crate::error::{CodegenError, Result};

/// A definition file and the outcome of parsing it
#[derive(Debug)]
pub struct LoadedDefinition {
    pub path: PathBuf,
    pub definition: Result<EntityDefinition>,
}

/// Parse one JSON model definition
///
/// `origin` names the input in error messages (usually the file path).
pub fn parse_definition(json: &str, origin: &str) -> Result<EntityDefinition> {
    let definition: EntityDefinition = serde_json::from_str(json).map_err(|e| match e.classify()
    {
        Category::Data => CodegenError::malformed(origin, e.to_string()),
        _ => CodegenError::ParseError(format!("{}: {}", origin, e)),
    })?;

    validate_definition(&definition, origin)?;
    Ok(definition)
}

/// Read and parse a single definition file
pub fn load_definition(path: &Path) -> Result<EntityDefinition> {
    let json = fs::read_to_string(path)?;
    parse_definition(&json, &path.display().to_string())
}

/// Load every `*.json` definition in a directory, in file-name order
///
/// Only an unreadable directory is an error here; a broken file is reported
/// in its own [`LoadedDefinition`] so the rest of the batch can proceed.
pub fn load_definitions(dir: &Path) -> Result<Vec<LoadedDefinition>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();

    Ok(paths
        .into_iter()
        .map(|path| {
            debug!("Reading {}", path.display());
            let definition = load_definition(&path);
            LoadedDefinition { path, definition }
        })
        .collect())
}

/// Reject identifiers that naming functions cannot handle
fn validate_definition(definition: &EntityDefinition, origin: &str) -> Result<()> {
    if definition.name.trim().is_empty() {
        return Err(CodegenError::malformed(origin, "model name is empty"));
    }

    if let Some(name) = definition.attributes.keys().find(|k| k.is_empty()) {
        return Err(CodegenError::malformed(
            origin,
            format!("attribute name '{}' is empty", name),
        ));
    }

    for (name, association) in definition.associations.iter() {
        if name.is_empty() {
            return Err(CodegenError::malformed(origin, "association name is empty"));
        }
        if association.target.is_empty() {
            return Err(CodegenError::malformed(
                origin,
                format!("association '{}' has an empty target", name),
            ));
        }
    }

    Ok(())
}
