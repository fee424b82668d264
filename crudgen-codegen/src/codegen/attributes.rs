//! Attribute projections used by templates

use indexmap::IndexMap;

/// Name of the identifier attribute every entity carries
pub const ID_ATTRIBUTE: &str = "id";

/// GraphQL primitive treated as text
pub const TEXT_TYPE: &str = "String";

/// Flatten attributes to `"k1: v1, k2: v2"` in declaration order
pub fn attributes_to_string(attributes: &IndexMap<String, String>) -> String {
    attributes
        .iter()
        .map(|(name, ty)| format!("{}: {}", name, ty))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Names of the text-typed attributes, always led by `id`
pub fn string_attributes(attributes: &IndexMap<String, String>) -> Vec<String> {
    std::iter::once(ID_ATTRIBUTE.to_string())
        .chain(
            attributes
                .iter()
                .filter(|(name, ty)| name.as_str() != ID_ATTRIBUTE && ty.as_str() == TEXT_TYPE)
                .map(|(name, _)| name.to_string()),
        )
        .collect()
}
