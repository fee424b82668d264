//! Model definition parser module using serde_json

mod definition;
mod definition_parser;

pub use definition::*;
pub use definition_parser::*;
