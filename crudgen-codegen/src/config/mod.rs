//! Configuration for crudgen-codegen

pub mod defaults;
mod settings;

pub use settings::*;
