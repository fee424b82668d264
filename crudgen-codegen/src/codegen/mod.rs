//! Code generation module

mod associations;
mod attributes;
mod code_generator;
mod commons;
mod migration_generator;
mod migration_namer;
mod model_generator;
mod naming;
mod options;
mod renderer;
mod resolver_generator;
mod schema_generator;
mod type_resolver;
mod writer;

pub use associations::*;
pub use attributes::*;
pub use code_generator::*;
pub use migration_namer::*;
pub use naming::*;
pub use options::*;
pub use renderer::*;
pub use type_resolver::*;
pub use writer::*;
