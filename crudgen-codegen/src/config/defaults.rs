//! Default configuration values - single source of truth

/// Default include models pattern (all models)
pub const INCLUDE_MODELS: &str = "*";

/// Default exclude models pattern (none)
pub const EXCLUDE_MODELS: &str = "";

/// Default root of the generated server sources
pub const OUTPUT_DIR: &str = "./generated";

/// Whether to generate migration files by default
pub const GENERATE_MIGRATIONS: bool = true;

/// Whether an unknown association type fails its entity
pub const STRICT_ASSOCIATIONS: bool = true;

/// Whether to run in dry-run mode by default
pub const DRY_RUN: bool = false;

/// Config file looked up by `CodegenConfig::load` when none is given
pub const CONFIG_FILE_NAME: &str = "crudgen-codegen";

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "CRUDGEN_CODEGEN";
