//! Configuration settings for crudgen-codegen

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::defaults;
use crate::error::{CodegenError, Result};

/// Main configuration struct for code generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodegenConfig {
    /// Directory holding the JSON model definitions
    #[serde(default)]
    pub models_dir: PathBuf,

    /// Root directory of the generated server sources
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Models to include (comma-separated, or "*" for all)
    #[serde(default = "default_include_models")]
    pub include_models: String,

    /// Models to exclude (comma-separated)
    #[serde(default = "default_exclude_models")]
    pub exclude_models: String,

    /// Whether to generate table and association migrations
    #[serde(default = "default_generate_migrations")]
    pub generate_migrations: bool,

    /// Fail an entity on an unknown association type instead of skipping the association
    #[serde(default = "default_strict_associations")]
    pub strict_associations: bool,

    /// Formatter run on every written file, e.g. "prettier --write"
    #[serde(default)]
    pub format_command: Option<String>,

    /// Dry run mode - preview without writing files
    #[serde(default = "default_dry_run")]
    pub dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    /// Can be overridden by RUST_LOG env var
    #[serde(default)]
    pub log_level: Option<String>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(defaults::OUTPUT_DIR)
}
fn default_include_models() -> String {
    defaults::INCLUDE_MODELS.to_string()
}
fn default_exclude_models() -> String {
    defaults::EXCLUDE_MODELS.to_string()
}
fn default_generate_migrations() -> bool {
    defaults::GENERATE_MIGRATIONS
}
fn default_strict_associations() -> bool {
    defaults::STRICT_ASSOCIATIONS
}
fn default_dry_run() -> bool {
    defaults::DRY_RUN
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            models_dir: PathBuf::new(),
            output_dir: default_output_dir(),
            include_models: default_include_models(),
            exclude_models: default_exclude_models(),
            generate_migrations: default_generate_migrations(),
            strict_associations: default_strict_associations(),
            format_command: None,
            dry_run: default_dry_run(),
            log_level: None,
        }
    }
}

impl CodegenConfig {
    /// Create a default config reading definitions from `models_dir`
    pub fn default_with_models(models_dir: PathBuf) -> Self {
        Self {
            models_dir,
            ..Default::default()
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: CodegenConfig = toml::from_str(&content).map_err(|e| {
            CodegenError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(config)
    }

    /// Load configuration using config-rs (file + environment variables)
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        } else {
            builder = builder.add_source(File::with_name(defaults::CONFIG_FILE_NAME).required(false));
        }

        // CRUDGEN_CODEGEN_MODELS_DIR, CRUDGEN_CODEGEN_DRY_RUN, ...
        builder = builder.add_source(Environment::with_prefix(defaults::ENV_PREFIX).try_parsing(true));

        let config: CodegenConfig = builder.build()?.try_deserialize()?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.models_dir.as_os_str().is_empty() {
            return Err(CodegenError::ValidationError(
                "models_dir is required".into(),
            ));
        }

        if !self.models_dir.is_dir() {
            return Err(CodegenError::ValidationError(format!(
                "Models directory not found: {}",
                self.models_dir.display()
            )));
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(CodegenError::ValidationError(
                "output_dir must not be empty".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CodegenConfig::default();
        assert_eq!(config.include_models, "*");
        assert_eq!(config.output_dir, PathBuf::from("./generated"));
        assert!(config.generate_migrations);
        assert!(config.strict_associations);
        assert!(config.format_command.is_none());
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_validation_missing_models_dir() {
        let config = CodegenConfig::default();
        assert!(config.validate().is_err());

        let config = CodegenConfig::default_with_models(PathBuf::from("/no/such/models"));
        assert!(matches!(
            config.validate(),
            Err(CodegenError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validation_ok() {
        let dir = tempfile::tempdir().unwrap();
        let config = CodegenConfig::default_with_models(dir.path().to_path_buf());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_toml() {
        let toml_content = r#"
            models_dir = "models"
            output_dir = "server"
            strict_associations = false
            format_command = "prettier --write"
            log_level = "debug"
        "#;
        let config: CodegenConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.models_dir, PathBuf::from("models"));
        assert_eq!(config.output_dir, PathBuf::from("server"));
        assert!(!config.strict_associations);
        assert!(config.generate_migrations);
        assert_eq!(config.format_command.as_deref(), Some("prettier --write"));
        assert_eq!(config.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crudgen-codegen.toml");
        std::fs::write(&path, "models_dir = \"defs\"\ngenerate_migrations = false\n").unwrap();

        let config = CodegenConfig::from_file(&path).unwrap();
        assert_eq!(config.models_dir, PathBuf::from("defs"));
        assert!(!config.generate_migrations);

        std::fs::write(&path, "models_dir = [").unwrap();
        assert!(matches!(
            CodegenConfig::from_file(&path),
            Err(CodegenError::ConfigError(_))
        ));
    }

    #[test]
    fn test_load_from_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("codegen.toml");
        std::fs::write(&path, "models_dir = \"defs\"\ninclude_models = \"book,author\"\n").unwrap();

        let config = CodegenConfig::load(Some(&path)).unwrap();
        assert_eq!(config.models_dir, PathBuf::from("defs"));
        assert_eq!(config.include_models, "book,author");
        assert_eq!(config.exclude_models, "");
    }

    #[test]
    fn test_load_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("codegen.toml");
        std::fs::write(
            &path,
            "models_dir = \"defs\"\ndry_run = false\nformat_command = \"prettier --check\"\n",
        )
        .unwrap();

        // only keys no other test reads through `load`
        std::env::set_var("CRUDGEN_CODEGEN_DRY_RUN", "true");
        std::env::set_var("CRUDGEN_CODEGEN_FORMAT_COMMAND", "prettier --write");
        let loaded = CodegenConfig::load(Some(&path));
        std::env::remove_var("CRUDGEN_CODEGEN_DRY_RUN");
        std::env::remove_var("CRUDGEN_CODEGEN_FORMAT_COMMAND");

        let config = loaded.unwrap();
        assert!(config.dry_run);
        assert_eq!(config.format_command.as_deref(), Some("prettier --write"));
        assert_eq!(config.models_dir, PathBuf::from("defs"));
    }
}
