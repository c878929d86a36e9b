//! External override sources
//!
//! Collects overrides from an optional TOML file and from prefixed
//! environment variables. Environment wins over the file.

use ::config::{Environment, File, FileFormat, Map, Source, Value};
use std::path::{Path, PathBuf};

use crate::config::defaults::ENV_PREFIX;
use crate::config::overrides::Overrides;
use crate::shared::error::ConfigError;

/// Where overrides are read from
#[derive(Debug, Clone)]
pub struct OverrideSources {
    file: Option<PathBuf>,
    prefix: String,
}

impl Default for OverrideSources {
    fn default() -> Self {
        Self {
            file: None,
            prefix: ENV_PREFIX.to_string(),
        }
    }
}

impl OverrideSources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a required TOML file
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Replace the environment prefix (`TRAINCONF` by default)
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Read every source into one flat mapping
    pub fn collect(&self) -> Result<Overrides, ConfigError> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = &self.file {
            builder = builder.add_source(
                File::from(path.as_path())
                    .format(FileFormat::Toml)
                    .required(true),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix(&self.prefix)
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("devices"),
        );

        let merged = builder.build()?;
        let table: Map<String, Value> = Source::collect(&merged)?;
        tracing::debug!(
            file = ?self.file,
            prefix = %self.prefix,
            keys = table.len(),
            "Collected configuration overrides"
        );
        Ok(Overrides::from(table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::store::load;

    fn temp_toml(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "trainconf-{}-{}.toml",
            std::process::id(),
            name
        ));
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_collect_from_file() {
        let path = temp_toml("file", "epochs_max = 12\ndevices = [0, 1]\nspace = \"linear\"\n");
        let overrides = OverrideSources::new()
            .with_prefix("TRAINCONF_TEST_FILE_ONLY")
            .with_file(&path)
            .collect()
            .unwrap();
        std::fs::remove_file(&path).ok();

        let config = load(Some(&overrides)).unwrap();
        assert_eq!(config.epochs_max(), 12);
        assert_eq!(config.devices(), &[0, 1]);
        assert_eq!(config.space().as_str(), "linear");
    }

    #[test]
    fn test_env_overrides_file() {
        let path = temp_toml("env", "patience = 2\npatience_stop = 4\n");
        std::env::set_var("TRAINCONF_TEST_ENV_PATIENCE_STOP", "6");
        std::env::set_var("TRAINCONF_TEST_ENV_DEVICES", "3,1,2");
        let overrides = OverrideSources::new()
            .with_prefix("TRAINCONF_TEST_ENV")
            .with_file(&path)
            .collect();
        std::env::remove_var("TRAINCONF_TEST_ENV_PATIENCE_STOP");
        std::env::remove_var("TRAINCONF_TEST_ENV_DEVICES");
        std::fs::remove_file(&path).ok();

        let config = load(Some(&overrides.unwrap())).unwrap();
        assert_eq!(config.patience(), 2);
        assert_eq!(config.patience_stop(), 6);
        assert_eq!(config.devices(), &[3, 1, 2]);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = OverrideSources::new()
            .with_prefix("TRAINCONF_TEST_MISSING")
            .with_file("/definitely/not/here/trainconf.toml")
            .collect();
        assert!(matches!(result, Err(ConfigError::Source(_))));
    }

    #[test]
    fn test_unknown_env_key_surfaces_on_load() {
        std::env::set_var("TRAINCONF_TEST_UNKNOWN_BATCH_SIZE", "64");
        let overrides = OverrideSources::new()
            .with_prefix("TRAINCONF_TEST_UNKNOWN")
            .collect();
        std::env::remove_var("TRAINCONF_TEST_UNKNOWN_BATCH_SIZE");

        let err = load(Some(&overrides.unwrap())).unwrap_err();
        assert_eq!(err, ConfigError::UnknownKey("batch_size".to_string()));
    }
}
