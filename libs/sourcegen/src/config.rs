//! Run configuration

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

/// Output path used when the caller does not set one.
pub const DEFAULT_OUTPUT_PATH: &str = "src/generated";

/// Method key to string parameter, in the order entries should be processed.
pub type MethodParameters = IndexMap<String, String>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Parameters for one generation run.
///
/// ```toml
/// output_path = "src/generated"
///
/// [method_parameters]
/// "sourcegen.builtin.Structs.unit" = "demo.model.Marker"
/// ```
///
/// `path` and `methods` are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerateConfig {
    /// Directory generated files are written to.
    #[serde(default, alias = "path")]
    pub output_path: Option<String>,

    /// Generators to run. Required by [`GenerateSources::run`](crate::GenerateSources::run).
    #[serde(default, alias = "methods")]
    pub method_parameters: Option<MethodParameters>,
}

impl GenerateConfig {
    pub fn new(output_path: impl Into<String>, method_parameters: MethodParameters) -> Self {
        Self {
            output_path: Some(output_path.into()),
            method_parameters: Some(method_parameters),
        }
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// The configured output path, or [`DEFAULT_OUTPUT_PATH`].
    pub fn output_path_or_default(&self) -> &str {
        self.output_path.as_deref().unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    /// Add or replace one method entry. A replaced entry keeps its position.
    pub fn set_method(&mut self, key: impl Into<String>, parameter: impl Into<String>) {
        self.method_parameters
            .get_or_insert_with(MethodParameters::new)
            .insert(key.into(), parameter.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_table_in_document_order() {
        let config = GenerateConfig::from_toml_str(
            r#"
            output_path = "out"

            [method_parameters]
            "z.Last.first" = "1"
            "a.First.second" = "2"
            "m.Middle.third" = ""
            "#,
        )
        .unwrap();

        assert_eq!(config.output_path.as_deref(), Some("out"));
        let keys: Vec<&str> = config
            .method_parameters
            .as_ref()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["z.Last.first", "a.First.second", "m.Middle.third"]);
    }

    #[test]
    fn accepts_short_aliases() {
        let config = GenerateConfig::from_toml_str(
            r#"
            path = "gen"
            [methods]
            "a.B.c" = "x"
            "#,
        )
        .unwrap();

        assert_eq!(config.output_path_or_default(), "gen");
        assert_eq!(config.method_parameters.unwrap()["a.B.c"], "x");
    }

    #[test]
    fn missing_fields_stay_unset() {
        let config = GenerateConfig::from_toml_str("").unwrap();
        assert_eq!(config.output_path_or_default(), DEFAULT_OUTPUT_PATH);
        assert!(config.method_parameters.is_none());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(GenerateConfig::from_toml_str("outputs = \"x\"").is_err());
    }

    #[test]
    fn set_method_overrides_in_place() {
        let mut config = GenerateConfig::default();
        config.set_method("a.B.c", "1");
        config.set_method("d.E.f", "2");
        config.set_method("a.B.c", "3");

        let methods = config.method_parameters.unwrap();
        let entries: Vec<(&str, &str)> = methods
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(entries, vec![("a.B.c", "3"), ("d.E.f", "2")]);
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = GenerateConfig::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
