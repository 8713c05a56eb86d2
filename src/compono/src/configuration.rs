//! Typed module configuration merged from raw JSON sources.

use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use figment::providers::{Format, Json, Serialized};
use figment::Figment;
use serde::de::DeserializeOwned;
use serde_json::Value;
use snafu::prelude::*;

/// Settings handed to a module when it is constructed.
///
/// Fields absent from every source keep their [`Default`] values as long as
/// the type is marked `#[serde(default)]`.
pub trait Configuration: Default + DeserializeOwned + Send + Sync + 'static {}

impl<T> Configuration for T where T: Default + DeserializeOwned + Send + Sync + 'static {}

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ConfigurationError {
    #[snafu(display("could not read configuration file {}", path.display()))]
    #[non_exhaustive]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("could not extract the merged configuration"))]
    #[non_exhaustive]
    Extract {
        #[snafu(source(from(figment::Error, Box::new)))]
        source: Box<figment::Error>,
    },
}

enum Source {
    Raw(String),
    Value(Value),
    File(PathBuf),
}

/// Collects configuration sources and extracts their merge into `C`.
///
/// Sources are merged in the order they were added. Dictionaries merge key
/// by key, so a later source only overrides what it mentions.
pub struct ConfigurationBuilder<C> {
    sources: Vec<Source>,
    _marker: PhantomData<fn() -> C>,
}

impl<C: Configuration> ConfigurationBuilder<C> {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            _marker: PhantomData,
        }
    }

    pub fn with_raw_json_string(mut self, json: impl Into<String>) -> Self {
        self.sources.push(Source::Raw(json.into()));
        self
    }

    pub fn with_raw_json_strings<I, S>(self, jsons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        jsons
            .into_iter()
            .fold(self, |builder, json| builder.with_raw_json_string(json))
    }

    pub fn with_json_value(mut self, value: Value) -> Self {
        self.sources.push(Source::Value(value));
        self
    }

    /// Adds a JSON file. Unlike the other sources, a missing file is an
    /// error.
    pub fn with_json_file(mut self, path: impl AsRef<Path>) -> Self {
        self.sources.push(Source::File(path.as_ref().to_path_buf()));
        self
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    pub fn build(self) -> Result<C, ConfigurationError> {
        let mut figment = Figment::new();
        for source in self.sources {
            figment = match source {
                Source::Raw(json) => figment.merge(Json::string(&json)),
                Source::Value(value) => figment.merge(Serialized::defaults(value)),
                Source::File(path) => {
                    // Resolved up front so figment neither skips a missing
                    // file nor searches parent directories for it.
                    let path = fs::canonicalize(&path).context(IoSnafu { path })?;
                    figment.merge(Json::file(path))
                }
            };
        }
        figment.extract().context(ExtractSnafu)
    }
}

impl<C: Configuration> Default for ConfigurationBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Default, PartialEq, Deserialize)]
    #[serde(default)]
    struct Settings {
        value: String,
        retries: u32,
        nested: Nested,
    }

    #[derive(Debug, Default, PartialEq, Deserialize)]
    #[serde(default)]
    struct Nested {
        host: String,
        port: u16,
    }

    #[test]
    fn configuration_builder_build_succeeds_when_empty() {
        let settings = ConfigurationBuilder::<Settings>::new().build().unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn configuration_builder_build_succeeds_when_later_sources_override() {
        let settings = ConfigurationBuilder::<Settings>::new()
            .with_raw_json_strings([
                r#"{"value": "first", "retries": 3, "nested": {"host": "a", "port": 1}}"#,
                r#"{"value": "second", "nested": {"port": 2}}"#,
            ])
            .with_json_value(json!({"nested": {"host": "b"}}))
            .build()
            .unwrap();

        assert_eq!(
            settings,
            Settings {
                value: String::from("second"),
                retries: 3,
                nested: Nested {
                    host: String::from("b"),
                    port: 2,
                },
            }
        );
    }

    #[test]
    fn configuration_builder_build_succeeds_when_reading_file() {
        let path = std::env::temp_dir().join(format!(
            "compono-configuration-{}.json",
            std::process::id()
        ));
        fs::File::create(&path)
            .unwrap()
            .write_all(br#"{"value": "from-file"}"#)
            .unwrap();

        let settings = ConfigurationBuilder::<Settings>::new()
            .with_json_file(&path)
            .with_raw_json_string(r#"{"retries": 5}"#)
            .build()
            .unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(settings.value, "from-file");
        assert_eq!(settings.retries, 5);
    }

    #[test]
    fn configuration_builder_build_fails_when_source_is_invalid() {
        let err = ConfigurationBuilder::<Settings>::new()
            .with_raw_json_string("{}")
            .with_raw_json_string("{not json")
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::Extract { .. }));

        let err = ConfigurationBuilder::<Settings>::new()
            .with_raw_json_string("[1, 2]")
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::Extract { .. }));

        let err = ConfigurationBuilder::<Settings>::new()
            .with_json_file("/nonexistent/compono.json")
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::Io { .. }));

        let err = ConfigurationBuilder::<Settings>::new()
            .with_raw_json_string(r#"{"retries": "many"}"#)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::Extract { .. }));
    }
}
