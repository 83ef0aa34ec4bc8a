// Copyright (c) The chameleon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration support for chameleon.
//!
//! The config is layered: the defaults embedded in this crate come first, and a repository's
//! `.config/chameleon.toml` (or a file passed in explicitly) is merged on top.

use crate::errors::{ConfigParseError, ConfigParseErrorKind};
use camino::Utf8Path;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, builder::DefaultState};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Overall configuration for the chameleon reporter.
#[derive(Clone, Debug)]
pub struct ReporterConfig {
    inner: ReporterConfigImpl,
}

impl ReporterConfig {
    /// The default location of the config within a directory: `.config/chameleon.toml`.
    pub const CONFIG_PATH: &'static str = ".config/chameleon.toml";

    /// Contains the default config as a TOML file.
    ///
    /// Repository-specific configuration is layered on top of the default config.
    pub const DEFAULT_CONFIG: &'static str = include_str!("../default-config.toml");

    /// The smallest accepted spec length: room for one character plus the `...` ellipsis.
    pub const MIN_SPEC_LENGTH: usize = 4;

    /// The largest accepted spec length.
    pub const MAX_SPEC_LENGTH: usize = 1024;

    /// Reads the config from the given file, or if not specified from `.config/chameleon.toml` in
    /// `dir`.
    ///
    /// If no file is specified and `dir` doesn't have `.config/chameleon.toml`, uses the default
    /// config options.
    pub fn from_sources(
        dir: &Utf8Path,
        config_file: Option<&Utf8Path>,
    ) -> Result<Self, ConfigParseError> {
        let (config_file, source) = match config_file {
            Some(file) => (file.to_owned(), File::new(file.as_str(), FileFormat::Toml)),
            None => {
                let config_file = dir.join(Self::CONFIG_PATH);
                let source = File::new(config_file.as_str(), FileFormat::Toml).required(false);
                (config_file, source)
            }
        };
        debug!("reading reporter config from {config_file} (plus defaults)");

        let builder = Self::make_default_config().add_source(source);
        let (inner, ignored) = Self::build_and_deserialize_config(&builder)
            .map_err(|kind| ConfigParseError::new(&config_file, kind))?;

        if !ignored.is_empty() {
            warn_unknown_keys(&config_file, &ignored);
        }

        inner
            .validate()
            .map_err(|kind| ConfigParseError::new(&config_file, kind))?;
        Ok(Self { inner })
    }

    /// Returns the default config.
    pub fn default_config() -> Self {
        let config = Self::make_default_config()
            .build()
            .expect("default config is always valid");
        let inner = config
            .try_deserialize()
            .expect("default config is always valid");
        Self { inner }
    }

    /// Returns the maximum width of a rendered suite or spec label.
    pub fn spec_length(&self) -> usize {
        self.inner.reporter.spec_length
    }

    /// Returns false if colors are globally disabled.
    pub fn colors(&self) -> bool {
        self.inner.reporter.colors
    }

    /// Returns the prefixes that are removed from paths in failure logs.
    pub fn strip_path_prefixes(&self) -> &[String] {
        &self.inner.reporter.strip_path_prefixes
    }

    /// Overrides the spec length, e.g. from the command line.
    pub fn set_spec_length(&mut self, spec_length: usize) -> Result<(), ConfigParseErrorKind> {
        ReporterSection::validate_spec_length(spec_length)?;
        self.inner.reporter.spec_length = spec_length;
        Ok(())
    }

    /// Adds prefixes to strip from paths in failure logs, after the configured ones.
    pub fn extend_strip_path_prefixes(&mut self, prefixes: impl IntoIterator<Item = String>) {
        self.inner.reporter.strip_path_prefixes.extend(prefixes);
    }

    /// Serializes the resolved config as TOML.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(&self.inner).expect("reporter config always serializes to TOML")
    }

    // ---
    // Helper methods
    // ---

    fn make_default_config() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(Self::DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn build_and_deserialize_config(
        builder: &ConfigBuilder<DefaultState>,
    ) -> Result<(ReporterConfigImpl, BTreeSet<String>), ConfigParseErrorKind> {
        let config = builder
            .build_cloned()
            .map_err(|error| ConfigParseErrorKind::BuildError(Box::new(error)))?;

        let mut ignored = BTreeSet::new();
        let mut cb = |path: serde_ignored::Path| {
            ignored.insert(path.to_string());
        };
        let ignored_de = serde_ignored::Deserializer::new(config, &mut cb);
        let config: ReporterConfigImpl =
            serde_path_to_error::deserialize(ignored_de).map_err(|error| {
                // The config crate also reports the key; drop it in favor of the path.
                let path = error.path().clone();
                let error = match error.into_inner() {
                    ConfigError::At { error, .. } => *error,
                    other => other,
                };
                ConfigParseErrorKind::DeserializeError(Box::new(serde_path_to_error::Error::new(
                    path, error,
                )))
            })?;

        Ok((config, ignored))
    }
}

fn warn_unknown_keys(config_file: &Utf8Path, unknown: &BTreeSet<String>) {
    let mut unknown_str = String::new();
    if unknown.len() == 1 {
        // Print this on the same line.
        unknown_str.push_str("key: ");
        unknown_str.push_str(unknown.iter().next().expect("length checked above"));
    } else {
        unknown_str.push_str("keys:\n");
        for ignored_key in unknown {
            unknown_str.push('\n');
            unknown_str.push_str("  - ");
            unknown_str.push_str(ignored_key);
        }
    }

    warn!("in config file {config_file}, ignoring unknown configuration {unknown_str}");
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
struct ReporterConfigImpl {
    reporter: ReporterSection,
}

impl ReporterConfigImpl {
    fn validate(&self) -> Result<(), ConfigParseErrorKind> {
        ReporterSection::validate_spec_length(self.reporter.spec_length)
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
struct ReporterSection {
    spec_length: usize,
    colors: bool,
    strip_path_prefixes: Vec<String>,
}

impl ReporterSection {
    fn validate_spec_length(spec_length: usize) -> Result<(), ConfigParseErrorKind> {
        let range = ReporterConfig::MIN_SPEC_LENGTH..=ReporterConfig::MAX_SPEC_LENGTH;
        if !range.contains(&spec_length) {
            return Err(ConfigParseErrorKind::InvalidSpecLength {
                spec_length,
                minimum: ReporterConfig::MIN_SPEC_LENGTH,
                maximum: ReporterConfig::MAX_SPEC_LENGTH,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use camino_tempfile::Utf8TempDir;
    use indoc::indoc;

    fn write_config(dir: &Utf8TempDir, contents: &str) -> Utf8PathBuf {
        let path = dir.path().join(ReporterConfig::CONFIG_PATH);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn default_config_values() {
        let config = ReporterConfig::default_config();
        assert_eq!(config.spec_length(), 75);
        assert!(config.colors());
        assert!(config.strip_path_prefixes().is_empty());
    }

    #[test]
    fn missing_repo_config_uses_defaults() {
        let dir = Utf8TempDir::new().unwrap();
        let config = ReporterConfig::from_sources(dir.path(), None).expect("defaults are valid");
        assert_eq!(config.spec_length(), 75);
    }

    #[test]
    fn repo_config_is_layered_on_defaults() {
        let dir = Utf8TempDir::new().unwrap();
        write_config(
            &dir,
            indoc! {r#"
                [reporter]
                spec-length = 40
                strip-path-prefixes = ["webpack:///"]
            "#},
        );

        let config = ReporterConfig::from_sources(dir.path(), None).expect("config is valid");
        assert_eq!(config.spec_length(), 40);
        // Not specified in the repo config, so the default applies.
        assert!(config.colors());
        assert_eq!(config.strip_path_prefixes(), ["webpack:///"]);
    }

    #[test]
    fn explicit_config_file_must_exist() {
        let dir = Utf8TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        let error = ReporterConfig::from_sources(dir.path(), Some(&missing))
            .expect_err("missing explicit file is an error");
        assert_eq!(error.config_file(), missing.as_path());
        assert!(
            matches!(error.kind(), ConfigParseErrorKind::BuildError(_)),
            "unexpected error kind: {:?}",
            error.kind()
        );
    }

    #[test]
    fn spec_length_too_small() {
        let dir = Utf8TempDir::new().unwrap();
        let path = write_config(&dir, "[reporter]\nspec-length = 3\n");

        let error = ReporterConfig::from_sources(dir.path(), Some(&path))
            .expect_err("spec length of 3 is invalid");
        assert!(
            matches!(
                error.kind(),
                ConfigParseErrorKind::InvalidSpecLength {
                    spec_length: 3,
                    minimum: 4,
                    maximum: 1024,
                }
            ),
            "unexpected error kind: {:?}",
            error.kind()
        );
    }

    #[test]
    fn wrong_type_reports_path() {
        let dir = Utf8TempDir::new().unwrap();
        write_config(&dir, "[reporter]\ncolors = \"sometimes\"\n");

        let error = ReporterConfig::from_sources(dir.path(), None)
            .expect_err("colors must be a boolean");
        match error.kind() {
            ConfigParseErrorKind::DeserializeError(error) => {
                assert_eq!(error.path().to_string(), "reporter.colors");
            }
            other => panic!("unexpected error kind: {other:?}"),
        }
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let dir = Utf8TempDir::new().unwrap();
        write_config(&dir, "[reporter]\nspec-length = 50\nshow-stars = true\n");

        let config = ReporterConfig::from_sources(dir.path(), None).expect("config is valid");
        assert_eq!(config.spec_length(), 50);
    }

    #[test]
    fn cli_overrides() {
        let mut config = ReporterConfig::default_config();
        config.set_spec_length(20).expect("20 is a valid spec length");
        assert_eq!(config.spec_length(), 20);
        config
            .set_spec_length(2)
            .expect_err("2 is not a valid spec length");
        assert_eq!(config.spec_length(), 20, "invalid override is not applied");
        config
            .set_spec_length(ReporterConfig::MAX_SPEC_LENGTH)
            .expect("the maximum is accepted");
        config
            .set_spec_length(ReporterConfig::MAX_SPEC_LENGTH + 1)
            .expect_err("one past the maximum is rejected");
        config
            .set_spec_length(70_000)
            .expect_err("very wide labels are rejected");
        assert_eq!(config.spec_length(), ReporterConfig::MAX_SPEC_LENGTH);

        config.extend_strip_path_prefixes(["/tmp/build/".to_owned()]);
        assert_eq!(config.strip_path_prefixes(), ["/tmp/build/"]);
    }

    #[test]
    fn show_config_round_trip() {
        let mut config = ReporterConfig::default_config();
        config.set_spec_length(60).unwrap();
        let toml = config.to_toml_string();
        assert!(toml.contains("spec-length = 60"), "toml output: {toml}");

        let dir = Utf8TempDir::new().unwrap();
        let path = write_config(&dir, &toml);
        let reread = ReporterConfig::from_sources(dir.path(), Some(&path)).unwrap();
        assert_eq!(reread.spec_length(), 60);
    }
}
