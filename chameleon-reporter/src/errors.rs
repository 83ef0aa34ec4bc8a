// Copyright (c) The chameleon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by chameleon.

use camino::{Utf8Path, Utf8PathBuf};
use config::ConfigError;
use thiserror::Error;

/// An error that occurred while reading the reporter config.
#[derive(Debug, Error)]
#[error("failed to parse chameleon config at `{config_file}`")]
#[non_exhaustive]
pub struct ConfigParseError {
    config_file: Utf8PathBuf,
    #[source]
    kind: ConfigParseErrorKind,
}

impl ConfigParseError {
    pub(crate) fn new(config_file: impl Into<Utf8PathBuf>, kind: ConfigParseErrorKind) -> Self {
        Self {
            config_file: config_file.into(),
            kind,
        }
    }

    /// Returns the config file for this error.
    pub fn config_file(&self) -> &Utf8Path {
        &self.config_file
    }

    /// Returns the kind of error this is.
    pub fn kind(&self) -> &ConfigParseErrorKind {
        &self.kind
    }
}

/// The kind of error that occurred while reading the reporter config.
///
/// Returned by [`ConfigParseError::kind`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigParseErrorKind {
    /// An error occurred while building the config from its sources.
    #[error(transparent)]
    BuildError(Box<ConfigError>),

    /// An error occurred while deserializing the config.
    #[error(transparent)]
    DeserializeError(Box<serde_path_to_error::Error<ConfigError>>),

    /// The configured spec length is too small to hold a truncated label, or too large to render.
    #[error(
        "invalid value for `reporter.spec-length`: {spec_length} \
         (must be between {minimum} and {maximum})"
    )]
    InvalidSpecLength {
        /// The configured value.
        spec_length: usize,

        /// The smallest accepted value.
        minimum: usize,

        /// The largest accepted value.
        maximum: usize,
    },
}

/// An error that occurs while writing a report to its output.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WriteEventError {
    /// An error occurred while writing the event to the provided output.
    #[error("error writing to output")]
    Io(#[source] std::io::Error),
}

/// An error that occurs while reading a runner event stream.
///
/// Lines that cannot be parsed as events are not errors: they are logged and skipped.
#[derive(Debug, Error)]
#[error("error reading event stream at line {line_number}")]
pub struct EventStreamReadError {
    line_number: usize,
    #[source]
    err: std::io::Error,
}

impl EventStreamReadError {
    pub(crate) fn new(line_number: usize, err: std::io::Error) -> Self {
        Self { line_number, err }
    }

    /// Returns the 1-based line number at which reading failed.
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}
