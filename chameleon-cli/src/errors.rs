// Copyright (c) The chameleon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::output::{NO_HEADING_TARGET, StderrStyles};
use camino::Utf8PathBuf;
use chameleon_metadata::ChameleonExitCode;
use chameleon_reporter::errors::*;
use owo_colors::OwoColorize;
use std::error::Error;
use thiserror::Error;
use tracing::error;

pub(crate) type Result<T, E = ExpectedError> = std::result::Result<T, E>;

// Note that the #[error()] strings are mostly placeholder messages -- the expected way to print out
// errors is with the display_to_stderr method, which colorizes errors.

/// An expected error: a problem with the input or environment, rather than a bug in chameleon.
#[derive(Debug, Error)]
#[doc(hidden)]
pub enum ExpectedError {
    #[error("current directory is invalid")]
    CurrentDirInvalid {
        #[source]
        err: std::io::Error,
    },
    #[error("config parse error")]
    ConfigParseError {
        #[from]
        err: ConfigParseError,
    },
    #[error("invalid --spec-length")]
    SpecLengthOverride {
        #[source]
        err: ConfigParseErrorKind,
    },
    #[error("failed to open event stream")]
    EventsOpenError {
        path: Utf8PathBuf,
        #[source]
        err: std::io::Error,
    },
    #[error("failed to read event stream")]
    EventStreamReadError {
        #[from]
        err: EventStreamReadError,
    },
    #[error("failed to write report")]
    WriteEventError {
        #[from]
        err: WriteEventError,
    },
    #[error("failed to write output")]
    WriteOutputError {
        #[source]
        err: std::io::Error,
    },
}

impl ExpectedError {
    pub(crate) fn current_dir_invalid(err: std::io::Error) -> Self {
        Self::CurrentDirInvalid { err }
    }

    pub(crate) fn spec_length_override(err: ConfigParseErrorKind) -> Self {
        Self::SpecLengthOverride { err }
    }

    pub(crate) fn events_open_error(path: impl Into<Utf8PathBuf>, err: std::io::Error) -> Self {
        Self::EventsOpenError {
            path: path.into(),
            err,
        }
    }

    pub(crate) fn write_output_error(err: std::io::Error) -> Self {
        Self::WriteOutputError { err }
    }

    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::CurrentDirInvalid { .. }
            | Self::ConfigParseError { .. }
            | Self::SpecLengthOverride { .. }
            | Self::EventsOpenError { .. }
            | Self::EventStreamReadError { .. } => ChameleonExitCode::SETUP_ERROR,
            Self::WriteEventError { .. } | Self::WriteOutputError { .. } => {
                ChameleonExitCode::WRITE_OUTPUT_ERROR
            }
        }
    }

    /// Displays this error to stderr.
    pub fn display_to_stderr(&self, styles: &StderrStyles) {
        let mut next_error = match self {
            Self::CurrentDirInvalid { err } => {
                error!("current directory is invalid");
                Some(err as &dyn Error)
            }
            Self::ConfigParseError { err } => {
                error!(
                    "failed to parse chameleon config at `{}`",
                    err.config_file().style(styles.bold)
                );
                Some(err.kind() as &dyn Error)
            }
            Self::SpecLengthOverride { err } => {
                error!("invalid value for `{}`", "--spec-length".style(styles.bold));
                Some(err as &dyn Error)
            }
            Self::EventsOpenError { path, err } => {
                error!("failed to open event stream `{}`", path.style(styles.bold));
                Some(err as &dyn Error)
            }
            Self::EventStreamReadError { err } => {
                error!("failed to read event stream");
                Some(err as &dyn Error)
            }
            Self::WriteEventError { err } => {
                error!("failed to write report");
                Some(err as &dyn Error)
            }
            Self::WriteOutputError { err } => {
                error!("failed to write output");
                Some(err as &dyn Error)
            }
        };

        while let Some(err) = next_error {
            error!(target: NO_HEADING_TARGET, "\nCaused by:\n  {}", err);
            next_error = err.source();
        }
    }
}
