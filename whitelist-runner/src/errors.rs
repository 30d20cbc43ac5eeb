// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by the whitelist interpreter.

use camino::{Utf8Path, Utf8PathBuf};
use std::{error, fmt, io};
use thiserror::Error;

/// The whitelist file could not be read.
///
/// This is fatal to a run: no results are classified after it occurs, and no summary is
/// produced.
#[derive(Debug, Error)]
#[error("failed to read whitelist `{path}`")]
pub struct WhitelistReadError {
    path: Utf8PathBuf,
    #[source]
    error: io::Error,
}

impl WhitelistReadError {
    pub(crate) fn new(path: impl Into<Utf8PathBuf>, error: io::Error) -> Self {
        Self {
            path: path.into(),
            error,
        }
    }

    /// Returns the path to the whitelist that could not be read.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Returns the underlying I/O error.
    pub fn io_error(&self) -> &io::Error {
        &self.error
    }
}

/// The updated whitelist could not be written during finalization.
///
/// The summary computed for the run is discarded.
#[derive(Debug, Error)]
#[error("failed to write updated whitelist to `{path}`")]
pub struct WhitelistWriteError {
    path: Utf8PathBuf,
    #[source]
    error: io::Error,
}

impl WhitelistWriteError {
    pub(crate) fn new(path: impl Into<Utf8PathBuf>, error: io::Error) -> Self {
        Self {
            path: path.into(),
            error,
        }
    }

    /// Returns the output path that could not be written.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Returns the underlying I/O error.
    pub fn io_error(&self) -> &io::Error {
        &self.error
    }
}

/// An error returned by [`Interpreter`](crate::interpreter::Interpreter).
#[derive(Debug, Error)]
pub enum InterpretError {
    /// The whitelist could not be read.
    #[error(transparent)]
    WhitelistRead(#[from] WhitelistReadError),

    /// The updated whitelist could not be written.
    #[error(transparent)]
    WhitelistWrite(#[from] WhitelistWriteError),

    /// The interpreter already failed to read its whitelist, and accepts no further work.
    #[error("interpreter for whitelist `{whitelist}` previously failed, no further results accepted")]
    Aborted {
        /// The whitelist the interpreter was created with.
        whitelist: Utf8PathBuf,
    },
}

/// An error that occurred while reading a stream of test results.
#[derive(Debug, Error)]
pub enum ResultStreamError {
    /// An I/O error occurred while reading from the stream.
    #[error("failed to read test results")]
    Read {
        /// The underlying error.
        #[source]
        error: io::Error,
    },

    /// A line of the stream was not a valid result record.
    #[error("invalid test result on line {line_number}")]
    Parse {
        /// The 1-based line number of the record.
        line_number: usize,

        /// The underlying error.
        #[source]
        error: serde_json::Error,
    },
}

/// An error that occurred while parsing a whitelist config file.
#[derive(Debug, Error)]
#[error("failed to parse whitelist config at `{config_file}`")]
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

    /// Returns the config file that failed to parse.
    pub fn config_file(&self) -> &Utf8Path {
        &self.config_file
    }

    /// Returns the kind of error that occurred.
    pub fn kind(&self) -> &ConfigParseErrorKind {
        &self.kind
    }
}

/// The kind of error carried by a [`ConfigParseError`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigParseErrorKind {
    /// The config sources could not be combined.
    #[error(transparent)]
    BuildError(Box<config::ConfigError>),

    /// The combined config did not match the expected schema.
    #[error(transparent)]
    DeserializeError(Box<serde_path_to_error::Error<config::ConfigError>>),
}

/// An error that occurred while resolving the interpreter's configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be parsed.
    #[error(transparent)]
    Parse(#[from] ConfigParseError),

    /// No whitelist was specified on the command line or in the config file.
    #[error("no whitelist specified (pass --whitelist, or set `interpret.whitelist` in `{config_file}`)")]
    NoWhitelist {
        /// The config file that was consulted.
        config_file: Utf8PathBuf,
    },
}

/// Displays an error along with its chain of sources.
pub struct DisplayErrorChain<E> {
    error: E,
}

impl<E: error::Error> DisplayErrorChain<E> {
    /// Creates a new `DisplayErrorChain`.
    pub fn new(error: E) -> Self {
        Self { error }
    }
}

impl<E> fmt::Display for DisplayErrorChain<E>
where
    E: error::Error,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        let mut source = self.error.source();
        if source.is_some() {
            write!(f, "\n  caused by:")?;
        }
        while let Some(cause) = source {
            write!(f, "\n  - {cause}")?;
            source = cause.source();
        }

        Ok(())
    }
}
