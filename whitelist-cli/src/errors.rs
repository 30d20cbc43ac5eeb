// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::output::{NO_HEADING_TARGET, StderrStyles};
use camino::{FromPathBufError, Utf8PathBuf};
use owo_colors::OwoColorize;
use std::error::Error;
use thiserror::Error;
use tracing::error;
use whitelist_metadata::WhitelistExitCode;
use whitelist_runner::errors::{
    ConfigError, InterpretError, ResultStreamError, WhitelistReadError, WhitelistWriteError,
};

pub(crate) type Result<T, E = ExpectedError> = std::result::Result<T, E>;

// Note that the #[error()] strings are mostly placeholder messages -- the expected way to print out
// errors is with the display_to_stderr method, which colorizes errors.

/// An error that the interpreter is expected to encounter and report.
#[derive(Debug, Error)]
#[doc(hidden)]
pub enum ExpectedError {
    #[error("could not determine current directory")]
    CurrentDirFailed {
        #[source]
        error: std::io::Error,
    },
    #[error("current directory is not valid UTF-8")]
    CurrentDirInvalidUtf8 {
        #[source]
        error: FromPathBufError,
    },
    #[error("config error")]
    Config {
        #[from]
        error: ConfigError,
    },
    #[error("failed to create async runtime")]
    RuntimeCreate {
        #[source]
        error: std::io::Error,
    },
    #[error("failed to open test results")]
    ResultsOpen {
        path: Utf8PathBuf,
        #[source]
        error: std::io::Error,
    },
    #[error("failed to read test results")]
    ResultStream {
        #[from]
        error: ResultStreamError,
    },
    #[error("whitelist read error")]
    WhitelistRead {
        #[source]
        error: WhitelistReadError,
    },
    #[error("whitelist write error")]
    WhitelistWrite {
        #[source]
        error: WhitelistWriteError,
    },
    #[error("interpreter aborted")]
    InterpreterAborted { whitelist: Utf8PathBuf },
    #[error("failed to write summary")]
    SummaryWrite {
        path: Option<Utf8PathBuf>,
        #[source]
        error: std::io::Error,
    },
}

impl From<InterpretError> for ExpectedError {
    fn from(error: InterpretError) -> Self {
        match error {
            InterpretError::WhitelistRead(error) => Self::WhitelistRead { error },
            InterpretError::WhitelistWrite(error) => Self::WhitelistWrite { error },
            InterpretError::Aborted { whitelist } => Self::InterpreterAborted { whitelist },
        }
    }
}

impl ExpectedError {
    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::CurrentDirFailed { .. }
            | Self::CurrentDirInvalidUtf8 { .. }
            | Self::Config { .. }
            | Self::RuntimeCreate { .. } => WhitelistExitCode::SETUP_ERROR,
            Self::ResultsOpen { .. } | Self::ResultStream { .. } => {
                WhitelistExitCode::RESULT_STREAM_FAILED
            }
            Self::WhitelistRead { .. } | Self::InterpreterAborted { .. } => {
                WhitelistExitCode::WHITELIST_READ_FAILED
            }
            Self::WhitelistWrite { .. } => WhitelistExitCode::WHITELIST_WRITE_FAILED,
            Self::SummaryWrite { .. } => WhitelistExitCode::WRITE_OUTPUT_ERROR,
        }
    }

    /// Displays this error to stderr.
    pub fn display_to_stderr(&self, styles: &StderrStyles) {
        let mut next_error = match &self {
            Self::CurrentDirFailed { error } => {
                error!("could not determine current directory");
                Some(error as &dyn Error)
            }
            Self::CurrentDirInvalidUtf8 { error } => {
                error!(
                    "current directory `{}` is not valid UTF-8",
                    error.as_path().display().style(styles.bold)
                );
                None
            }
            Self::Config { error } => {
                match error {
                    ConfigError::Parse(error) => {
                        error!(
                            "failed to parse config file `{}`",
                            error.config_file().style(styles.bold)
                        );
                        Some(error.kind() as &dyn Error)
                    }
                    ConfigError::NoWhitelist { config_file } => {
                        error!(
                            "no whitelist specified: pass {}, or set {} in `{}`",
                            "--whitelist".style(styles.bold),
                            "interpret.whitelist".style(styles.bold),
                            config_file.style(styles.bold),
                        );
                        None
                    }
                }
            }
            Self::RuntimeCreate { error } => {
                error!("failed to create async runtime");
                Some(error as &dyn Error)
            }
            Self::ResultsOpen { path, error } => {
                error!("failed to open test results at `{}`", path.style(styles.bold));
                Some(error as &dyn Error)
            }
            Self::ResultStream { error } => {
                error!("failed to read test results");
                Some(error as &dyn Error)
            }
            Self::WhitelistRead { error } => {
                error!(
                    "failed to read whitelist `{}`",
                    error.path().style(styles.bold)
                );
                Some(error.io_error() as &dyn Error)
            }
            Self::WhitelistWrite { error } => {
                error!(
                    "failed to write updated whitelist to `{}`",
                    error.path().style(styles.bold)
                );
                Some(error.io_error() as &dyn Error)
            }
            Self::InterpreterAborted { whitelist } => {
                error!(
                    "interpreter for whitelist `{}` aborted after an earlier failure",
                    whitelist.style(styles.bold)
                );
                None
            }
            Self::SummaryWrite { path, error } => {
                match path {
                    Some(path) => {
                        error!("failed to write summary to `{}`", path.style(styles.bold))
                    }
                    None => error!("failed to write summary to standard output"),
                }
                Some(error as &dyn Error)
            }
        };

        while let Some(err) = next_error {
            error!(target: NO_HEADING_TARGET, "\nCaused by:\n  {}", err);
            next_error = err.source();
        }
    }
}
