// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The interpreter: classifies a stream of test results against a whitelist.
//!
//! An [`Interpreter`] moves through these phases:
//!
//! ```text
//! AwaitingWhitelist --(first result or finish)--> Ready --(finish)--> Finalizing --> Done
//!         |                                                               |
//!         +-------------------(read failure)--> Errored <--(write failure)+
//! ```
//!
//! The whitelist is read lazily, at most once, when the first result arrives. Results are
//! classified one at a time in arrival order: [`Interpreter::interpret`] takes `&mut self`, so a
//! second result can't be classified while the whitelist read for the first one is outstanding.
//! Finalization via [`Interpreter::finish`] consumes the interpreter. If it is requested before
//! the whitelist has been read, the read happens first and finalization continues once it
//! completes.
//!
//! The futures returned here perform file I/O and are expected to be driven to completion.

use crate::{
    classify::{Verdict, classify},
    errors::{InterpretError, WhitelistWriteError},
    whitelist::{self, LoadedWhitelist},
};
use atomicwrites::{AtomicFile, OverwriteBehavior};
use camino::{Utf8Path, Utf8PathBuf};
use futures::{Stream, StreamExt};
use std::io::{self, Write};
use tracing::{debug, info, trace};
use whitelist_metadata::{Summary, TestResult};

/// Options for an [`Interpreter`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct InterpreterOptions {
    output_file: Option<Utf8PathBuf>,
}

impl InterpreterOptions {
    /// Creates a new set of options with no output file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes an updated whitelist to `path` at the end of the run.
    pub fn with_output_file(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.output_file = Some(path.into());
        self
    }

    /// Returns the path the updated whitelist will be written to, if any.
    pub fn output_file(&self) -> Option<&Utf8Path> {
        self.output_file.as_deref()
    }
}

/// The phase an [`Interpreter`] is currently in.
///
/// Finalization is not represented here: [`Interpreter::finish`] consumes the interpreter.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InterpreterPhase {
    /// The whitelist has not been read yet.
    AwaitingWhitelist,

    /// The whitelist has been read, and results are being classified.
    Ready,

    /// The whitelist could not be read. No further work is accepted.
    Errored,
}

#[derive(Debug)]
enum WhitelistState {
    Unloaded,
    Loaded(LoadedWhitelist),
    Failed,
}

/// Classifies test results against a whitelist of known failures.
///
/// Each interpreter handles exactly one run. It exclusively owns the whitelist entries and the
/// running summary, and publishes the summary once, from [`finish`](Self::finish).
///
/// # Duplicate identifiers
///
/// A whitelist entry is consumed by the first result with a matching identifier. If the same
/// identifier appears again later in the stream, that occurrence is classified as not
/// whitelisted. Results are never deduplicated. This is the current behavior rather than a
/// guarantee.
#[derive(Debug)]
pub struct Interpreter {
    whitelist_path: Utf8PathBuf,
    options: InterpreterOptions,
    state: WhitelistState,
    summary: Summary,
}

impl Interpreter {
    /// Creates a new interpreter for the whitelist at `whitelist_path`.
    ///
    /// No I/O is performed until the first result arrives or the run is finished.
    pub fn new(whitelist_path: impl Into<Utf8PathBuf>, options: InterpreterOptions) -> Self {
        Self {
            whitelist_path: whitelist_path.into(),
            options,
            state: WhitelistState::Unloaded,
            summary: Summary::new(),
        }
    }

    /// Returns the path to the whitelist.
    pub fn whitelist_path(&self) -> &Utf8Path {
        &self.whitelist_path
    }

    /// Returns the options this interpreter was created with.
    pub fn options(&self) -> &InterpreterOptions {
        &self.options
    }

    /// Returns the current phase.
    pub fn phase(&self) -> InterpreterPhase {
        match self.state {
            WhitelistState::Unloaded => InterpreterPhase::AwaitingWhitelist,
            WhitelistState::Loaded(_) => InterpreterPhase::Ready,
            WhitelistState::Failed => InterpreterPhase::Errored,
        }
    }

    /// Returns the summary as recorded so far.
    ///
    /// Unrecognized entries are only filled in by [`finish`](Self::finish), so this is not the
    /// published summary.
    pub fn summary_so_far(&self) -> &Summary {
        &self.summary
    }

    /// Classifies a single result, reading the whitelist first if necessary.
    ///
    /// If the whitelist can't be read, the result is not classified and
    /// [`InterpretError::WhitelistRead`] is returned. Every call after that returns
    /// [`InterpretError::Aborted`].
    pub async fn interpret(&mut self, result: TestResult) -> Result<Verdict, InterpretError> {
        let whitelist = self.ensure_loaded().await?;
        let in_whitelist = whitelist.entries_mut().take(&result.id);

        let verdict = classify(&result, in_whitelist);
        trace!(
            id = %result.id,
            expected = %result.expected,
            actual = %result.actual,
            in_whitelist,
            classification = %verdict.classification,
            allowance = %verdict.allowance,
            "classified result",
        );
        self.summary.record(result.id, verdict.classification, verdict.allowance);

        Ok(verdict)
    }

    /// Classifies one final result, then finishes the run.
    pub async fn finish_with(mut self, result: TestResult) -> Result<Summary, InterpretError> {
        self.interpret(result).await?;
        self.finish().await
    }

    /// Classifies every result in `results` in order, then finishes the run.
    pub async fn run<S>(mut self, results: S) -> Result<Summary, InterpretError>
    where
        S: Stream<Item = TestResult>,
    {
        let mut results = std::pin::pin!(results);
        while let Some(result) = results.next().await {
            self.interpret(result).await?;
        }
        self.finish().await
    }

    /// Finishes the run and publishes the summary.
    ///
    /// Whitelist entries that were never matched are added to the summary as unrecognized, which
    /// makes it fail. If an output file was configured, the updated whitelist is written there
    /// first, and the summary is only returned once the write succeeds.
    pub async fn finish(mut self) -> Result<Summary, InterpretError> {
        // With no results at all, the whitelist hasn't been read yet.
        self.ensure_loaded().await?;
        let loaded = match self.state {
            WhitelistState::Loaded(loaded) => loaded,
            WhitelistState::Unloaded | WhitelistState::Failed => {
                return Err(InterpretError::Aborted {
                    whitelist: self.whitelist_path,
                });
            }
        };

        let (original_text, entries) = loaded.into_parts();
        let mut summary = self.summary;
        summary.add_unrecognized(entries.into_remaining());
        info!(
            whitelist = %self.whitelist_path,
            passed = summary.passed,
            allowed = summary.allowed.len(),
            disallowed = summary.disallowed.len(),
            unrecognized = summary.unrecognized.len(),
            "finished interpreting results",
        );

        if let Some(output_file) = self.options.output_file {
            let updated = whitelist::update(&original_text, &summary);
            debug!(
                path = %output_file,
                removed = summary.removed_ids().count(),
                added = summary.added_ids().count(),
                "writing updated whitelist",
            );
            write_whitelist(output_file, updated).await?;
        }

        Ok(summary)
    }

    async fn ensure_loaded(&mut self) -> Result<&mut LoadedWhitelist, InterpretError> {
        if let WhitelistState::Unloaded = self.state {
            let loaded = LoadedWhitelist::read(&self.whitelist_path)
                .await
                .map_err(|error| {
                    self.state = WhitelistState::Failed;
                    error
                })?;
            self.state = WhitelistState::Loaded(loaded);
        }

        match &mut self.state {
            WhitelistState::Loaded(loaded) => Ok(loaded),
            WhitelistState::Unloaded | WhitelistState::Failed => Err(InterpretError::Aborted {
                whitelist: self.whitelist_path.clone(),
            }),
        }
    }
}

/// Atomically writes `contents` to `path`, on the blocking pool.
async fn write_whitelist(path: Utf8PathBuf, contents: String) -> Result<(), WhitelistWriteError> {
    let write_path = path.clone();
    let res = tokio::task::spawn_blocking(move || {
        AtomicFile::new(&write_path, OverwriteBehavior::AllowOverwrite)
            .write(|file| file.write_all(contents.as_bytes()))
    })
    .await;

    match res {
        Ok(Ok(())) => Ok(()),
        Ok(Err(atomicwrites::Error::Internal(error) | atomicwrites::Error::User(error))) => {
            Err(WhitelistWriteError::new(path, error))
        }
        Err(join_error) => Err(WhitelistWriteError::new(path, io::Error::other(join_error))),
    }
}
