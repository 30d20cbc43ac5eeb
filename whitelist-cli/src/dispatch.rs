// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    ExpectedError,
    errors::Result,
    output::{OutputContext, OutputOpts, clap_styles},
};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use std::io::Write;
use tokio::io::{AsyncBufRead, BufReader};
use tracing::{info, warn};
use whitelist_metadata::{Summary, WhitelistExitCode};
use whitelist_runner::{
    config::WhitelistConfig,
    interpreter::{Interpreter, InterpreterOptions},
    results::ResultReader,
};

/// Classify test results against a whitelist of known failures.
///
/// Test results are read as newline-delimited JSON objects with `id`, `expected` and `actual`
/// keys. A JSON summary is written once the input ends.
#[derive(Debug, Parser)]
#[command(version, name = "whitelist-interpret", styles = clap_styles::style())]
pub struct WhitelistApp {
    /// Whitelist of known failures [default: from config]
    #[arg(long, value_name = "PATH")]
    whitelist: Option<Utf8PathBuf>,

    /// Write an updated whitelist to this path after the run
    #[arg(long, value_name = "PATH")]
    output_file: Option<Utf8PathBuf>,

    /// Config file [default: .config/whitelist.toml]
    #[arg(long, value_name = "PATH")]
    config_file: Option<Utf8PathBuf>,

    /// Test results to read, or `-` for standard input
    #[arg(long, value_name = "PATH", default_value = "-")]
    results: Utf8PathBuf,

    /// Write the JSON summary to this path instead of standard output
    #[arg(long, value_name = "PATH")]
    summary_file: Option<Utf8PathBuf>,

    #[command(flatten)]
    output: OutputOpts,
}

impl WhitelistApp {
    /// Initializes the output context.
    pub fn init_output(&self) -> OutputContext {
        self.output.init()
    }

    /// Executes the app, returning the process exit code.
    pub fn exec(self, stdout: &mut dyn Write) -> Result<i32> {
        let current_dir =
            std::env::current_dir().map_err(|error| ExpectedError::CurrentDirFailed { error })?;
        let root = Utf8PathBuf::try_from(current_dir)
            .map_err(|error| ExpectedError::CurrentDirInvalidUtf8 { error })?;
        self.exec_in(&root, stdout)
    }

    fn exec_in(self, root: &Utf8Path, stdout: &mut dyn Write) -> Result<i32> {
        let config = WhitelistConfig::from_sources(
            root,
            self.config_file.as_deref(),
            |config_file, unknown| {
                warn!(
                    "ignoring unknown configuration keys in config file {config_file}: {}",
                    unknown.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
                );
            },
        )
        .map_err(|error| ExpectedError::Config {
            error: error.into(),
        })?;
        let (whitelist, options) =
            config.interpreter_args(self.whitelist.as_deref(), self.output_file.as_deref())?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .map_err(|error| ExpectedError::RuntimeCreate { error })?;
        let summary = runtime.block_on(interpret_results(&self.results, whitelist, options))?;

        match &self.summary_file {
            Some(path) => {
                let mut file =
                    std::fs::File::create(path).map_err(|error| ExpectedError::SummaryWrite {
                        path: Some(path.clone()),
                        error,
                    })?;
                write_summary(&summary, &mut file).map_err(|error| {
                    ExpectedError::SummaryWrite {
                        path: Some(path.clone()),
                        error,
                    }
                })?;
            }
            None => {
                write_summary(&summary, stdout)
                    .map_err(|error| ExpectedError::SummaryWrite { path: None, error })?;
            }
        }

        if summary.passed {
            Ok(WhitelistExitCode::OK)
        } else {
            warn!(
                "{} disallowed results, {} unrecognized whitelist entries",
                summary.disallowed.len(),
                summary.unrecognized.len(),
            );
            Ok(WhitelistExitCode::RUN_FAILED)
        }
    }
}

async fn interpret_results(
    results: &Utf8Path,
    whitelist: Utf8PathBuf,
    options: InterpreterOptions,
) -> Result<Summary> {
    let input: Box<dyn AsyncBufRead + Unpin> = if results.as_str() == "-" {
        Box::new(BufReader::new(tokio::io::stdin()))
    } else {
        let file = tokio::fs::File::open(results).await.map_err(|error| {
            ExpectedError::ResultsOpen {
                path: results.to_owned(),
                error,
            }
        })?;
        Box::new(BufReader::new(file))
    };

    let mut interpreter = Interpreter::new(whitelist, options);
    let mut reader = ResultReader::new(input);
    let mut count = 0_usize;
    while let Some(result) = reader.next_result().await? {
        interpreter.interpret(result).await?;
        count += 1;
    }
    info!("read {count} test results");

    Ok(interpreter.finish().await?)
}

fn write_summary(summary: &Summary, writer: &mut dyn Write) -> std::io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, summary)?;
    writeln!(writer)?;
    writer.flush()
}
