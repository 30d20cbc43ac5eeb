// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reading test results from newline-delimited JSON.

use crate::errors::ResultStreamError;
use futures::Stream;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use whitelist_metadata::TestResult;

/// Reads [`TestResult`] records, one JSON object per line.
///
/// Blank lines are skipped. Records are read one at a time, so at most one line is buffered.
#[derive(Debug)]
pub struct ResultReader<R> {
    lines: Lines<R>,
    line_number: usize,
}

impl<R> ResultReader<R>
where
    R: AsyncBufRead + Unpin,
{
    /// Creates a new reader.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
        }
    }

    /// Reads the next record, or returns `None` at the end of the input.
    pub async fn next_result(&mut self) -> Result<Option<TestResult>, ResultStreamError> {
        loop {
            let Some(line) = self
                .lines
                .next_line()
                .await
                .map_err(|error| ResultStreamError::Read { error })?
            else {
                return Ok(None);
            };
            self.line_number += 1;

            if line.trim().is_empty() {
                continue;
            }

            let result =
                serde_json::from_str(&line).map_err(|error| ResultStreamError::Parse {
                    line_number: self.line_number,
                    error,
                })?;
            return Ok(Some(result));
        }
    }

    /// Converts this reader into a stream of records.
    pub fn into_stream(self) -> impl Stream<Item = Result<TestResult, ResultStreamError>> {
        futures::stream::try_unfold(self, |mut reader| async move {
            let next = reader.next_result().await?;
            Ok::<_, ResultStreamError>(next.map(|result| (result, reader)))
        })
    }
}
