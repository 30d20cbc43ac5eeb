// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reading and rewriting whitelist files.
//!
//! A whitelist is plain UTF-8 text with one test identifier per line. A `#` starts a comment that
//! runs to the end of the line, whitespace around the identifier is insignificant, and lines that
//! are empty after stripping comments are ignored:
//!
//! ```text
//! # Known failures on this platform.
//! dom/nodes/Node-cloneNode.html   # flaky on CI
//!
//! css/flexbox/align-content-001.html
//! ```

use crate::errors::WhitelistReadError;
use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexSet;
use std::collections::HashSet;
use tracing::debug;
use whitelist_metadata::Summary;

/// Returns the identifier on a single whitelist line, or an empty string if the line holds only
/// a comment or whitespace.
///
/// A byte order mark is trimmed along with whitespace, so a whitelist saved with one still
/// matches its first identifier.
pub fn entry_id(line: &str) -> &str {
    let content = match line.find('#') {
        Some(index) => &line[..index],
        None => line,
    };
    content.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

/// The set of identifiers in a whitelist, in the order they first appear in the file.
///
/// Entries are consumed with [`take`](Self::take) as matching results arrive. Whatever is left at
/// the end of a run was never seen in the result stream.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct WhitelistEntries {
    entries: IndexSet<String>,
}

impl WhitelistEntries {
    /// Parses whitelist text. Duplicate identifiers collapse into a single entry.
    pub fn parse(text: &str) -> Self {
        let entries = text
            .split('\n')
            .map(entry_id)
            .filter(|id| !id.is_empty())
            .map(str::to_owned)
            .collect();
        Self { entries }
    }

    /// Removes an identifier from the set, returning whether it was present.
    ///
    /// The relative order of the remaining entries is preserved.
    pub fn take(&mut self, id: &str) -> bool {
        self.entries.shift_remove(id)
    }

    /// Returns the number of entries in the set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the set has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in parse order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Consumes the set, returning the remaining entries in parse order.
    pub fn into_remaining(self) -> Vec<String> {
        self.entries.into_iter().collect()
    }
}

/// Rewrites whitelist text to reflect a finished run.
///
/// Lines whose identifier is in [`Summary::removed_ids`] are dropped, together with any comment
/// on the same line. Every other line is kept byte for byte, including comments, blank lines and
/// whitespace. Each identifier in [`Summary::added_ids`] is then appended as a line of its own.
///
/// If nothing was removed or added, the output is identical to the input.
pub fn update(original: &str, summary: &Summary) -> String {
    let to_remove: HashSet<&str> = summary.removed_ids().collect();

    let kept = original
        .split('\n')
        .filter(|line| !to_remove.contains(entry_id(line)));
    let lines: Vec<&str> = kept.chain(summary.added_ids()).collect();

    lines.join("\n")
}

/// A whitelist file that has been read from disk.
#[derive(Clone, Debug)]
pub struct LoadedWhitelist {
    path: Utf8PathBuf,
    original_text: String,
    entries: WhitelistEntries,
}

impl LoadedWhitelist {
    /// Reads and parses the whitelist at `path`.
    ///
    /// This is a single attempt: errors are returned as-is and never retried.
    pub async fn read(path: &Utf8Path) -> Result<Self, WhitelistReadError> {
        let original_text = tokio::fs::read_to_string(path)
            .await
            .map_err(|error| WhitelistReadError::new(path, error))?;
        let loaded = Self::from_text(path, original_text);
        debug!(
            path = %loaded.path,
            entries = loaded.entries.len(),
            "loaded whitelist",
        );
        Ok(loaded)
    }

    /// Creates a loaded whitelist from text that was obtained some other way.
    pub fn from_text(path: impl Into<Utf8PathBuf>, original_text: impl Into<String>) -> Self {
        let original_text = original_text.into();
        let entries = WhitelistEntries::parse(&original_text);
        Self {
            path: path.into(),
            original_text,
            entries,
        }
    }

    pub(crate) fn entries_mut(&mut self) -> &mut WhitelistEntries {
        &mut self.entries
    }

    pub(crate) fn into_parts(self) -> (String, WhitelistEntries) {
        (self.original_text, self.entries)
    }
}
