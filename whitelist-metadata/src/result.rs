// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt;

/// The outcome of a single test, either expected or observed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "proptest1", derive(test_strategy::Arbitrary))]
pub enum Outcome {
    /// The test passed.
    Pass,

    /// The test failed.
    Fail,
}

impl Outcome {
    /// Returns the string used for this outcome on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single result record produced by a test harness.
///
/// Records are usually exchanged as newline-delimited JSON:
///
/// ```json
/// {"id": "dom/nodes/Node-cloneNode.html", "expected": "pass", "actual": "fail"}
/// ```
///
/// Fields other than `id`, `expected` and `actual` are ignored during deserialization.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[cfg_attr(feature = "proptest1", derive(test_strategy::Arbitrary))]
pub struct TestResult {
    /// The identifier of the test. Matched verbatim against whitelist entries.
    pub id: String,

    /// The outcome the harness expected.
    pub expected: Outcome,

    /// The outcome that was observed.
    pub actual: Outcome,
}

impl TestResult {
    /// Creates a new result record.
    pub fn new(id: impl Into<String>, expected: Outcome, actual: Outcome) -> Self {
        Self {
            id: id.into(),
            expected,
            actual,
        }
    }
}
