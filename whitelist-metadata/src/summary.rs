// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::Outcome;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a result's observed outcome relates to its expected outcome.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "proptest1", derive(test_strategy::Arbitrary))]
pub enum Classification {
    /// Expected to pass, and passed.
    Success,

    /// Expected to fail, and failed.
    Failure,

    /// Expected to fail, but passed.
    FalsePositive,

    /// Expected to pass, but failed.
    FalseNegative,
}

impl Classification {
    /// All classifications, in the order they appear in a serialized [`ClassificationBuckets`].
    pub const ALL: [Self; 4] = [
        Self::Success,
        Self::Failure,
        Self::FalsePositive,
        Self::FalseNegative,
    ];

    /// Computes the classification for a pair of expected and actual outcomes.
    pub fn from_outcomes(expected: Outcome, actual: Outcome) -> Self {
        match (expected, actual) {
            (Outcome::Pass, Outcome::Pass) => Self::Success,
            (Outcome::Pass, Outcome::Fail) => Self::FalseNegative,
            (Outcome::Fail, Outcome::Pass) => Self::FalsePositive,
            (Outcome::Fail, Outcome::Fail) => Self::Failure,
        }
    }

    /// Returns true if a whitelisted test with this classification is allowed.
    ///
    /// Mismatches (false positives and false negatives) are what the whitelist exists to
    /// acknowledge. A whitelisted test whose outcome matches its expectation means the whitelist
    /// entry is stale, so it is disallowed.
    pub fn allowed_when_whitelisted(self) -> bool {
        matches!(self, Self::FalsePositive | Self::FalseNegative)
    }

    /// Returns the string used for this classification on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::FalsePositive => "falsePositive",
            Self::FalseNegative => "falseNegative",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a classified result is acceptable for the run to pass.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "proptest1", derive(test_strategy::Arbitrary))]
pub enum Allowance {
    /// The result is acceptable.
    Allowed,

    /// The result is a regression, or a whitelist entry that no longer applies.
    Disallowed,
}

impl Allowance {
    /// Converts a boolean into an allowance.
    pub fn from_allowed(allowed: bool) -> Self {
        if allowed {
            Self::Allowed
        } else {
            Self::Disallowed
        }
    }

    /// Returns true if this is [`Allowance::Allowed`].
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }
}

impl fmt::Display for Allowance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allowed => f.write_str("allowed"),
            Self::Disallowed => f.write_str("disallowed"),
        }
    }
}

/// Test identifiers grouped by [`Classification`], each list in the order results were recorded.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationBuckets {
    /// Identifiers classified as [`Classification::Success`].
    pub success: Vec<String>,

    /// Identifiers classified as [`Classification::Failure`].
    pub failure: Vec<String>,

    /// Identifiers classified as [`Classification::FalsePositive`].
    pub false_positive: Vec<String>,

    /// Identifiers classified as [`Classification::FalseNegative`].
    pub false_negative: Vec<String>,
}

impl ClassificationBuckets {
    /// Returns the identifiers recorded for the given classification.
    pub fn get(&self, classification: Classification) -> &[String] {
        match classification {
            Classification::Success => &self.success,
            Classification::Failure => &self.failure,
            Classification::FalsePositive => &self.false_positive,
            Classification::FalseNegative => &self.false_negative,
        }
    }

    /// Returns a mutable reference to the identifiers recorded for the given classification.
    pub fn get_mut(&mut self, classification: Classification) -> &mut Vec<String> {
        match classification {
            Classification::Success => &mut self.success,
            Classification::Failure => &mut self.failure,
            Classification::FalsePositive => &mut self.false_positive,
            Classification::FalseNegative => &mut self.false_negative,
        }
    }

    /// Returns the total number of identifiers across all classifications.
    pub fn len(&self) -> usize {
        Classification::ALL.iter().map(|c| self.get(*c).len()).sum()
    }

    /// Returns true if no identifiers have been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The classification of a whole run against a whitelist.
///
/// A summary is built up one result at a time. `passed` starts out true and becomes false for
/// good as soon as any disallowed result is recorded, or when unrecognized whitelist entries are
/// added at the end of the run.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// True if every result was allowed and every whitelist entry was seen.
    pub passed: bool,

    /// Results that are acceptable.
    pub allowed: ClassificationBuckets,

    /// Results that make the run fail.
    pub disallowed: ClassificationBuckets,

    /// Whitelist entries that never appeared in the result stream.
    pub unrecognized: Vec<String>,
}

impl Default for Summary {
    fn default() -> Self {
        Self::new()
    }
}

impl Summary {
    /// Creates a new, passing summary with nothing recorded.
    pub fn new() -> Self {
        Self {
            passed: true,
            allowed: ClassificationBuckets::default(),
            disallowed: ClassificationBuckets::default(),
            unrecognized: Vec::new(),
        }
    }

    /// Records a classified result.
    ///
    /// A disallowed result makes the summary fail. Nothing recorded here is ever undone.
    pub fn record(
        &mut self,
        id: impl Into<String>,
        classification: Classification,
        allowance: Allowance,
    ) {
        let buckets = match allowance {
            Allowance::Allowed => &mut self.allowed,
            Allowance::Disallowed => &mut self.disallowed,
        };
        buckets.get_mut(classification).push(id.into());
        self.passed &= allowance.is_allowed();
    }

    /// Appends whitelist entries that were never matched by a result.
    ///
    /// If the unrecognized list is non-empty afterwards, the summary fails.
    pub fn add_unrecognized(&mut self, ids: impl IntoIterator<Item = String>) {
        self.unrecognized.extend(ids);
        if !self.unrecognized.is_empty() {
            self.passed = false;
        }
    }

    /// Identifiers that should no longer be whitelisted: disallowed successes, disallowed
    /// failures and unrecognized entries, in that order.
    pub fn removed_ids(&self) -> impl Iterator<Item = &str> {
        self.disallowed
            .success
            .iter()
            .chain(&self.disallowed.failure)
            .chain(&self.unrecognized)
            .map(String::as_str)
    }

    /// Identifiers that should newly be whitelisted: disallowed false positives followed by
    /// disallowed false negatives.
    pub fn added_ids(&self) -> impl Iterator<Item = &str> {
        self.disallowed
            .false_positive
            .iter()
            .chain(&self.disallowed.false_negative)
            .map(String::as_str)
    }
}
