// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Classification of individual test results.

use whitelist_metadata::{Allowance, Classification, TestResult};

/// The classification of a single result, and whether it is allowed.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Verdict {
    /// How the observed outcome relates to the expected one.
    pub classification: Classification,

    /// Whether the result is acceptable given the whitelist.
    pub allowance: Allowance,
}

/// Classifies a result given whether its identifier is whitelisted.
///
/// | expected | actual | classification  | allowed when      |
/// |----------|--------|-----------------|-------------------|
/// | pass     | pass   | `success`       | not whitelisted   |
/// | pass     | fail   | `falseNegative` | whitelisted       |
/// | fail     | pass   | `falsePositive` | whitelisted       |
/// | fail     | fail   | `failure`       | not whitelisted   |
pub fn classify(result: &TestResult, in_whitelist: bool) -> Verdict {
    let classification = Classification::from_outcomes(result.expected, result.actual);
    let allowed = classification.allowed_when_whitelisted() == in_whitelist;
    Verdict {
        classification,
        allowance: Allowance::from_allowed(allowed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;
    use test_strategy::proptest;
    use whitelist_metadata::Outcome::{self, Fail, Pass};

    #[test_case(Pass, Pass, false => (Classification::Success, Allowance::Allowed))]
    #[test_case(Pass, Pass, true => (Classification::Success, Allowance::Disallowed))]
    #[test_case(Pass, Fail, false => (Classification::FalseNegative, Allowance::Disallowed))]
    #[test_case(Pass, Fail, true => (Classification::FalseNegative, Allowance::Allowed))]
    #[test_case(Fail, Pass, false => (Classification::FalsePositive, Allowance::Disallowed))]
    #[test_case(Fail, Pass, true => (Classification::FalsePositive, Allowance::Allowed))]
    #[test_case(Fail, Fail, false => (Classification::Failure, Allowance::Allowed))]
    #[test_case(Fail, Fail, true => (Classification::Failure, Allowance::Disallowed))]
    fn decision_table(
        expected: Outcome,
        actual: Outcome,
        in_whitelist: bool,
    ) -> (Classification, Allowance) {
        let verdict = classify(&TestResult::new("t", expected, actual), in_whitelist);
        (verdict.classification, verdict.allowance)
    }

    #[proptest(cases = 64)]
    fn matching_outcomes_allowed_iff_not_whitelisted(result: TestResult, in_whitelist: bool) {
        let verdict = classify(&result, in_whitelist);
        let matches = result.expected == result.actual;
        // Exactly one of "outcome matches" and "is whitelisted" must hold.
        assert_eq!(verdict.allowance.is_allowed(), matches != in_whitelist);
    }
}
