// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use camino::Utf8PathBuf;
use futures::stream::Iter;
use std::{sync::Once, vec};
use tracing_subscriber::filter::LevelFilter;
use whitelist_metadata::{ClassificationBuckets, Outcome, Summary, TestResult};

static INIT: Once = Once::new();

pub(crate) fn test_init() {
    INIT.call_once(|| {
        color_eyre::install().expect("color-eyre installed once");
        // Ignore errors: another test binary may have installed a subscriber already.
        let _ = tracing_subscriber::fmt()
            .with_max_level(LevelFilter::TRACE)
            .with_test_writer()
            .try_init();
    });
}

/// Returns the path to a whitelist under `tests/fixtures/whitelists`.
pub(crate) fn whitelist_fixture(name: &str) -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/whitelists")
        .join(name)
}

fn outcome(s: &str) -> Outcome {
    match s {
        "pass" => Outcome::Pass,
        "fail" => Outcome::Fail,
        other => panic!("unknown outcome in fixture: {other}"),
    }
}

/// Builds a stream of results from `(id, expected, actual)` triples.
pub(crate) fn results(triples: &[(&str, &str, &str)]) -> Iter<vec::IntoIter<TestResult>> {
    let results: Vec<_> = triples
        .iter()
        .map(|(id, expected, actual)| TestResult::new(*id, outcome(expected), outcome(actual)))
        .collect();
    futures::stream::iter(results)
}

/// Builds buckets from `[success, failure, false_positive, false_negative]`.
pub(crate) fn buckets(lists: [&[&str]; 4]) -> ClassificationBuckets {
    ClassificationBuckets {
        success: to_vec(lists[0]),
        failure: to_vec(lists[1]),
        false_positive: to_vec(lists[2]),
        false_negative: to_vec(lists[3]),
    }
}

pub(crate) fn summary_of(
    passed: bool,
    allowed: ClassificationBuckets,
    disallowed: ClassificationBuckets,
    unrecognized: &[&str],
) -> Summary {
    Summary {
        passed,
        allowed,
        disallowed,
        unrecognized: to_vec(unrecognized),
    }
}

fn to_vec(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| (*id).to_owned()).collect()
}
