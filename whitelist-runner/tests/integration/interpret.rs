// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::fixtures::*;
use color_eyre::eyre::Result;
use pretty_assertions::assert_eq;
use whitelist_runner::{
    errors::InterpretError,
    interpreter::{Interpreter, InterpreterOptions},
};

#[tokio::test]
async fn empty_whitelist_passing() -> Result<()> {
    test_init();

    let summary = Interpreter::new(whitelist_fixture("empty.txt"), InterpreterOptions::new())
        .run(results(&[
            ("a", "fail", "fail"),
            ("b", "pass", "pass"),
            ("c", "pass", "pass"),
            ("d", "fail", "fail"),
        ]))
        .await?;

    assert_eq!(
        summary,
        summary_of(
            true,
            buckets([&["b", "c"], &["a", "d"], &[], &[]]),
            buckets([&[], &[], &[], &[]]),
            &[],
        )
    );
    Ok(())
}

#[tokio::test]
async fn empty_whitelist_failing() -> Result<()> {
    test_init();

    let summary = Interpreter::new(whitelist_fixture("empty.txt"), InterpreterOptions::new())
        .run(results(&[
            ("a", "pass", "pass"),
            ("b", "pass", "fail"),
            ("c", "fail", "pass"),
            ("d", "fail", "fail"),
        ]))
        .await?;

    assert_eq!(
        summary,
        summary_of(
            false,
            buckets([&["a"], &["d"], &[], &[]]),
            buckets([&[], &[], &["c"], &["b"]]),
            &[],
        )
    );
    Ok(())
}

#[tokio::test]
async fn non_empty_whitelist_passing() -> Result<()> {
    test_init();

    let summary = Interpreter::new(whitelist_fixture("vowels.txt"), InterpreterOptions::new())
        .run(results(&[
            ("a", "fail", "pass"),
            ("e", "pass", "fail"),
            ("i", "pass", "fail"),
            ("o", "fail", "pass"),
            ("u", "fail", "pass"),
            ("y", "fail", "fail"),
            ("z", "pass", "pass"),
        ]))
        .await?;

    assert_eq!(
        summary,
        summary_of(
            true,
            buckets([&["z"], &["y"], &["a", "o", "u"], &["e", "i"]]),
            buckets([&[], &[], &[], &[]]),
            &[],
        )
    );
    Ok(())
}

#[tokio::test]
async fn non_empty_whitelist_failing() -> Result<()> {
    test_init();

    let summary = Interpreter::new(whitelist_fixture("vowels.txt"), InterpreterOptions::new())
        .run(results(&[
            ("a", "fail", "fail"),
            ("e", "pass", "pass"),
            ("i", "pass", "pass"),
            ("o", "fail", "fail"),
            ("u", "fail", "fail"),
            ("y", "fail", "fail"),
            ("z", "pass", "pass"),
        ]))
        .await?;

    assert_eq!(
        summary,
        summary_of(
            false,
            buckets([&["z"], &["y"], &[], &[]]),
            buckets([&["e", "i"], &["a", "o", "u"], &[], &[]]),
            &[],
        )
    );
    Ok(())
}

#[tokio::test]
async fn unrecognized_whitelist_entries() -> Result<()> {
    test_init();

    let summary = Interpreter::new(whitelist_fixture("vowels.txt"), InterpreterOptions::new())
        .run(results(&[
            ("a", "fail", "pass"),
            ("i", "pass", "fail"),
            ("u", "fail", "pass"),
            ("y", "fail", "fail"),
            ("z", "pass", "pass"),
        ]))
        .await?;

    assert_eq!(
        summary,
        summary_of(
            false,
            buckets([&["z"], &["y"], &["a", "u"], &["i"]]),
            buckets([&[], &[], &[], &[]]),
            &["e", "o"],
        )
    );
    Ok(())
}

#[tokio::test]
async fn empty_result_stream() -> Result<()> {
    test_init();

    let summary = Interpreter::new(whitelist_fixture("vowels.txt"), InterpreterOptions::new())
        .run(results(&[]))
        .await?;

    assert_eq!(
        summary,
        summary_of(
            false,
            buckets([&[], &[], &[], &[]]),
            buckets([&[], &[], &[], &[]]),
            &["a", "e", "i", "o", "u"],
        )
    );
    Ok(())
}

#[tokio::test]
async fn non_existent_whitelist() {
    test_init();

    let path = whitelist_fixture("non-existent-file.txt");
    let error = Interpreter::new(&path, InterpreterOptions::new())
        .run(results(&[("a", "pass", "pass")]))
        .await
        .expect_err("whitelist doesn't exist, so no summary is produced");

    match error {
        InterpretError::WhitelistRead(error) => {
            assert_eq!(error.path(), path.as_path());
            assert_eq!(error.io_error().kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected WhitelistRead, found {other:?}"),
    }
}
