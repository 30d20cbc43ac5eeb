// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::fixtures::*;
use camino_tempfile::Utf8TempDir;
use color_eyre::eyre::Result;
use pretty_assertions::assert_eq;
use whitelist_runner::{
    errors::InterpretError,
    interpreter::{Interpreter, InterpreterOptions},
};

fn temp_dir() -> Result<Utf8TempDir> {
    Ok(camino_tempfile::Builder::new()
        .prefix("whitelist-update-")
        .tempdir()?)
}

#[tokio::test]
async fn update_whitelist() -> Result<()> {
    test_init();

    let dir = temp_dir()?;
    let dest = dir.path().join("vowels-copy.txt");
    let summary = Interpreter::new(
        whitelist_fixture("vowels.txt"),
        InterpreterOptions::new().with_output_file(&dest),
    )
    .run(results(&[
        ("a", "fail", "pass"),
        ("e", "pass", "fail"),
        ("i", "pass", "pass"),
        ("o", "fail", "fail"),
        ("w", "pass", "fail"),
        ("x", "fail", "pass"),
        ("y", "fail", "fail"),
        ("z", "pass", "pass"),
    ]))
    .await?;

    assert_eq!(
        summary,
        summary_of(
            false,
            buckets([&["z"], &["y"], &["a"], &["e"]]),
            buckets([&["i"], &["o"], &["x"], &["w"]]),
            &["u"],
        )
    );

    let contents = std::fs::read_to_string(&dest)?;
    assert_eq!(
        contents.split('\n').collect::<Vec<_>>(),
        [
            "# This is a comment",
            "a # this comment follows a test ID",
            "",
            "# empty lines should be tolerated, too",
            "        # along with lots of trailing whitespace    ",
            "e       # even on lines containing test IDs         ",
            "",
            "",
            "x",
            "w",
        ]
    );
    Ok(())
}

#[tokio::test]
async fn update_without_changes_preserves_text() -> Result<()> {
    test_init();

    let source = whitelist_fixture("vowels.txt");
    let dir = temp_dir()?;
    let dest = dir.path().join("vowels-copy.txt");
    let summary = Interpreter::new(&source, InterpreterOptions::new().with_output_file(&dest))
        .run(results(&[
            ("a", "fail", "pass"),
            ("e", "pass", "fail"),
            ("i", "pass", "fail"),
            ("o", "fail", "pass"),
            ("u", "fail", "pass"),
        ]))
        .await?;
    assert!(summary.passed);

    assert_eq!(
        std::fs::read_to_string(&dest)?,
        std::fs::read_to_string(&source)?,
        "output is byte-for-byte identical to the input"
    );
    Ok(())
}

#[tokio::test]
async fn update_in_place() -> Result<()> {
    test_init();

    let dir = temp_dir()?;
    let whitelist = dir.path().join("whitelist.txt");
    std::fs::write(&whitelist, "# known failures\nstale\nflaky # tracked upstream\n")?;

    let summary = Interpreter::new(
        &whitelist,
        InterpreterOptions::new().with_output_file(&whitelist),
    )
    .run(results(&[
        ("stale", "pass", "pass"),
        ("flaky", "pass", "fail"),
        ("new", "pass", "fail"),
    ]))
    .await?;
    assert!(!summary.passed);

    assert_eq!(
        std::fs::read_to_string(&whitelist)?,
        "# known failures\nflaky # tracked upstream\n\nnew"
    );
    Ok(())
}

#[tokio::test]
async fn write_failure_produces_no_summary() -> Result<()> {
    test_init();

    let dir = temp_dir()?;
    let dest = dir.path().join("missing-dir/vowels-copy.txt");
    let error = Interpreter::new(
        whitelist_fixture("vowels.txt"),
        InterpreterOptions::new().with_output_file(&dest),
    )
    .run(results(&[("a", "fail", "pass")]))
    .await
    .expect_err("parent directory of the output file doesn't exist");

    assert!(
        matches!(&error, InterpretError::WhitelistWrite(error) if error.path() == dest.as_path()),
        "unexpected error: {error:?}"
    );
    assert!(!dest.exists());
    Ok(())
}
