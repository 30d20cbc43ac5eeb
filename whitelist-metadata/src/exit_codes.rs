// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Documented exit codes for `whitelist-interpret` failures.
///
/// Unknown/unexpected failures will always result in exit code 1.
pub enum WhitelistExitCode {}

impl WhitelistExitCode {
    /// The run completed and every result was allowed.
    pub const OK: i32 = 0;

    /// A user issue happened while setting up an invocation, for example an invalid config file
    /// or a missing whitelist path.
    pub const SETUP_ERROR: i32 = 96;

    /// The run completed and a summary was published, but it did not pass: at least one result
    /// was disallowed or a whitelist entry was never seen.
    pub const RUN_FAILED: i32 = 100;

    /// The whitelist file could not be read. No summary was produced.
    pub const WHITELIST_READ_FAILED: i32 = 101;

    /// The updated whitelist could not be written. No summary was produced.
    pub const WHITELIST_WRITE_FAILED: i32 = 102;

    /// The stream of test results could not be read or contained an invalid record.
    pub const RESULT_STREAM_FAILED: i32 = 103;

    /// Writing data to stdout, stderr or the summary file produced an error.
    pub const WRITE_OUTPUT_ERROR: i32 = 110;
}
