// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Core functionality for classifying test results against a whitelist of known failures.
//!
//! The basic flow is:
//!
//! 1. A test harness produces [`TestResult`](whitelist_metadata::TestResult) records, for example
//!    as newline-delimited JSON read by [`results::ResultReader`].
//! 2. An [`interpreter::Interpreter`] reads the whitelist when the first record arrives, and
//!    classifies each record into one of eight buckets (see [`classify`]).
//! 3. Once the input ends, the interpreter reports whitelist entries that were never seen,
//!    optionally writes an updated whitelist (see [`whitelist::update`]) and publishes a
//!    [`Summary`](whitelist_metadata::Summary).

pub mod classify;
pub mod config;
pub mod errors;
pub mod interpreter;
pub mod results;
pub mod whitelist;
