// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Structured access to the inputs and outputs of the whitelist interpreter.
//!
//! A test harness produces a stream of [`TestResult`] records. The interpreter classifies each
//! one against a whitelist of known failures and publishes a [`Summary`] once the stream ends.
//! Both types serialize to and from JSON, so they can be exchanged with tools written in other
//! languages.

mod exit_codes;
mod result;
mod summary;

pub use exit_codes::*;
pub use result::*;
pub use summary::*;
