// Copyright (c) The chameleon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Core functionality for the chameleon test reporter.
//!
//! A test runner feeds [`RunnerEvent`](chameleon_metadata::RunnerEvent)s into a
//! [`Reporter`](reporter::Reporter). Spec outcomes are folded into per-file groups as they
//! arrive, and once the run completes the reporter renders a summary, a tree of suites with one
//! result column per browser, and an appendix listing every failure.

pub mod config;
pub mod errors;
pub mod event_stream;
mod helpers;
pub mod reporter;
pub mod write_str;
