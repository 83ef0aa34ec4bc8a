// Copyright (c) The chameleon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Renders hierarchical, browser-matrix test reports from a stream of runner events.
//!
//! `chameleon report` reads JSON-lines runner events from a file or standard input, and prints a
//! report every time a run completes. The process exits with a code describing the last run: see
//! [`ChameleonExitCode`](chameleon_metadata::ChameleonExitCode).

#![warn(missing_docs)]

mod dispatch;
mod errors;
mod output;

#[doc(hidden)]
pub use dispatch::*;
#[doc(hidden)]
pub use errors::*;
#[doc(hidden)]
pub use output::{OutputContext, OutputWriter, StderrStyles};
