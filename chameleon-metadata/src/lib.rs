// Copyright (c) The chameleon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Machine-readable inputs and outputs of the chameleon test reporter.
//!
//! A test runner drives chameleon by writing one [`RunnerEvent`] per line, as JSON, to the
//! reporter's input. The types in this crate describe that stream. Exit codes produced by the
//! `chameleon` binary are documented in [`ChameleonExitCode`].

mod events;
mod exit_codes;

pub use events::*;
pub use exit_codes::*;
