// Copyright (c) The chameleon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Report the results of a test run.
//!
//! The main type here is [`Reporter`], which is constructed via a [`ReporterBuilder`].

mod aggregator;
mod classify;
mod displayer;
mod events;
mod helpers;
mod imp;

pub use displayer::{DisplayTimeInterval, FormatFailure, StackTraceFormatter};
pub use imp::*;
