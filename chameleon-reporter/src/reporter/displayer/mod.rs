// Copyright (c) The chameleon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The displayer for human-friendly output.

mod formatters;
mod imp;
mod path;

pub use formatters::{DisplayTimeInterval, FormatFailure, StackTraceFormatter};
pub(crate) use imp::*;
