// Copyright (c) The chameleon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Display helpers for time intervals and failure logs.

use crate::helpers::plural;
use std::{fmt, time::Duration};
use swrite::{SWrite, swrite};

/// Displays a time interval in minutes and seconds, e.g. `1.2 secs` or `2 mins 0.5 secs`.
///
/// Seconds are shown with up to millisecond precision, without trailing zeros.
#[derive(Copy, Clone, Debug)]
pub struct DisplayTimeInterval(pub Duration);

impl fmt::Display for DisplayTimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_millis = self.0.as_millis();
        let mins = (total_millis / 60_000) as u64;
        let millis = total_millis % 60_000;
        let whole_secs = millis / 1000;
        let frac_millis = millis % 1000;

        if mins > 0 {
            write!(f, "{mins} {} ", plural::mins_str(mins))?;
        }
        if frac_millis == 0 {
            write!(
                f,
                "{whole_secs} {}",
                plural::secs_plural_if(whole_secs != 1)
            )
        } else {
            let frac = format!("{frac_millis:03}");
            write!(
                f,
                "{whole_secs}.{} {}",
                frac.trim_end_matches('0'),
                plural::secs_plural_if(true)
            )
        }
    }
}

/// Formats a single failure log entry for the failure appendix.
///
/// The result is written after a five-space gutter. Continuation lines should carry their own
/// indentation.
pub trait FormatFailure {
    /// Formats `log`, returning text without a trailing newline.
    fn format_failure(&self, log: &str) -> String;
}

impl<F> FormatFailure for F
where
    F: Fn(&str) -> String,
{
    fn format_failure(&self, log: &str) -> String {
        self(log)
    }
}

/// The default failure formatter.
///
/// Removes configured prefixes (typically bundler or temporary directories) from stack frames,
/// drops trailing blank lines, and indents continuation lines to line up under the first line.
#[derive(Clone, Debug, Default)]
pub struct StackTraceFormatter {
    strip_prefixes: Vec<String>,
}

impl StackTraceFormatter {
    /// The indentation applied to continuation lines.
    pub const GUTTER: &'static str = "     ";

    /// Creates a new formatter that removes the given prefixes.
    pub fn new(strip_prefixes: impl IntoIterator<Item = String>) -> Self {
        Self {
            strip_prefixes: strip_prefixes
                .into_iter()
                .filter(|prefix| !prefix.is_empty())
                .collect(),
        }
    }

    fn strip_line(&self, line: &str) -> String {
        let mut line = line.trim_end().to_owned();
        for prefix in &self.strip_prefixes {
            if line.contains(prefix.as_str()) {
                line = line.replace(prefix.as_str(), "");
            }
        }
        line
    }
}

impl FormatFailure for StackTraceFormatter {
    fn format_failure(&self, log: &str) -> String {
        let mut out = String::with_capacity(log.len());
        for (i, line) in log.trim_end().lines().enumerate() {
            if i > 0 {
                out.push('\n');
                let line = self.strip_line(line);
                if !line.is_empty() {
                    swrite!(out, "{}{}", Self::GUTTER, line.trim_start());
                }
            } else {
                out.push_str(&self.strip_line(line));
            }
        }
        out
    }
}
