// Copyright (c) The chameleon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt;

/// An event emitted by a test runner, in the order the runner observed it.
///
/// Serialized as a JSON object with a `type` tag, one event per line:
///
/// ```json
/// {"type":"run-start"}
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RunnerEvent {
    /// A new run is starting. Any state from a previous run is discarded.
    RunStart,

    /// One browser finished executing one spec.
    SpecComplete {
        /// The browser that executed the spec.
        browser: BrowserSummary,

        /// The outcome of the spec in this browser.
        result: SpecResultSummary,
    },

    /// The run finished in every browser.
    RunComplete {
        /// The final state of every browser that took part in the run.
        browsers: Vec<BrowserSummary>,

        /// Results for the run as a whole.
        results: RunResultsSummary,
    },
}

impl RunnerEvent {
    /// Parses a single line of a JSON-lines event stream.
    pub fn from_json_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }

    /// Returns a short, static name for the kind of event this is.
    pub fn kind_str(&self) -> &'static str {
        match self {
            Self::RunStart => "run-start",
            Self::SpecComplete { .. } => "spec-complete",
            Self::RunComplete { .. } => "run-complete",
        }
    }
}

/// A stable identifier for a browser, assigned by the runner.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct BrowserId(SmolStr);

impl BrowserId {
    /// Creates a new browser ID.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(SmolStr::new(id))
    }

    /// Returns the ID as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BrowserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stable identifier for a spec, shared by every browser that runs "the same" spec.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct SpecId(SmolStr);

impl SpecId {
    /// Creates a new spec ID.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(SmolStr::new(id))
    }

    /// Returns the ID as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A browser taking part in a run.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BrowserSummary {
    /// The browser's ID.
    pub id: BrowserId,

    /// A human-readable label, e.g. `Chrome 120.0 (Linux x86_64)`.
    pub name: String,

    /// True if the browser finished the run cleanly and is ready for another one.
    #[serde(default)]
    pub is_ready: bool,

    /// Counts and timings from the browser's most recent run.
    #[serde(default)]
    pub last_result: BrowserResultSummary,
}

impl BrowserSummary {
    /// Creates a summary with an empty last result, as sent alongside `spec-complete` events.
    pub fn new(id: impl AsRef<str>, name: impl Into<String>) -> Self {
        Self {
            id: BrowserId::new(id),
            name: name.into(),
            is_ready: false,
            last_result: BrowserResultSummary::default(),
        }
    }
}

impl fmt::Display for BrowserSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Counts and timings for a single browser's run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BrowserResultSummary {
    /// The number of specs the browser was asked to run.
    #[serde(default)]
    pub total: usize,

    /// The number of specs that succeeded.
    #[serde(default)]
    pub success: usize,

    /// The number of specs that failed.
    #[serde(default)]
    pub failed: usize,

    /// The number of specs that were skipped or pending.
    #[serde(default)]
    pub skipped: usize,

    /// Wall-clock time for the run in milliseconds, including startup.
    #[serde(default)]
    pub total_time_ms: u64,

    /// Time spent executing specs in milliseconds.
    #[serde(default)]
    pub net_time_ms: u64,
}

/// The outcome of one spec in one browser.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SpecResultSummary {
    /// The spec's ID.
    pub id: SpecId,

    /// The spec's own description (the leaf of its suite path).
    pub description: String,

    /// The names of the enclosing suites, outermost first. The first entry is conventionally the
    /// source file under test.
    ///
    /// Runners that cannot attribute a spec to a suite send `null` or omit the field.
    #[serde(default)]
    pub suite: Option<Vec<String>>,

    /// True if the spec passed.
    #[serde(default)]
    pub success: bool,

    /// True if the spec was skipped.
    #[serde(default)]
    pub skipped: bool,

    /// True if the spec is pending (declared but not yet implemented).
    #[serde(default)]
    pub pending: bool,

    /// Failure messages, in the order the runner recorded them.
    #[serde(default)]
    pub log: Vec<String>,

    /// Time taken by the spec in milliseconds.
    #[serde(default)]
    pub time_ms: u64,
}

/// Results for a run as a whole.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RunResultsSummary {
    /// The number of successful spec executions, across all browsers.
    #[serde(default)]
    pub success: usize,

    /// The number of failed spec executions, across all browsers.
    #[serde(default)]
    pub failed: usize,

    /// True if the runner hit an error outside of any spec.
    #[serde(default)]
    pub error: bool,

    /// True if one or more browsers disconnected during the run.
    #[serde(default)]
    pub disconnected: bool,

    /// The exit code the runner itself intends to use.
    #[serde(default)]
    pub exit_code: i32,
}

impl RunResultsSummary {
    /// Returns true if the run did not finish cleanly in every browser.
    pub fn is_incomplete(&self) -> bool {
        self.error || self.disconnected
    }
}
