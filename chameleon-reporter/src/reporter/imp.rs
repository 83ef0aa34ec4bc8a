// Copyright (c) The chameleon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Folds runner events into run state, and writes a report whenever a run completes.
//!
//! The main structure in this module is [`Reporter`].

use super::{
    aggregator::RunState,
    displayer::{DisplayReporter, DisplayReporterBuilder, FormatFailure, StackTraceFormatter},
};
use crate::{config::ReporterConfig, errors::WriteEventError};
use chameleon_metadata::{ChameleonExitCode, RunResultsSummary, RunnerEvent};
use tracing::debug;

/// Standard output destination for the reporter.
///
/// This is usually a terminal, but can be an in-memory buffer for tests.
pub enum ReporterStdout<'a> {
    /// Produce output on the (possibly piped) terminal.
    Terminal,

    /// Write output to a buffer.
    Buffer(&'a mut String),
}

/// Reporter builder.
pub struct ReporterBuilder {
    should_colorize: bool,
    unicode: Option<bool>,
    spec_length: usize,
    formatter: Option<Box<dyn FormatFailure>>,
}

impl Default for ReporterBuilder {
    fn default() -> Self {
        Self {
            should_colorize: false,
            unicode: None,
            spec_length: ReporterConfig::default_config().spec_length(),
            formatter: None,
        }
    }
}

impl ReporterBuilder {
    /// Creates a builder with the spec length and failure formatter from `config`.
    ///
    /// Colors are not enabled here: whether to colorize also depends on the output stream.
    pub fn from_config(config: &ReporterConfig) -> Self {
        let mut builder = Self::default();
        builder
            .set_spec_length(config.spec_length())
            .set_formatter(StackTraceFormatter::new(
                config.strip_path_prefixes().iter().cloned(),
            ));
        builder
    }

    /// Set to true if the reporter should colorize output.
    pub fn set_colorize(&mut self, should_colorize: bool) -> &mut Self {
        self.should_colorize = should_colorize;
        self
    }

    /// Forces Unicode or ASCII glyphs.
    ///
    /// By default, Unicode is used for buffers, and for terminals that support it.
    pub fn set_unicode(&mut self, unicode: bool) -> &mut Self {
        self.unicode = Some(unicode);
        self
    }

    /// Sets the maximum width of suite and spec labels.
    pub fn set_spec_length(&mut self, spec_length: usize) -> &mut Self {
        self.spec_length = spec_length;
        self
    }

    /// Sets the formatter used for failure logs. Defaults to a [`StackTraceFormatter`] that
    /// doesn't strip any prefixes.
    pub fn set_formatter(&mut self, formatter: impl FormatFailure + 'static) -> &mut Self {
        self.formatter = Some(Box::new(formatter));
        self
    }

    /// Creates a new reporter writing to the given output.
    pub fn build(self, output: ReporterStdout<'_>) -> Reporter<'_> {
        let display_reporter = DisplayReporterBuilder {
            should_colorize: self.should_colorize,
            unicode: self.unicode,
            spec_length: self.spec_length,
            formatter: self
                .formatter
                .unwrap_or_else(|| Box::new(StackTraceFormatter::default())),
        }
        .build(output);

        Reporter {
            display_reporter,
            state: RunState::new(),
            run_in_progress: false,
            last_run_status: None,
        }
    }
}

/// Functionality to report runner events to the terminal.
///
/// Events must be reported in the order the runner emitted them. A reporter may observe several
/// runs; each run starts from a clean state.
pub struct Reporter<'a> {
    display_reporter: DisplayReporter<'a>,
    state: RunState,
    run_in_progress: bool,
    last_run_status: Option<RunStatus>,
}

impl Reporter<'_> {
    /// Reports an event.
    ///
    /// The report for a run is written when its `run-complete` event arrives.
    pub fn report_event(&mut self, event: RunnerEvent) -> Result<(), WriteEventError> {
        match event {
            RunnerEvent::RunStart => {
                debug!("run started");
                self.state = RunState::new();
                self.run_in_progress = true;
                Ok(())
            }
            RunnerEvent::SpecComplete { browser, result } => {
                self.state.on_spec_complete(&browser, result);
                Ok(())
            }
            RunnerEvent::RunComplete { browsers, results } => {
                let status = RunStatus::new(&self.state, &results);
                debug!(?status, "run complete");
                self.run_in_progress = false;
                self.last_run_status = Some(status);
                self.display_reporter
                    .write_run_complete(&self.state, &browsers, &results)
            }
        }
    }

    /// Returns true if a run has started but not yet completed.
    pub fn run_in_progress(&self) -> bool {
        self.run_in_progress
    }

    /// Returns the status of the most recently completed run, or `None` if no run has completed.
    pub fn last_run_status(&self) -> Option<RunStatus> {
        self.last_run_status
    }
}

/// The overall status of a completed run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunStatus {
    /// Every spec that ran succeeded.
    Passed,

    /// One or more specs failed.
    Failed {
        /// The number of failed spec executions, across all browsers.
        failed: usize,
    },

    /// The run completed without any spec outcomes.
    NoTestsRun,

    /// A browser disconnected, or the runner reported an error outside of any spec.
    Incomplete,
}

impl RunStatus {
    fn new(state: &RunState, results: &RunResultsSummary) -> Self {
        if results.is_incomplete() {
            Self::Incomplete
        } else if state.groups().is_none() {
            Self::NoTestsRun
        } else if results.failed > 0 {
            Self::Failed {
                failed: results.failed,
            }
        } else {
            Self::Passed
        }
    }

    /// Returns the process exit code for this status.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Passed => ChameleonExitCode::OK,
            Self::Failed { .. } => ChameleonExitCode::TEST_RUN_FAILED,
            Self::NoTestsRun => ChameleonExitCode::NO_TESTS_RUN,
            Self::Incomplete => ChameleonExitCode::RUN_INCOMPLETE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::{aggregator::test_helpers::spec_result, events::OutcomeKind};
    use chameleon_metadata::BrowserSummary;
    use test_case::test_case;

    fn run_events(kind: OutcomeKind, results: RunResultsSummary) -> Vec<RunnerEvent> {
        let browser = BrowserSummary::new("b0", "Chrome");
        vec![
            RunnerEvent::RunStart,
            RunnerEvent::SpecComplete {
                browser: browser.clone(),
                result: spec_result("s0", &["a.spec.js"], "spec", kind),
            },
            RunnerEvent::RunComplete {
                browsers: vec![browser],
                results,
            },
        ]
    }

    #[test_case(
        OutcomeKind::Succeeded,
        RunResultsSummary { success: 1, ..Default::default() },
        RunStatus::Passed
        ; "passed"
    )]
    #[test_case(
        OutcomeKind::Failed,
        RunResultsSummary { failed: 1, ..Default::default() },
        RunStatus::Failed { failed: 1 }
        ; "failed"
    )]
    #[test_case(
        OutcomeKind::Failed,
        RunResultsSummary { failed: 1, disconnected: true, ..Default::default() },
        RunStatus::Incomplete
        ; "disconnected"
    )]
    #[test_case(
        OutcomeKind::Succeeded,
        RunResultsSummary { error: true, ..Default::default() },
        RunStatus::Incomplete
        ; "runner error"
    )]
    fn last_run_status(kind: OutcomeKind, results: RunResultsSummary, expected: RunStatus) {
        let mut out = String::new();
        let mut reporter = ReporterBuilder::default().build(ReporterStdout::Buffer(&mut out));
        assert_eq!(reporter.last_run_status(), None);

        for event in run_events(kind, results) {
            reporter.report_event(event).unwrap();
        }
        assert!(!reporter.run_in_progress());
        assert_eq!(reporter.last_run_status(), Some(expected));
    }

    #[test]
    fn no_tests_run_status() {
        let mut out = String::new();
        let mut reporter = ReporterBuilder::default().build(ReporterStdout::Buffer(&mut out));
        reporter.report_event(RunnerEvent::RunStart).unwrap();
        assert!(reporter.run_in_progress());
        reporter
            .report_event(RunnerEvent::RunComplete {
                browsers: vec![BrowserSummary::new("b0", "Chrome")],
                results: RunResultsSummary::default(),
            })
            .unwrap();

        let status = reporter.last_run_status().expect("run completed");
        assert_eq!(status, RunStatus::NoTestsRun);
        assert_eq!(status.exit_code(), ChameleonExitCode::NO_TESTS_RUN);
    }

    #[test]
    fn config_sets_formatter() {
        let mut config = ReporterConfig::default_config();
        config.extend_strip_path_prefixes(["/build/".to_owned()]);
        config.set_spec_length(20).unwrap();

        let browser = BrowserSummary::new("b0", "Chrome");
        let mut result = spec_result("s0", &["a.spec.js"], "spec", OutcomeKind::Failed);
        result.log = vec!["Error: at /build/src/a.js:1:1".to_owned()];

        let mut out = String::new();
        let mut reporter =
            ReporterBuilder::from_config(&config).build(ReporterStdout::Buffer(&mut out));
        for event in [
            RunnerEvent::RunStart,
            RunnerEvent::SpecComplete {
                browser: browser.clone(),
                result,
            },
            RunnerEvent::RunComplete {
                browsers: vec![browser],
                results: RunResultsSummary {
                    failed: 1,
                    ..Default::default()
                },
            },
        ] {
            reporter.report_event(event).unwrap();
        }
        drop(reporter);

        assert!(out.contains("     Error: at src/a.js:1:1\n"), "output:\n{out}");
        // The group label is padded to the configured width.
        assert!(out.contains(&format!("  {:18} [", "a.spec.js")), "output:\n{out}");
    }
}
