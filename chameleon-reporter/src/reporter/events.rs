// Copyright (c) The chameleon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Spec outcomes as seen by the reporter.
//!
//! These are derived from the wire-level [`SpecResultSummary`] once per event, so that the rest
//! of the reporter doesn't need to reinterpret the runner's flags.

use chameleon_metadata::{BrowserId, BrowserSummary, SpecId, SpecResultSummary};
use std::time::Duration;

/// The result of one spec in one browser.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub(crate) enum OutcomeKind {
    Succeeded,
    Failed,
    Skipped,
    Pending,
}

impl OutcomeKind {
    /// Derives the kind from the runner's flags. Skipped and pending specs win over the success
    /// flag.
    pub(crate) fn from_result(result: &SpecResultSummary) -> Self {
        if result.skipped {
            Self::Skipped
        } else if result.pending {
            Self::Pending
        } else if result.success {
            Self::Succeeded
        } else {
            Self::Failed
        }
    }

    /// Returns true for skipped and pending outcomes.
    pub(crate) fn is_skipped(self) -> bool {
        matches!(self, Self::Skipped | Self::Pending)
    }
}

/// One browser's outcome for one spec.
#[derive(Clone, Debug)]
pub(crate) struct Outcome {
    pub(crate) browser: BrowserId,
    pub(crate) spec_id: SpecId,
    pub(crate) description: String,
    /// Enclosing suite names, outermost first. Never empty.
    pub(crate) suite: Vec<String>,
    pub(crate) kind: OutcomeKind,
    pub(crate) log: Vec<String>,
    pub(crate) time_taken: Duration,
}

impl Outcome {
    /// Converts a spec result into an outcome.
    ///
    /// Returns `None` if the result can't be attributed to a suite, since the outermost suite
    /// decides which group the spec is reported under.
    pub(crate) fn from_summary(browser: &BrowserSummary, result: SpecResultSummary) -> Option<Self> {
        let kind = OutcomeKind::from_result(&result);
        let suite = result.suite.filter(|suite| !suite.is_empty())?;
        Some(Self {
            browser: browser.id.clone(),
            spec_id: result.id,
            description: result.description,
            suite,
            kind,
            log: result.log,
            time_taken: Duration::from_millis(result.time_ms),
        })
    }

    /// The name of the group this outcome belongs to: its outermost suite.
    pub(crate) fn group_name(&self) -> &str {
        &self.suite[0]
    }

    /// The suite path followed by the spec's own description.
    pub(crate) fn full_path(&self) -> Vec<String> {
        let mut path = self.suite.clone();
        path.push(self.description.clone());
        path
    }
}
