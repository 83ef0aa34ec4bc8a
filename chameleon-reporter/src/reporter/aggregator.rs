// Copyright (c) The chameleon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Aggregates spec outcomes over the course of a run.

use super::events::{Outcome, OutcomeKind};
use chameleon_metadata::{BrowserId, BrowserSummary, SpecId, SpecResultSummary};
use indexmap::IndexMap;
use tracing::debug;

/// Everything observed during one run.
///
/// Created empty when a run starts, updated by every spec outcome, and read once when the run
/// completes.
#[derive(Debug, Default)]
pub(crate) struct RunState {
    succeeded: Vec<Outcome>,
    failed: Vec<Outcome>,
    skipped: Vec<Outcome>,
    // None until the first outcome is recorded, which is how a run with no tests is detected.
    groups: Option<IndexMap<String, SpecGroup>>,
}

impl RunState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Folds a spec result reported by a browser into the state.
    ///
    /// Results without a suite are dropped.
    pub(crate) fn on_spec_complete(&mut self, browser: &BrowserSummary, result: SpecResultSummary) {
        let spec_id = result.id.clone();
        match Outcome::from_summary(browser, result) {
            Some(outcome) => {
                debug!(
                    browser = %outcome.browser,
                    spec = %outcome.spec_id,
                    kind = ?outcome.kind,
                    time_taken = ?outcome.time_taken,
                    "recording spec outcome",
                );
                self.record(outcome);
            }
            None => {
                debug!(
                    browser = %browser.id,
                    spec = %spec_id,
                    "dropping spec result without a suite",
                );
            }
        }
    }

    pub(crate) fn record(&mut self, outcome: Outcome) {
        let group = self
            .groups
            .get_or_insert_with(IndexMap::new)
            .entry(outcome.group_name().to_owned())
            .or_default();
        let record = group
            .specs
            .entry(outcome.spec_id.clone())
            .or_insert_with(|| SpecRecord::new(&outcome));
        // A later report from the same browser replaces the earlier one.
        record.results.insert(outcome.browser.clone(), outcome.clone());

        match outcome.kind {
            OutcomeKind::Skipped | OutcomeKind::Pending => self.skipped.push(outcome),
            OutcomeKind::Succeeded => self.succeeded.push(outcome),
            OutcomeKind::Failed => self.failed.push(outcome),
        }
    }

    pub(crate) fn succeeded(&self) -> &[Outcome] {
        &self.succeeded
    }

    pub(crate) fn failed(&self) -> &[Outcome] {
        &self.failed
    }

    pub(crate) fn skipped(&self) -> &[Outcome] {
        &self.skipped
    }

    /// Returns the spec groups in the order they were first seen, or `None` if no outcome was
    /// recorded during this run.
    pub(crate) fn groups(&self) -> Option<&IndexMap<String, SpecGroup>> {
        self.groups.as_ref()
    }
}

/// The specs under one outermost suite, conventionally one source file.
#[derive(Debug, Default)]
pub(crate) struct SpecGroup {
    specs: IndexMap<SpecId, SpecRecord>,
}

impl SpecGroup {
    pub(crate) fn specs(&self) -> impl Iterator<Item = &SpecRecord> {
        self.specs.values()
    }

    pub(crate) fn len(&self) -> usize {
        self.specs.len()
    }
}

/// One logical spec and its outcome in each browser that reported it.
#[derive(Debug)]
pub(crate) struct SpecRecord {
    // Suite names followed by the description, taken from the first outcome seen.
    path: Vec<String>,
    results: IndexMap<BrowserId, Outcome>,
}

impl SpecRecord {
    fn new(outcome: &Outcome) -> Self {
        Self {
            path: outcome.full_path(),
            results: IndexMap::new(),
        }
    }

    pub(crate) fn path(&self) -> &[String] {
        &self.path
    }

    pub(crate) fn outcome(&self, browser: &BrowserId) -> Option<&Outcome> {
        self.results.get(browser)
    }
}
