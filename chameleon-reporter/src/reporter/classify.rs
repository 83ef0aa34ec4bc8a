// Copyright (c) The chameleon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Merging per-browser outcomes into verdicts.
//!
//! A spec that was skipped in any browser counts as skipped, even if it failed elsewhere. Failing
//! in any browser counts as an error. Only a spec that succeeded everywhere it ran succeeds.

use super::{
    aggregator::{SpecGroup, SpecRecord},
    events::OutcomeKind,
};
use chameleon_metadata::BrowserSummary;

/// The merged result of one spec across all browsers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Verdict {
    Succeeded,
    Errored,
    Skipped,
}

impl Verdict {
    pub(crate) fn is_clean(self) -> bool {
        self == Self::Succeeded
    }
}

/// Reduces one spec's outcomes to a verdict.
pub(crate) fn classify_spec(kinds: impl IntoIterator<Item = OutcomeKind>) -> Verdict {
    let mut any_errors = false;
    for kind in kinds {
        if kind.is_skipped() {
            return Verdict::Skipped;
        }
        if kind == OutcomeKind::Failed {
            any_errors = true;
        }
    }

    if any_errors {
        Verdict::Errored
    } else {
        Verdict::Succeeded
    }
}

impl SpecRecord {
    /// Classifies this spec using the outcomes of the given browsers. Browsers that never
    /// reported this spec are ignored.
    pub(crate) fn verdict(&self, browsers: &[BrowserSummary]) -> Verdict {
        classify_spec(
            browsers
                .iter()
                .filter_map(|browser| self.outcome(&browser.id))
                .map(|outcome| outcome.kind),
        )
    }
}

/// Counts of the specs in a group, by verdict.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Totals {
    pub(crate) succeeded: usize,
    pub(crate) errored: usize,
    pub(crate) skipped: usize,
}

impl Totals {
    /// Computes totals with a full pass over the group.
    pub(crate) fn compute(group: &SpecGroup, browsers: &[BrowserSummary]) -> Self {
        let mut totals = Self::default();
        for record in group.specs() {
            match record.verdict(browsers) {
                Verdict::Succeeded => totals.succeeded += 1,
                Verdict::Errored => totals.errored += 1,
                Verdict::Skipped => totals.skipped += 1,
            }
        }
        totals
    }

    /// Returns true if every spec in the group succeeded.
    pub(crate) fn is_clean(&self) -> bool {
        self.errored == 0 && self.skipped == 0
    }

    pub(crate) fn total(&self) -> usize {
        self.succeeded + self.errored + self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;
    use test_strategy::proptest;

    use crate::reporter::events::OutcomeKind::*;

    #[test_case(&[], Verdict::Succeeded ; "no outcomes")]
    #[test_case(&[Succeeded, Succeeded], Verdict::Succeeded ; "all succeeded")]
    #[test_case(&[Succeeded, Failed], Verdict::Errored ; "one failure")]
    #[test_case(&[Failed, Skipped], Verdict::Skipped ; "skip after failure")]
    #[test_case(&[Skipped, Failed], Verdict::Skipped ; "skip before failure")]
    #[test_case(&[Pending, Succeeded], Verdict::Skipped ; "pending counts as skipped")]
    fn classify(kinds: &[OutcomeKind], expected: Verdict) {
        assert_eq!(classify_spec(kinds.iter().copied()), expected);
    }

    #[proptest(cases = 256)]
    fn skip_dominates(kinds: Vec<OutcomeKind>) {
        let verdict = classify_spec(kinds.iter().copied());
        if kinds.iter().any(|kind| kind.is_skipped()) {
            assert_eq!(verdict, Verdict::Skipped);
        } else if kinds.contains(&Failed) {
            assert_eq!(verdict, Verdict::Errored);
        } else {
            assert_eq!(verdict, Verdict::Succeeded);
        }
    }

    #[test]
    fn totals_clean() {
        let totals = Totals {
            succeeded: 3,
            ..Default::default()
        };
        assert!(totals.is_clean());
        assert_eq!(totals.total(), 3);

        let totals = Totals {
            succeeded: 3,
            skipped: 1,
            ..Default::default()
        };
        assert!(!totals.is_clean());
    }
}
