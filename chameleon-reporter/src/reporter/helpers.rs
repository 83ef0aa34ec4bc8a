// Copyright (c) The chameleon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{classify::Verdict, events::OutcomeKind};
use owo_colors::Style;

#[derive(Debug, Default, Clone)]
pub(super) struct Styles {
    pub(super) heading: Style,
    pub(super) pass: Style,
    pub(super) skip: Style,
    pub(super) fail: Style,
}

impl Styles {
    pub(super) fn colorize(&mut self) {
        self.heading = Style::new().bold().underline();
        self.pass = Style::new().green();
        self.skip = Style::new().yellow();
        self.fail = Style::new().red();
    }

    /// The style for a single browser's outcome in a detail row.
    pub(super) fn for_outcome(&self, kind: Option<OutcomeKind>) -> Style {
        match kind {
            Some(OutcomeKind::Succeeded) => self.pass,
            Some(OutcomeKind::Failed) => self.fail,
            Some(OutcomeKind::Skipped | OutcomeKind::Pending) | None => self.skip,
        }
    }

    /// The style for a group label, given the verdicts of its specs.
    pub(super) fn for_verdict(&self, verdict: Verdict) -> Style {
        match verdict {
            Verdict::Succeeded => self.pass,
            Verdict::Errored => self.fail,
            Verdict::Skipped => self.skip,
        }
    }
}

/// Glyphs used to mark outcomes.
#[derive(Clone, Debug)]
pub(super) struct ThemeCharacters {
    pass: char,
    fail: char,
    skip: char,
    unknown: char,
}

impl Default for ThemeCharacters {
    fn default() -> Self {
        Self {
            pass: '+',
            fail: 'x',
            skip: '-',
            unknown: '?',
        }
    }
}

impl ThemeCharacters {
    pub(super) fn use_unicode(&mut self) {
        self.pass = '✓';
        self.fail = '✗';
    }

    pub(super) fn pass(&self) -> char {
        self.pass
    }

    pub(super) fn fail(&self) -> char {
        self.fail
    }

    pub(super) fn skip(&self) -> char {
        self.skip
    }

    /// The glyph for one browser's outcome; `None` means the browser never reported the spec.
    pub(super) fn for_outcome(&self, kind: Option<OutcomeKind>) -> char {
        match kind {
            Some(OutcomeKind::Succeeded) => self.pass,
            Some(OutcomeKind::Failed) => self.fail,
            Some(OutcomeKind::Skipped | OutcomeKind::Pending) => self.skip,
            None => self.unknown,
        }
    }
}
