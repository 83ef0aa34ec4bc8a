// Copyright (c) The chameleon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Renders the report for a completed run.
//!
//! The main structure in this module is [`DisplayReporter`].

use super::{
    formatters::{DisplayTimeInterval, FormatFailure},
    path::PathCursor,
};
use crate::{
    errors::WriteEventError,
    reporter::{
        aggregator::{RunState, SpecGroup},
        classify::{Totals, Verdict},
        helpers::{Styles, ThemeCharacters},
        imp::ReporterStdout,
    },
    write_str::WriteStr,
};
use chameleon_metadata::{BrowserSummary, RunResultsSummary};
use owo_colors::{OwoColorize, Style};
use std::{
    io::{self, BufWriter},
    time::Duration,
};
use tracing::debug;

pub(crate) struct DisplayReporterBuilder {
    pub(crate) should_colorize: bool,
    pub(crate) unicode: Option<bool>,
    pub(crate) spec_length: usize,
    pub(crate) formatter: Box<dyn FormatFailure>,
}

impl DisplayReporterBuilder {
    pub(crate) fn build(self, output: ReporterStdout<'_>) -> DisplayReporter<'_> {
        let mut styles = Styles::default();
        if self.should_colorize {
            styles.colorize();
        }

        let mut theme_characters = ThemeCharacters::default();
        let use_unicode = match (&output, self.unicode) {
            (_, Some(unicode)) => unicode,
            (ReporterStdout::Terminal, None) => {
                supports_unicode::on(supports_unicode::Stream::Stdout)
            }
            // Always use Unicode for internal buffers.
            (ReporterStdout::Buffer(_), None) => true,
        };
        if use_unicode {
            theme_characters.use_unicode();
        }

        DisplayReporter {
            inner: DisplayReporterImpl {
                styles,
                theme_characters,
                spec_length: self.spec_length,
                formatter: self.formatter,
            },
            stdout: output,
        }
    }
}

/// Writes a report to the terminal or a buffer.
pub(crate) struct DisplayReporter<'a> {
    inner: DisplayReporterImpl,
    stdout: ReporterStdout<'a>,
}

impl DisplayReporter<'_> {
    pub(crate) fn write_run_complete(
        &mut self,
        state: &RunState,
        browsers: &[BrowserSummary],
        results: &RunResultsSummary,
    ) -> Result<(), WriteEventError> {
        match &mut self.stdout {
            ReporterStdout::Terminal => {
                let mut writer = BufWriter::new(io::stdout());
                self.inner
                    .write_report(state, browsers, results, &mut writer)
                    .map_err(WriteEventError::Io)?;
                writer.write_str_flush().map_err(WriteEventError::Io)
            }
            ReporterStdout::Buffer(buf) => self
                .inner
                .write_report(state, browsers, results, *buf)
                .map_err(WriteEventError::Io),
        }
    }
}

struct DisplayReporterImpl {
    styles: Styles,
    theme_characters: ThemeCharacters,
    spec_length: usize,
    formatter: Box<dyn FormatFailure>,
}

impl DisplayReporterImpl {
    fn write_report(
        &self,
        state: &RunState,
        browsers: &[BrowserSummary],
        results: &RunResultsSummary,
        writer: &mut dyn WriteStr,
    ) -> io::Result<()> {
        debug!(
            browsers = browsers.len(),
            succeeded = state.succeeded().len(),
            failed = state.failed().len(),
            skipped = state.skipped().len(),
            "writing report",
        );

        // The cursor is scoped to this report, so nothing carries over from an earlier run.
        let mut renderer = ReportRenderer {
            inner: self,
            browsers,
            cursor: PathCursor::default(),
        };

        renderer.write_overall_summary(state, results, writer)?;
        for (index, browser) in browsers.iter().enumerate() {
            renderer.write_browser_line(index, browser, writer)?;
        }

        let Some(groups) = state.groups() else {
            writeln!(
                writer,
                "{}",
                "No tests ran in any browsers.".style(self.styles.fail)
            )?;
            return Ok(());
        };

        writeln!(writer)?;
        for (name, group) in groups {
            renderer.write_group(name, group, writer)?;
        }

        if !browsers.is_empty() && results.failed > 0 {
            renderer.write_failures(state, writer)?;
        }

        Ok(())
    }
}

/// The state for rendering one report.
struct ReportRenderer<'r> {
    inner: &'r DisplayReporterImpl,
    browsers: &'r [BrowserSummary],
    cursor: PathCursor,
}

impl ReportRenderer<'_> {
    fn write_overall_summary(
        &self,
        state: &RunState,
        results: &RunResultsSummary,
        writer: &mut dyn WriteStr,
    ) -> io::Result<()> {
        let styles = &self.inner.styles;
        let theme = &self.inner.theme_characters;

        writeln!(writer)?;
        writeln!(writer, "{}", "TEST SUMMARY:".style(styles.heading))?;

        // Counts from a run that didn't finish everywhere would be misleading.
        if self.browsers.is_empty() || results.is_incomplete() {
            return Ok(());
        }

        let succeeded = state.succeeded().len();
        let line = format!(
            " {} {succeeded} TESTS SUCCEEDED ({} per Browser)",
            theme.pass(),
            self.per_browser(succeeded),
        );
        writeln!(writer, "{}", line.style(styles.pass))?;

        let skipped = state.skipped().len();
        if skipped > 0 {
            let line = format!(
                " {} {skipped} TESTS SKIPPED ({} per Browser)",
                theme.skip(),
                self.per_browser(skipped),
            );
            writeln!(writer, "{}", line.style(styles.skip))?;
        }

        let failed = state.failed().len();
        if failed > 0 {
            let line = format!(
                " {} {failed} TESTS FAILED ({} per Browser)",
                theme.fail(),
                self.per_browser(failed),
            );
            writeln!(writer, "{}", line.style(styles.fail))?;
        }

        writeln!(writer)?;
        writeln!(writer, "{}", "BROWSER SUMMARY:".style(styles.heading))
    }

    fn per_browser(&self, count: usize) -> String {
        format!("{:.1}", count as f64 / self.browsers.len() as f64)
    }

    fn write_browser_line(
        &self,
        index: usize,
        browser: &BrowserSummary,
        writer: &mut dyn WriteStr,
    ) -> io::Result<()> {
        let styles = &self.inner.styles;
        let result = &browser.last_result;

        write!(
            writer,
            " {index}: {browser}: Executed {} of {}",
            result.success + result.failed,
            result.total,
        )?;

        if result.failed > 0 || result.skipped > 0 {
            let failed = (result.failed > 0).then(|| {
                format!("{} Failed", result.failed)
                    .style(styles.fail)
                    .to_string()
            });
            let skipped = (result.skipped > 0).then(|| {
                format!("{} Skipped", result.skipped)
                    .style(styles.skip)
                    .to_string()
            });
            let counts: Vec<_> = failed.into_iter().chain(skipped).collect();
            write!(writer, " ({})", counts.join(", "))?;
        }

        if browser.is_ready {
            write!(
                writer,
                " ({}, {})",
                DisplayTimeInterval(Duration::from_millis(result.total_time_ms)),
                DisplayTimeInterval(Duration::from_millis(result.net_time_ms)),
            )?;
        }

        writeln!(writer)
    }

    fn write_group(
        &mut self,
        name: &str,
        group: &SpecGroup,
        writer: &mut dyn WriteStr,
    ) -> io::Result<()> {
        let totals = Totals::compute(group, self.browsers);
        debug_assert_eq!(totals.total(), group.len(), "every spec gets one verdict");
        if totals.is_clean() {
            self.write_group_success(name, &totals, writer)
        } else {
            writeln!(writer)?;
            self.write_table_header(writer)?;
            self.write_group_partial(name, &totals, writer)?;
            self.write_group_details(group, writer)?;
            writeln!(writer)
        }
    }

    fn write_group_label(
        &mut self,
        name: &str,
        style: Style,
        writer: &mut dyn WriteStr,
    ) -> io::Result<()> {
        // Group labels start a new tree. Specs within the group then nest under the label, since
        // each spec's path starts with the group name.
        self.cursor.reset();
        self.cursor
            .write_path(&[name], self.inner.spec_length, style, writer)
    }

    fn write_group_success(
        &mut self,
        name: &str,
        totals: &Totals,
        writer: &mut dyn WriteStr,
    ) -> io::Result<()> {
        let inner = self.inner;
        self.write_group_label(name, inner.styles.pass, writer)?;
        let passed = format!(
            " {}  {} Passed",
            inner.theme_characters.pass(),
            totals.succeeded
        );
        writeln!(writer, " {}", passed.style(inner.styles.pass))
    }

    fn write_table_header(&self, writer: &mut dyn WriteStr) -> io::Result<()> {
        write!(writer, "{} ", " ".repeat(self.inner.spec_length))?;
        for index in 0..self.browsers.len() {
            if index > 0 {
                write!(writer, "  ")?;
            }
            write!(writer, " {index}")?;
        }
        writeln!(writer)
    }

    fn write_group_partial(
        &mut self,
        name: &str,
        totals: &Totals,
        writer: &mut dyn WriteStr,
    ) -> io::Result<()> {
        let inner = self.inner;
        let styles = &inner.styles;
        let theme = &inner.theme_characters;

        let verdict = if totals.errored > 0 {
            Verdict::Errored
        } else {
            Verdict::Skipped
        };
        self.write_group_label(name, styles.for_verdict(verdict), writer)?;

        writeln!(
            writer,
            " [ {} | {} | {} ]",
            format!("{} {}", theme.pass(), totals.succeeded).style(styles.pass),
            format!("{} {}", theme.skip(), totals.skipped).style(styles.skip),
            format!("{} {}", theme.fail(), totals.errored).style(styles.fail),
        )
    }

    fn write_group_details(
        &mut self,
        group: &SpecGroup,
        writer: &mut dyn WriteStr,
    ) -> io::Result<()> {
        let inner = self.inner;
        let browsers = self.browsers;
        let styles = &inner.styles;
        let theme = &inner.theme_characters;

        for record in group.specs() {
            if record.verdict(browsers).is_clean() {
                continue;
            }

            self.cursor
                .write_path(record.path(), inner.spec_length, Style::new(), writer)?;
            write!(writer, " ")?;
            for (index, browser) in browsers.iter().enumerate() {
                if index > 0 {
                    write!(writer, "  ")?;
                }
                let kind = record.outcome(&browser.id).map(|outcome| outcome.kind);
                write!(
                    writer,
                    " {}",
                    theme.for_outcome(kind).style(styles.for_outcome(kind))
                )?;
            }
            writeln!(writer)?;
        }

        Ok(())
    }

    fn write_failures(&self, state: &RunState, writer: &mut dyn WriteStr) -> io::Result<()> {
        let styles = &self.inner.styles;
        let gutter = "     ";

        writeln!(writer)?;
        writeln!(writer, "{}", "FAILED TESTS:".style(styles.heading))?;
        writeln!(writer)?;

        for (index, failure) in state.failed().iter().enumerate() {
            let index = index + 1;
            if index > 1 {
                writeln!(writer)?;
            }

            let suite = failure.suite.join(" ");
            for log in &failure.log {
                let heading = format!("{index}): {}", failure.description);
                writeln!(writer, "{}", heading.style(styles.fail))?;
                writeln!(writer, "{}", format!("{gutter}{suite}").style(styles.fail))?;
                writeln!(
                    writer,
                    "{gutter}{}",
                    self.inner.formatter.format_failure(log)
                )?;
            }
        }

        writeln!(writer)
    }
}
