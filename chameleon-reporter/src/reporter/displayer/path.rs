// Copyright (c) The chameleon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rendering nested suite paths as an indented tree.
//!
//! Successive paths usually share a prefix: specs in the same suite are reported one after the
//! other. [`PathCursor`] remembers the last path it printed, and only prints the segments that
//! differ from it.

use crate::write_str::WriteStr;
use owo_colors::{OwoColorize, Style};
use std::io;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";

/// The previously rendered path.
#[derive(Clone, Debug, Default)]
pub(super) struct PathCursor {
    segments: Vec<String>,
}

impl PathCursor {
    pub(super) fn reset(&mut self) {
        self.segments.clear();
    }

    /// Writes the parts of `path` that differ from the previously written path.
    ///
    /// Ancestors already written by the previous call are skipped. Every other segment except the
    /// last is written on its own line. The last segment is padded to
    /// `max_width` columns and isn't followed by a line break, so that results can be written
    /// after it. Only the last segment is styled.
    pub(super) fn write_path<S: AsRef<str>>(
        &mut self,
        path: &[S],
        max_width: usize,
        leaf_style: Style,
        writer: &mut dyn WriteStr,
    ) -> io::Result<()> {
        let common = path
            .iter()
            .zip(&self.segments)
            .position(|(segment, seen)| segment.as_ref() != seen)
            .unwrap_or_else(|| self.segments.len().min(path.len()));
        // The leaf is always written, since callers append results to its line.
        let diverges_at = common.min(path.len().saturating_sub(1));
        self.segments.truncate(diverges_at);

        for (depth, segment) in path.iter().enumerate().skip(diverges_at) {
            let segment = segment.as_ref();
            let indent = 2 * (depth + 1);
            let label = truncate_label(&format!("{}{segment}", " ".repeat(indent)), max_width);

            if depth + 1 < path.len() {
                writeln!(writer, "{label}")?;
            } else {
                let padding = max_width.saturating_sub(label.width());
                write!(writer, "{}{}", label.style(leaf_style), " ".repeat(padding))?;
            }
            self.segments.push(segment.to_owned());
        }

        Ok(())
    }
}

/// Shortens `label` to at most `max_width` columns, ending it with `...` if anything was cut.
fn truncate_label(label: &str, max_width: usize) -> String {
    if label.width() <= max_width {
        return label.to_owned();
    }

    let budget = max_width.saturating_sub(ELLIPSIS.len());
    let mut out = String::with_capacity(max_width);
    let mut width = 0;
    for c in label.chars() {
        let char_width = c.width().unwrap_or(0);
        if width + char_width > budget {
            break;
        }
        width += char_width;
        out.push(c);
    }
    out.push_str(ELLIPSIS);
    out
}
