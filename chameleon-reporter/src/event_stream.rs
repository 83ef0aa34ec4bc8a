// Copyright (c) The chameleon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reading runner events from a JSON-lines stream.

use crate::errors::EventStreamReadError;
use chameleon_metadata::RunnerEvent;
use std::io::BufRead;
use tracing::warn;

/// Reads [`RunnerEvent`]s from a JSON-lines stream, one event per line.
///
/// Blank lines are skipped. Lines that aren't valid UTF-8 or don't parse as an event are
/// logged as warnings and skipped, so a single malformed event doesn't prevent the rest of the run from being reported.
/// Only I/O errors are returned.
#[derive(Debug)]
pub struct EventStreamReader<R> {
    reader: R,
    line_number: usize,
    buf: Vec<u8>,
}

impl<R: BufRead> EventStreamReader<R> {
    /// Creates a new reader over the given stream.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            buf: Vec::new(),
        }
    }

    /// Returns the number of lines read so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Reads the next event from the stream.
    ///
    /// Returns `Ok(None)` once the stream is exhausted.
    pub fn next_event(&mut self) -> Result<Option<RunnerEvent>, EventStreamReadError> {
        loop {
            self.buf.clear();
            let bytes_read = self
                .reader
                .read_until(b'\n', &mut self.buf)
                .map_err(|err| EventStreamReadError::new(self.line_number + 1, err))?;
            if bytes_read == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let line = match std::str::from_utf8(&self.buf) {
                Ok(line) => line.trim(),
                Err(error) => {
                    warn!(
                        "ignoring malformed event at line {}: {error}",
                        self.line_number
                    );
                    continue;
                }
            };
            if line.is_empty() {
                continue;
            }

            match RunnerEvent::from_json_line(line) {
                Ok(event) => return Ok(Some(event)),
                Err(error) => {
                    warn!(
                        "ignoring malformed event at line {}: {error}",
                        self.line_number
                    );
                }
            }
        }
    }
}

impl<R: BufRead> Iterator for EventStreamReader<R> {
    type Item = Result<RunnerEvent, EventStreamReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_event().transpose()
    }
}
