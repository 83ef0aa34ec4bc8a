// Copyright (c) The chameleon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use camino::{Utf8Path, Utf8PathBuf};
use chameleon_metadata::RunnerEvent;
use chameleon_reporter::{
    event_stream::EventStreamReader,
    reporter::{ReporterBuilder, ReporterStdout, RunStatus},
};
use color_eyre::eyre::{Result, WrapErr};
use std::{
    fs::File,
    io::{BufRead, BufReader},
};

/// The label width used by every replay unless a test overrides it.
pub(crate) const SPEC_LENGTH: usize = 40;

pub(crate) fn fixture_path(name: &str) -> Utf8PathBuf {
    Utf8Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../fixtures/events")
        .join(name)
}

pub(crate) fn open_fixture(name: &str) -> Result<BufReader<File>> {
    let path = fixture_path(name);
    let file = File::open(&path).wrap_err_with(|| format!("failed to open fixture {path}"))?;
    Ok(BufReader::new(file))
}

/// What the reporter produced for a replayed stream.
#[derive(Debug)]
pub(crate) struct Replay {
    pub(crate) output: String,
    /// The status after each completed run, in order.
    pub(crate) statuses: Vec<RunStatus>,
    pub(crate) events: usize,
    pub(crate) run_in_progress: bool,
}

pub(crate) fn replay_fixture(
    name: &str,
    configure: impl FnOnce(&mut ReporterBuilder),
) -> Result<Replay> {
    replay_reader(open_fixture(name)?, configure)
}

pub(crate) fn replay_reader(
    reader: impl BufRead,
    configure: impl FnOnce(&mut ReporterBuilder),
) -> Result<Replay> {
    let mut builder = ReporterBuilder::default();
    builder.set_spec_length(SPEC_LENGTH);
    configure(&mut builder);

    let mut output = String::new();
    let mut statuses = Vec::new();
    let mut events = 0;

    let mut reporter = builder.build(ReporterStdout::Buffer(&mut output));
    for event in EventStreamReader::new(reader) {
        let event = event?;
        events += 1;
        let completes_run = matches!(event, RunnerEvent::RunComplete { .. });
        reporter.report_event(event)?;
        if completes_run {
            statuses.extend(reporter.last_run_status());
        }
    }
    let run_in_progress = reporter.run_in_progress();
    drop(reporter);

    Ok(Replay {
        output,
        statuses,
        events,
        run_in_progress,
    })
}
