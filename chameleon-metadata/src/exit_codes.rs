// Copyright (c) The chameleon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Documented exit codes for `chameleon` failures.
///
/// Unknown/unexpected failures will always result in exit code 1.
pub enum ChameleonExitCode {}

impl ChameleonExitCode {
    /// No errors occurred and every reported spec passed or was skipped.
    pub const OK: i32 = 0;

    /// A run completed without any spec outcomes being reported.
    pub const NO_TESTS_RUN: i32 = 4;

    /// One or more specs failed in at least one browser.
    pub const TEST_RUN_FAILED: i32 = 100;

    /// The event stream ended before a run completed, or the runner reported that a browser
    /// disconnected or errored out.
    pub const RUN_INCOMPLETE: i32 = 106;

    /// Writing the report to stdout produced an error.
    pub const WRITE_OUTPUT_ERROR: i32 = 110;

    /// A user issue happened while setting up a chameleon invocation, e.g. an invalid config file
    /// or an unreadable event stream.
    pub const SETUP_ERROR: i32 = 96;
}
