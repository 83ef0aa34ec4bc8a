// Copyright (c) The chameleon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::fixtures::*;
use chameleon_metadata::ChameleonExitCode;
use chameleon_reporter::reporter::{RunStatus, StackTraceFormatter};
use color_eyre::eyre::Result;
use indoc::indoc;
use pretty_assertions::assert_eq;
use std::io::Cursor;
use test_case::test_case;

#[test]
fn passing_run() -> Result<()> {
    let replay = replay_fixture("passing.jsonl", |_| {})?;

    assert_eq!(replay.statuses, [RunStatus::Passed]);
    assert_eq!(replay.statuses[0].exit_code(), ChameleonExitCode::OK);
    assert!(!replay.run_in_progress);
    assert_eq!(
        replay.output,
        indoc! {"

            TEST SUMMARY:
             ✓ 6 TESTS SUCCEEDED (3.0 per Browser)

            BROWSER SUMMARY:
             0: Chrome Headless 120.0 (Linux x86_64): Executed 3 of 3 (2.345 secs, 0.008 secs)
             1: Firefox 121.0 (Linux x86_64): Executed 3 of 3 (3.1 secs, 0.009 secs)

              calculator.spec.js                      ✓  2 Passed
              format.spec.js                          ✓  1 Passed
        "}
    );
    Ok(())
}

#[test]
fn mixed_run() -> Result<()> {
    let replay = replay_fixture("mixed.jsonl", |builder| {
        builder.set_formatter(StackTraceFormatter::new(["webpack:///".to_owned()]));
    })?;

    // The garbled line and the blank line aren't events.
    assert_eq!(replay.events, 10);
    assert_eq!(replay.statuses, [RunStatus::Failed { failed: 1 }]);
    assert_eq!(
        replay.statuses[0].exit_code(),
        ChameleonExitCode::TEST_RUN_FAILED
    );
    // The spec without a suite is neither counted nor listed.
    assert_eq!(
        replay.output,
        indoc! {"

            TEST SUMMARY:
             ✓ 3 TESTS SUCCEEDED (1.5 per Browser)
             - 3 TESTS SKIPPED (1.5 per Browser)
             ✗ 1 TESTS FAILED (0.5 per Browser)

            BROWSER SUMMARY:
             0: Chrome 120.0: Executed 2 of 4 (1 Failed, 2 Skipped) (4.21 secs, 0.037 secs)
             1: Safari 17.2: Executed 2 of 4 (1 Skipped) (1 min 5.02 secs, 1.25 secs)


                                                      0   1
              date.spec.js                           [ ✓ 0 | - 1 | ✗ 1 ]
                parseDate
                  parses dates                        ✗   ✓
                  zones
                    handles time zones                -   -


                                                      0   1
              list.spec.js                           [ ✓ 1 | - 1 | ✗ 0 ]
                List
                  pending
                    is implemented later              -   ?


            FAILED TESTS:

            1): parses dates
                 date.spec.js parseDate
                 Expected NaN to equal 1700000000000.
                 at <Jasmine>
                 at UserContext.<anonymous> (src/date.spec.js:14:27 <- /tmp/_karma_webpack_/main.js:812:29)

        "}
    );
    Ok(())
}

#[test]
fn each_run_gets_its_own_report() -> Result<()> {
    let replay = replay_fixture("watch.jsonl", |_| {})?;

    assert_eq!(
        replay.statuses,
        [RunStatus::Failed { failed: 1 }, RunStatus::NoTestsRun]
    );
    assert_eq!(
        replay.output.matches("TEST SUMMARY:").count(),
        2,
        "one report per run:\n{}",
        replay.output
    );

    // Nothing from the first run leaks into the second report.
    let (first, second) = replay
        .output
        .split_at(replay.output.rfind("\nTEST SUMMARY:").expect("second report"));
    assert!(first.contains("FAILED TESTS:"), "first report:\n{first}");
    assert_eq!(
        second,
        indoc! {"

            TEST SUMMARY:
             ✓ 0 TESTS SUCCEEDED (0.0 per Browser)

            BROWSER SUMMARY:
             0: Chrome 120.0: Executed 0 of 0 (0.4 secs, 0 secs)
            No tests ran in any browsers.
        "}
    );
    Ok(())
}

#[test]
fn disconnected_run() -> Result<()> {
    let replay = replay_fixture("disconnected.jsonl", |_| {})?;

    assert_eq!(replay.statuses, [RunStatus::Incomplete]);
    assert_eq!(
        replay.statuses[0].exit_code(),
        ChameleonExitCode::RUN_INCOMPLETE
    );
    // Summary counts are omitted, and the browser that disconnected has no timings.
    assert_eq!(
        replay.output,
        indoc! {"

            TEST SUMMARY:
             0: Chrome 120.0: Executed 1 of 1 (1.5 secs, 0.02 secs)
             1: Edge 120.0: Executed 1 of 1 (1 Failed)


                                                      0   1
              app.spec.js                            [ ✓ 0 | - 0 | ✗ 1 ]
                App
                  loads                               ✓   ✗


            FAILED TESTS:

            1): loads
                 app.spec.js App
                 Disconnected, because no message in 30000 ms.

        "}
    );
    Ok(())
}

#[test]
fn stream_ending_mid_run() -> Result<()> {
    let contents = std::fs::read_to_string(fixture_path("passing.jsonl"))?;
    let truncated: String = contents
        .lines()
        .filter(|line| !line.contains(r#""type":"run-complete""#))
        .map(|line| format!("{line}\n"))
        .collect();

    let replay = replay_reader(Cursor::new(truncated), |_| {})?;
    assert!(replay.run_in_progress);
    assert!(replay.statuses.is_empty());
    assert_eq!(replay.output, "", "nothing is written before the run completes");
    Ok(())
}

#[test]
fn custom_formatter() -> Result<()> {
    let replay = replay_fixture("mixed.jsonl", |builder| {
        builder.set_formatter(|log: &str| log.lines().next().unwrap_or_default().to_owned());
    })?;

    assert!(
        replay
            .output
            .ends_with("     Expected NaN to equal 1700000000000.\n\n"),
        "output:\n{}",
        replay.output
    );
    Ok(())
}

#[test]
fn narrow_labels_are_truncated() -> Result<()> {
    let replay = replay_fixture("passing.jsonl", |builder| {
        builder.set_spec_length(12);
    })?;

    assert!(
        replay.output.contains("\n  calcula...  ✓  2 Passed\n  format....  ✓  1 Passed\n"),
        "output:\n{}",
        replay.output
    );
    Ok(())
}

#[test_case("passing.jsonl" ; "passing")]
#[test_case("mixed.jsonl" ; "mixed")]
#[test_case("watch.jsonl" ; "watch")]
#[test_case("disconnected.jsonl" ; "disconnected")]
fn colors_only_add_escapes(name: &str) -> Result<()> {
    let plain = replay_fixture(name, |_| {})?;
    let colorized = replay_fixture(name, |builder| {
        builder.set_colorize(true);
    })?;

    assert_ne!(plain.output, colorized.output, "colors are applied");
    assert_eq!(
        strip_ansi_escapes::strip_str(&colorized.output),
        plain.output
    );
    assert_eq!(plain.statuses, colorized.statuses);
    Ok(())
}

#[test]
fn ascii_glyphs() -> Result<()> {
    let replay = replay_fixture("disconnected.jsonl", |builder| {
        builder.set_unicode(false);
    })?;

    assert!(
        replay
            .output
            .contains("  app.spec.js                            [ + 0 | - 0 | x 1 ]\n"),
        "output:\n{}",
        replay.output
    );
    assert!(
        replay
            .output
            .contains("      loads                               +   x\n"),
        "output:\n{}",
        replay.output
    );
    Ok(())
}
