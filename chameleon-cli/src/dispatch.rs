// Copyright (c) The chameleon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    ExpectedError,
    errors::Result,
    output::{OutputContext, OutputOpts, OutputWriter, clap_styles},
};
use camino::{Utf8Path, Utf8PathBuf};
use chameleon_metadata::ChameleonExitCode;
use chameleon_reporter::{
    config::ReporterConfig,
    event_stream::EventStreamReader,
    reporter::{Reporter, ReporterBuilder},
    write_str::WriteStr,
};
use clap::{Args, Parser, Subcommand};
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
};
use tracing::{debug, info, warn};

/// Hierarchical, browser-matrix test reports.
///
/// Reads runner events as JSON lines and prints a report each time a run completes: a summary,
/// one result column per browser for every suite with failures or skips, and the failure logs.
#[derive(Debug, Parser)]
#[command(version, name = "chameleon", styles = clap_styles::style())]
pub struct ChameleonApp {
    #[command(flatten)]
    output: OutputOpts,

    #[command(flatten)]
    config_opts: ConfigOpts,

    #[command(subcommand)]
    command: Command,
}

impl ChameleonApp {
    /// Initializes the output context.
    pub fn init_output(&self) -> OutputContext {
        self.output.init()
    }

    /// Executes the app, returning the process exit code on success.
    pub fn exec(self, output: OutputContext, output_writer: &mut OutputWriter) -> Result<i32> {
        let current_dir = current_dir()?;
        let config = self.config_opts.make_config(&current_dir)?;
        if output.verbose {
            info!(
                "using config from {}",
                self.config_opts.config_source(&current_dir)
            );
        }

        match self.command {
            Command::Report { report_opts } => report_opts.exec(config, output, output_writer),
            Command::ShowConfig => {
                let mut writer = output_writer.stdout_writer();
                writer
                    .write_str(&config.to_toml_string())
                    .and_then(|()| writer.write_str_flush())
                    .map_err(ExpectedError::write_output_error)?;
                Ok(ChameleonExitCode::OK)
            }
        }
    }
}

fn current_dir() -> Result<Utf8PathBuf> {
    let current_dir = std::env::current_dir().map_err(ExpectedError::current_dir_invalid)?;
    Utf8PathBuf::try_from(current_dir)
        .map_err(|err| ExpectedError::current_dir_invalid(err.into_io_error()))
}

#[derive(Debug, Args)]
struct ConfigOpts {
    /// Config file [default: .config/chameleon.toml in the current directory]
    #[arg(long, global = true, value_name = "PATH")]
    config_file: Option<Utf8PathBuf>,
}

impl ConfigOpts {
    fn make_config(&self, dir: &Utf8Path) -> Result<ReporterConfig> {
        Ok(ReporterConfig::from_sources(
            dir,
            self.config_file.as_deref(),
        )?)
    }

    fn config_source(&self, dir: &Utf8Path) -> Utf8PathBuf {
        match &self.config_file {
            Some(config_file) => config_file.clone(),
            None => dir.join(ReporterConfig::CONFIG_PATH),
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render reports from a stream of runner events
    ///
    /// Events are read one per line. A report is printed whenever a run completes, and the exit
    /// code reflects the last run in the stream.
    Report {
        #[command(flatten)]
        report_opts: ReportOpts,
    },

    /// Print the resolved configuration as TOML
    ShowConfig,
}

#[derive(Debug, Args)]
struct ReportOpts {
    /// File to read events from, or `-` for standard input
    #[arg(long, value_name = "PATH", default_value = "-")]
    events: Utf8PathBuf,

    /// Maximum width of suite and spec labels [default: from config]
    #[arg(
        long,
        value_name = "COLUMNS",
        value_parser = clap::value_parser!(u64).range(
            ReporterConfig::MIN_SPEC_LENGTH as u64..=ReporterConfig::MAX_SPEC_LENGTH as u64
        ),
        env = "CHAMELEON_SPEC_LENGTH"
    )]
    spec_length: Option<u64>,

    /// Remove this prefix from paths in failure logs (may be repeated)
    #[arg(long = "strip-path-prefix", value_name = "PREFIX")]
    strip_path_prefixes: Vec<String>,
}

impl ReportOpts {
    fn exec(
        self,
        mut config: ReporterConfig,
        output: OutputContext,
        output_writer: &mut OutputWriter,
    ) -> Result<i32> {
        if let Some(spec_length) = self.spec_length {
            // The value parser guarantees a small positive value.
            let spec_length = usize::try_from(spec_length).unwrap_or(usize::MAX);
            config
                .set_spec_length(spec_length)
                .map_err(ExpectedError::spec_length_override)?;
        }
        config.extend_strip_path_prefixes(self.strip_path_prefixes);

        let mut builder = ReporterBuilder::from_config(&config);
        builder.set_colorize(
            config.colors() && output.color.should_colorize(supports_color::Stream::Stdout),
        );
        let mut reporter = builder.build(output_writer.reporter_output());

        let input: Box<dyn BufRead> = if self.events == "-" {
            debug!("reading events from standard input");
            Box::new(io::stdin().lock())
        } else {
            debug!("reading events from {}", self.events);
            let file = File::open(&self.events)
                .map_err(|err| ExpectedError::events_open_error(&self.events, err))?;
            Box::new(BufReader::new(file))
        };

        for event in EventStreamReader::new(input) {
            reporter.report_event(event?)?;
        }

        Ok(final_exit_code(&reporter))
    }
}

fn final_exit_code(reporter: &Reporter<'_>) -> i32 {
    if reporter.run_in_progress() {
        warn!("event stream ended before the run completed");
        return ChameleonExitCode::RUN_INCOMPLETE;
    }

    match reporter.last_run_status() {
        Some(status) => status.exit_code(),
        None => {
            warn!("event stream did not contain a completed run");
            ChameleonExitCode::RUN_INCOMPLETE
        }
    }
}
