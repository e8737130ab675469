// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: lay out fixture annotations and dimensions for every region
//! of a project snapshot.
//!
//! Usage:
//!   fixture-layout <snapshot.json> [options]

mod config;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use fixture_layout_engine::{layout_project, ElementId, LayoutConfig, ProjectSnapshot};

use config::{CliConfig, LogFormat};

const DEFAULT_LOG_FILTER: &str = "info,fixture_layout_engine=debug";

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Default)]
struct Args {
    snapshot: PathBuf,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    region: Option<ElementId>,
    pretty: bool,
}

#[derive(Debug, PartialEq)]
enum Command {
    Help,
    Run(Args),
}

fn main() -> ExitCode {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse_args(&argv) {
        Ok(Command::Run(args)) => args,
        Ok(Command::Help) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            print_usage();
            return ExitCode::from(2);
        }
    };

    let cli = CliConfig::from_env();
    init_logging(cli.log_format);

    match run(&args, &cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "Layout run aborted");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(argv: &[String]) -> Result<Command> {
    let mut args = Args::default();
    let mut snapshot = None;
    let mut iter = argv.iter();

    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .with_context(|| format!("{flag} needs a value"))
        };
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--config" => args.config = Some(value("--config")?.into()),
            "--output" | "-o" => args.output = Some(value("--output")?.into()),
            "--region" => {
                let raw = value("--region")?;
                let id = raw
                    .parse()
                    .with_context(|| format!("invalid region id '{raw}'"))?;
                args.region = Some(ElementId(id));
            }
            "--pretty" => args.pretty = true,
            flag if flag.starts_with('-') => bail!("unknown option: {flag}"),
            path => {
                if snapshot.replace(PathBuf::from(path)).is_some() {
                    bail!("only one snapshot file may be given");
                }
            }
        }
    }

    args.snapshot = snapshot.context("missing snapshot file")?;
    Ok(Command::Run(args))
}

fn print_usage() {
    eprintln!("Usage: fixture-layout <snapshot.json> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <FILE>   Layout configuration (JSON); overrides FIXTURE_LAYOUT_CONFIG");
    eprintln!("  --output <FILE>   Write the report to FILE instead of stdout");
    eprintln!("  --region <ID>     Only lay out the region with this id");
    eprintln!("  --pretty          Pretty-print the JSON report");
    eprintln!("  -h, --help        Show this help");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  FIXTURE_LAYOUT_THREADS     Worker threads (default: CPU count)");
    eprintln!("  FIXTURE_LAYOUT_LOG_FORMAT  pretty | json");
    eprintln!("  RUST_LOG                   Log filter (default: {DEFAULT_LOG_FILTER})");
}

fn init_logging(format: LogFormat) {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn load_layout_config(path: Option<&Path>) -> Result<LayoutConfig> {
    let Some(path) = path else {
        return Ok(LayoutConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read layout config '{}'", path.display()))?;
    LayoutConfig::from_json_str(&text).with_context(|| format!("in '{}'", path.display()))
}

/// Returns `Ok(false)` when at least one region failed.
fn run(args: &Args, cli: &CliConfig) -> Result<bool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(cli.worker_threads)
        .build_global()
        .context("failed to initialize rayon thread pool")?;

    let config_path = args.config.as_deref().or(cli.layout_config.as_deref());
    let config = load_layout_config(config_path)?;

    tracing::info!(
        snapshot = %args.snapshot.display(),
        config = ?config_path,
        worker_threads = cli.worker_threads,
        "Starting fixture layout"
    );

    let text = fs::read_to_string(&args.snapshot)
        .with_context(|| format!("cannot read snapshot '{}'", args.snapshot.display()))?;
    let project = ProjectSnapshot::from_json_str(&text)
        .with_context(|| format!("in '{}'", args.snapshot.display()))?;

    if let Some(id) = args.region {
        if !project.regions.iter().any(|r| r.id == id) {
            bail!("region {id} is not in the snapshot");
        }
    }

    let report = layout_project(&project, &config, args.region)?;
    let json = report.to_json(args.pretty)?;

    match &args.output {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("cannot write report '{}'", path.display()))?,
        None => println!("{json}"),
    }

    if report.has_failures() {
        tracing::warn!(failed = report.summary.failed, "Some regions could not be laid out");
    }
    Ok(!report.has_failures())
}
