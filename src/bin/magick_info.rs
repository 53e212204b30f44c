//! magick-info CLI
//!
//! Prints the linked ImageMagick's build information to stdout.
//! Exits 1 when no provider is available or stdout fails, 2 when a
//! requirement is not met. Logs go to stderr.

use clap::Parser;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use magick_info::{
    BuildInfo, BuildInfoProvider, InfoError, OutputFormat, QuantumDepth, Reporter, Requirements,
    TOOL_VERSION,
};

#[cfg(feature = "magickcore")]
const LINKAGE_HELP: &str = "Linked against MagickCore; runs without --snapshot query the library.";

#[cfg(not(feature = "magickcore"))]
const LINKAGE_HELP: &str = "Built without MagickCore: pass --snapshot FILE, or install with \
`cargo install magick-info --features magickcore` to query the linked library.";

#[derive(Parser)]
#[command(name = "magick-info", version = TOOL_VERSION)]
#[command(about = "Print the build information of the linked ImageMagick library")]
#[command(after_help = LINKAGE_HELP)]
struct Cli {
    /// Emit the report as JSON
    #[arg(long)]
    json: bool,

    /// Replay a report captured with --json instead of querying MagickCore
    #[arg(long, value_name = "FILE")]
    snapshot: Option<PathBuf>,

    /// Fail unless this delegate is listed (repeatable)
    #[arg(long = "require-delegate", value_name = "TOKEN")]
    require_delegates: Vec<String>,

    /// Fail unless this feature is listed (repeatable)
    #[arg(long = "require-feature", value_name = "TOKEN")]
    require_features: Vec<String>,

    /// Fail unless the build uses this quantum depth (8, 16 or 32)
    #[arg(long, value_name = "DEPTH")]
    expect_quantum_depth: Option<QuantumDepth>,

    /// Fail unless the release is at least this version
    #[arg(long, value_name = "SEMVER")]
    min_version: Option<semver::Version>,

    /// Log every provider query to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let provider = match select_provider(cli.snapshot.as_deref()) {
        Ok(p) => p,
        Err(e) => {
            report_error(&e, cli.json);
            return ExitCode::FAILURE;
        }
    };

    let requirements = Requirements {
        delegates: cli.require_delegates,
        features: cli.require_features,
        quantum_depth: cli.expect_quantum_depth,
        min_version: cli.min_version,
    };
    let format = if cli.json { OutputFormat::Json } else { OutputFormat::Text };
    let reporter = Reporter::new(provider.as_ref()).with_requirements(requirements);

    let mut out = io::stdout().lock();
    match reporter.run(&mut out, format) {
        Ok(result) => {
            if format == OutputFormat::Text {
                for v in &result.violations {
                    eprintln!("error: {}: {}", v.rule, v.message);
                }
            }
            if result.satisfied {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2) // Requirement failure
            }
        }
        Err(e) => {
            report_error(&e, cli.json);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn select_provider(snapshot: Option<&Path>) -> Result<Box<dyn BuildInfoProvider>, InfoError> {
    match snapshot {
        Some(path) => Ok(Box::new(BuildInfo::load_snapshot(path)?)),
        None => linked_provider(),
    }
}

#[cfg(feature = "magickcore")]
fn linked_provider() -> Result<Box<dyn BuildInfoProvider>, InfoError> {
    Ok(Box::new(magick_info::MagickCore::new()))
}

#[cfg(not(feature = "magickcore"))]
fn linked_provider() -> Result<Box<dyn BuildInfoProvider>, InfoError> {
    Err(InfoError::ProviderUnavailable(
        "built without the `magickcore` feature; pass --snapshot FILE or rebuild with --features magickcore"
            .to_string(),
    ))
}

// Errors never go to stdout so a failed run leaves no partial report
fn report_error(e: &InfoError, json: bool) {
    tracing::debug!(error = ?e, "run failed");
    if json {
        eprintln!("{}", serde_json::json!({ "error": e.to_string() }));
    } else {
        eprintln!("error: {e}");
    }
}
