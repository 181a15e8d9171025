//! fastsize - report the type and pixel size of remote or local images
//! while reading as little of each as possible.

mod engine;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use fastsize_io::{FetchConfig, Prober};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use report::Format;

#[derive(Parser, Debug)]
#[command(name = "fastsize")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// URLs (http/https) or file paths to probe.
    #[arg(required = true)]
    targets: Vec<String>,

    /// JSON file with fetch settings; flags override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seconds allowed for connecting and for each body read.
    #[arg(short, long)]
    timeout: Option<u64>,

    #[arg(long)]
    user_agent: Option<String>,

    /// Do not send a Referer header.
    #[arg(long, default_value_t = false)]
    no_referer: bool,

    /// Accept invalid TLS certificates.
    #[arg(long, default_value_t = false)]
    insecure: bool,

    /// Stop reading a target after this many bytes.
    #[arg(long)]
    max_bytes: Option<u64>,

    #[arg(long)]
    chunk_size: Option<usize>,

    /// Verify full format signatures, not just the first two bytes.
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// Concurrent probes. Defaults to the number of CPUs.
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Emit one JSON object per target.
    #[arg(long, default_value_t = false)]
    json: bool,

    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = build_config(&args)?;
    debug!(?config, "configuration");

    let prober = Prober::new(config).context("Failed to build HTTP client")?;
    let jobs = args.jobs.unwrap_or_else(num_cpus::get).max(1);
    info!(targets = args.targets.len(), jobs, "probing");

    let outcomes = engine::run(prober, args.targets, jobs);
    let format = if args.json { Format::Json } else { Format::Text };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failures = 0usize;
    for outcome in &outcomes {
        if outcome.result.is_err() {
            failures += 1;
        }
        writeln!(out, "{}", report::render(outcome, format)?)?;
    }
    out.flush()?;

    Ok(if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn build_config(args: &Args) -> Result<FetchConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => FetchConfig::default(),
    };

    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(user_agent) = &args.user_agent {
        config.user_agent.clone_from(user_agent);
    }
    if args.no_referer {
        config.send_referer = false;
    }
    if args.insecure {
        config.accept_invalid_certs = true;
    }
    if args.max_bytes.is_some() {
        config.max_bytes = args.max_bytes;
    }
    if let Some(chunk_size) = args.chunk_size {
        config.chunk_size = chunk_size;
    }
    if args.strict {
        config.strict_signatures = true;
    }

    Ok(config)
}

fn load_config(path: &Path) -> Result<FetchConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid config: {}", path.display()))
}
