//! Cache simulator CLI.
//!
//! This binary replays a memory trace through one configured cache. It performs:
//! 1. **Configuration:** Geometry from `-s/-a/-b` flags, optionally layered on a JSON config.
//! 2. **Replay:** Streams the trace file record by record through the simulator.
//! 3. **Reporting:** Prints statistics (text or JSON) and optional cache/memory dumps.
//!
//! Invalid geometry or a malformed trace is reported on stderr with exit status 1.

mod report;

use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cachesim_core::common::{ConfigError, TraceError};
use cachesim_core::config::{Config, ReplacementPolicy};
use cachesim_core::sim::{Simulator, TraceFormat, TraceReader};

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Trace-driven set-associative cache simulator",
    long_about = "Replay a memory trace through a single-level write-back cache and report hit rate, memory traffic and cycle counts.\n\nExamples:\n  cachesim -s=1024 -a=2 -b=64 -f=trace.txt\n  cachesim -s 32768 -a 4 -b 64 --policy lru --word-bytes 4 --address-bits 32 -f trace.hex\n  cachesim --config cache.json -f trace.txt --json"
)]
struct Cli {
    /// Cache capacity in bytes.
    #[arg(short = 's', long = "size")]
    size: Option<usize>,

    /// Associativity (blocks per set).
    #[arg(short = 'a', long = "ways")]
    ways: Option<usize>,

    /// Block size in bytes.
    #[arg(short = 'b', long = "block")]
    block: Option<usize>,

    /// Trace file to replay.
    #[arg(short = 'f', long = "file")]
    file: PathBuf,

    /// Replacement policy.
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// Word size in bytes.
    #[arg(long)]
    word_bytes: Option<usize>,

    /// Modeled address width in bits.
    #[arg(long)]
    address_bits: Option<u32>,

    /// Trace layout.
    #[arg(long, value_enum, default_value_t = FormatArg::Auto)]
    format: FormatArg,

    /// JSON configuration file; flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log every access (equivalent to RUST_LOG=trace).
    #[arg(short, long)]
    verbose: bool,

    /// Print statistics as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Print the contents of every cache line after the run.
    #[arg(long)]
    dump_cache: bool,

    /// Print the backing store after the run.
    #[arg(long)]
    dump_memory: bool,

    /// Write dirty lines back before dumping memory.
    #[arg(long)]
    flush: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyArg {
    Fifo,
    Lru,
}

impl From<PolicyArg> for ReplacementPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Fifo => Self::Fifo,
            PolicyArg::Lru => Self::Lru,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Auto,
    Counted,
    Tagged,
}

impl From<FormatArg> for TraceFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Auto => Self::Auto,
            FormatArg::Counted => Self::Counted,
            FormatArg::Tagged => Self::Tagged,
        }
    }
}

/// Everything that can stop a run.
#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Trace(#[from] TraceError),

    #[error("cannot read {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),

    #[error("cannot encode statistics: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Installs the stderr log subscriber; `RUST_LOG` takes precedence over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "trace" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Builds the configuration: JSON file (or defaults), then flag overrides.
fn build_config(cli: &Cli) -> Result<Config, CliError> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|source| CliError::Open {
                path: path.clone(),
                source,
            })?;
            Config::from_json(&text)?
        }
        None => Config::default(),
    };

    if let Some(size) = cli.size {
        config.cache.size_bytes = size;
    }
    if let Some(ways) = cli.ways {
        config.cache.ways = ways;
    }
    if let Some(block) = cli.block {
        config.cache.line_bytes = block;
    }
    if let Some(policy) = cli.policy {
        config.cache.policy = policy.into();
    }
    if let Some(word_bytes) = cli.word_bytes {
        config.cache.word_bytes = word_bytes;
    }
    if let Some(address_bits) = cli.address_bits {
        config.cache.address_bits = address_bits;
    }
    config.general.trace_accesses |= cli.verbose;

    Ok(config)
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = build_config(cli)?;
    let mut sim = Simulator::new(&config)?;

    let file = File::open(&cli.file).map_err(|source| CliError::Open {
        path: cli.file.clone(),
        source,
    })?;
    info!(
        trace = %cli.file.display(),
        size = config.cache.size_bytes,
        ways = config.cache.ways,
        block = config.cache.line_bytes,
        policy = sim.cache().policy_name(),
        "replaying trace"
    );
    for record in TraceReader::new(BufReader::new(file), cli.format.into()) {
        let _ = sim.step(&record?);
    }
    info!(accesses = sim.stats().accesses(), "trace finished");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.dump_cache {
        report::write_cache(&mut out, sim.cache())?;
        writeln!(out)?;
    }

    if cli.json {
        serde_json::to_writer_pretty(&mut out, &sim.stats().snapshot())?;
        writeln!(out)?;
    } else {
        sim.stats().write_sections(&mut out, &[String::from("summary")])?;
    }

    if cli.dump_memory {
        if cli.flush {
            sim.cache_mut().flush();
        }
        writeln!(out)?;
        let words_per_line = sim.cache().geometry().words_per_line();
        report::write_memory(&mut out, sim.cache().memory(), words_per_line)?;
    }

    out.flush()?;
    Ok(())
}
