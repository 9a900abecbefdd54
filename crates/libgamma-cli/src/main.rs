//! gamma - inspect display gamma adjustment methods
//!
//! Lists methods, enumerates CRTCs, decodes error codes and converts EDIDs.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use libgamma_native::dummy::{self, DummyConfig};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod commands;

#[derive(Parser)]
#[command(name = "gamma")]
#[command(author, version, about = "Inspect display gamma adjustment methods")]
#[command(long_about = "
Query adjustment methods, the CRTCs they expose and their gamma ramps.

Examples:
  gamma methods                         # Every available method
  gamma methods --op 0                  # Methods expected to work here
  gamma info --method dummy             # All CRTCs of the default site
  gamma info -m dummy -p 0 -c 1         # One CRTC
  gamma error LIBGAMMA_NO_SUCH_SITE     # Look up an error name
  gamma error -38 --gid 44              # Print an error like perror(3)
  gamma behex edid.bin                  # EDID file to hex
  gamma unhex 00FFFFFF... -o edid.bin   # Hex to EDID file
  gamma --dummy-config topo.yaml info -m dummy
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// YAML file describing the dummy method's topology
    #[arg(long = "dummy-config", global = true)]
    dummy_config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List adjustment methods
    #[command(visible_alias = "m")]
    Methods(MethodsArgs),

    /// Show CRTC information
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Look up an error code or name
    #[command(visible_alias = "e")]
    Error(ErrorArgs),

    /// Encode an EDID as hexadecimal
    Behex(BehexArgs),

    /// Decode a hexadecimal EDID
    Unhex(UnhexArgs),

    /// Restore gamma ramps to their system defaults
    Restore(RestoreArgs),
}

#[derive(Args)]
struct MethodsArgs {
    /// Selectivity: 0 (suggested, non-fake) through 4 (everything available)
    #[arg(long, default_value = "4")]
    op: i32,

    /// Show each method's capabilities
    #[arg(short, long)]
    capabilities: bool,
}

#[derive(Args)]
struct Target {
    /// Method name (dummy, randr, vidmode, drm, gdi, quartz) or number
    #[arg(short, long)]
    method: String,

    /// Site identifier (default: the method's default site)
    #[arg(short, long)]
    site: Option<String>,

    /// Only this partition
    #[arg(short, long)]
    partition: Option<usize>,

    /// Only this CRTC (requires --partition)
    #[arg(short, long, requires = "partition")]
    crtc: Option<usize>,
}

#[derive(Args)]
struct InfoArgs {
    #[command(flatten)]
    target: Target,

    /// Also print the current red, green and blue ramps
    #[arg(short, long)]
    ramps: bool,
}

#[derive(Args)]
struct ErrorArgs {
    /// Error code (e.g. -3, 13) or name (e.g. LIBGAMMA_NO_SUCH_SITE)
    #[arg(allow_hyphen_values = true)]
    code: String,

    /// Group ID to report for LIBGAMMA_DEVICE_REQUIRE_GROUP
    #[arg(long)]
    gid: Option<u32>,

    /// Group name to report with --gid
    #[arg(long, requires = "gid")]
    group: Option<String>,
}

#[derive(Args)]
struct BehexArgs {
    /// EDID file, or hexadecimal EDID to re-encode
    input: String,

    /// Use uppercase digits
    #[arg(short = 'U', long)]
    uppercase: bool,
}

#[derive(Args)]
struct UnhexArgs {
    /// Hexadecimal EDID, either case
    hex: String,

    /// Write the raw bytes here instead of dumping them
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct RestoreArgs {
    #[command(flatten)]
    target: Target,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(path) = &cli.dummy_config {
        let config = DummyConfig::from_file(path)
            .with_context(|| format!("Failed to load dummy config: {}", path.display()))?;
        dummy::configure(config).context("Invalid dummy config")?;
        debug!(path = %path.display(), "installed dummy config");
    }

    match cli.command {
        Commands::Methods(args) => commands::methods::run(args, cli.verbose),
        Commands::Info(args) => commands::info::run(args, cli.verbose),
        Commands::Error(args) => commands::error::run(args),
        Commands::Behex(args) => commands::edid::run_behex(args),
        Commands::Unhex(args) => commands::edid::run_unhex(args),
        Commands::Restore(args) => commands::restore::run(args, cli.verbose),
    }
}
