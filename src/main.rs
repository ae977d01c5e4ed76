use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use seres_rust::resample::{self, ResampleOpt};
use seres_rust::translate::{self, TranslateMode, TranslateOpt};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "seres", author, version, about = "Random-walk resampling of multiple sequence alignments", arg_required_else_help = true)]
struct Cli {
    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Produce resampled replicates of a FASTA alignment
    Resample {
        /// Input FASTA multiple sequence alignment
        input: PathBuf,
        /// Probability of reversing direction at each site, in (0, 1]
        #[arg(short, long, default_value_t = resample::DEFAULT_BIAS)]
        bias: f64,
        /// Replicate length (defaults to the input alignment length)
        #[arg(short, long)]
        length: Option<usize>,
        /// Number of replicates
        #[arg(short, long, default_value_t = 1)]
        number: usize,
        /// Output directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
        /// PRNG seed (defaults to milliseconds since the epoch)
        #[arg(short, long)]
        seed: Option<u64>,
        #[arg(short = 't', long = "threads", default_value_t = 1)]
        threads: usize,
    },
    /// Translate replicate positions back to the original alignment
    Translate {
        /// Walk file written by `resample`
        walk: PathBuf,
        /// Translate positions (default)
        #[arg(short, long, conflicts_with = "breakpoint")]
        position: bool,
        /// Translate breakpoints
        #[arg(short, long)]
        breakpoint: bool,
        /// Read locations from a file instead of stdin
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Location separator
        #[arg(short, long, default_value_t = ',')]
        sep: char,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    match cli.command {
        Commands::Resample { input, bias, length, number, dir, seed, threads } => {
            let opt = ResampleOpt {
                bias,
                length,
                number,
                out_dir: dir,
                seed: seed.unwrap_or_else(resample::clock_seed),
                threads,
            };
            let summary = resample::run_resample(&input, &opt)?;
            tracing::info!(seed = summary.seed, "done");
            Ok(())
        }
        Commands::Translate { walk, position: _, breakpoint, file, sep } => {
            let mode = if breakpoint { TranslateMode::Breakpoint } else { TranslateMode::Position };
            let opt = TranslateOpt { walk, mode, file, sep };
            translate::run_translate(&opt, std::io::stdin().lock(), std::io::stdout().lock())
        }
    }
}

fn init_logging(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
