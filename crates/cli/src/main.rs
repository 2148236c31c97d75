//! mersenne-sss - Command-line interface for Shamir's Secret Sharing
//!
//! Splits an integer secret into shares over a Mersenne prime field and
//! recovers it from any threshold-sized subset of them.

mod commands;
mod config;
mod error;
mod formats;
mod utils;

use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use commands::Commands;
use config::Config;
use mersenne_shamir::ShamirError;

/// Exit status for I/O, parsing and other command failures.
const EXIT_FAILURE: u8 = 1;
/// Exit status when the sharing scheme itself rejects the request.
/// (2 is left to clap for usage errors.)
const EXIT_SCHEME: u8 = 3;

#[derive(Parser)]
#[command(
    name = "mersenne-sss",
    version,
    about = "Shamir's Secret Sharing over Mersenne prime fields",
    long_about = "A command-line tool for splitting integer secrets into shares using Shamir's \
                  Secret Sharing over GF(2^e - 1) and recovering them from any threshold-sized \
                  subset of the shares."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Log debug records (RUST_LOG can refine per module)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl Cli {
    fn log_level(&self) -> log::LevelFilter {
        match (self.verbose, self.quiet) {
            (true, _) => log::LevelFilter::Debug,
            (_, true) => log::LevelFilter::Error,
            _ => log::LevelFilter::Info,
        }
    }

    fn run(&self) -> Result<()> {
        let config = Config::load(self.config.as_deref())?;
        self.command.execute(&config)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level());

    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err, cli.verbose);
            ExitCode::from(exit_code(&err))
        }
    }
}

/// Routes `log` records to stderr: info records as bare messages, every
/// other level tagged with its name. `RUST_LOG` directives apply on top of
/// the level chosen from the flags.
fn init_logging(level: log::LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| match record.level() {
            log::Level::Info => writeln!(buf, "{}", record.args()),
            other => writeln!(buf, "[{}] {}", other, record.args()),
        })
        .init();
}

fn report(err: &anyhow::Error, verbose: bool) {
    if verbose {
        eprintln!("Error: {:?}", err);
    } else {
        eprintln!("Error: {:#}", err);
    }
}

fn exit_code(err: &anyhow::Error) -> u8 {
    let from_scheme = err
        .chain()
        .any(|cause| cause.downcast_ref::<ShamirError>().is_some());

    if from_scheme {
        EXIT_SCHEME
    } else {
        EXIT_FAILURE
    }
}
