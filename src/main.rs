use std::{
    fs::{self, File},
    io::{self, BufReader, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::{Context, Result};
use cassette::{Mode, convert};
use clap::Parser;
use clap_verbosity_flag::{ErrorLevel, Verbosity};
use tracing_subscriber::EnvFilter;

/// Compile a textual workout description into a FIT workout file.
#[derive(Parser)]
#[command(name = "cassette", version)]
struct Cli {
    /// Description to read (standard input when omitted).
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// File to write (standard output when omitted).
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Accept free-form records instead of a single workout.
    #[arg(long)]
    records: bool,

    /// Adjust log verbosity (-v for warnings, -vvv for debug).
    #[command(flatten)]
    verbosity: Verbosity<ErrorLevel>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(env_filter(&cli.verbosity))
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

/// Build a filter from the verbosity flags, deferring to `RUST_LOG` when no
/// flag is given.
fn env_filter(verbosity: &Verbosity<ErrorLevel>) -> EnvFilter {
    let level = EnvFilter::default().add_directive(verbosity.tracing_level_filter().into());

    if verbosity.is_present() {
        level
    } else {
        EnvFilter::try_from_default_env().unwrap_or(level)
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mode = if cli.records {
        Mode::Records
    } else {
        Mode::Workout
    };

    // Output is buffered so that nothing is written on failure.
    let document = match &cli.input {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            convert(BufReader::new(file), Vec::new(), mode)?
        }
        None => convert(io::stdin().lock(), Vec::new(), mode)?,
    };

    match &cli.output {
        Some(path) => {
            fs::write(path, &document).with_context(|| format!("writing {}", path.display()))?
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&document)?;
            stdout.flush()?;
        }
    }

    Ok(())
}
