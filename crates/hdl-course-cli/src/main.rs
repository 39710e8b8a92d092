//! hdl-course CLI: regenerate the Accelerated HDL course repository.
//!
//! Running with no subcommand regenerates every artifact into the current directory.
//! `check` compares a fresh render against the tree on disk, `doctor` reports which
//! FPGA tools the generated Makefiles will find, and `config` prints the effective
//! configuration.
//!
//! Failures end with one `[ERROR] <category> error: ...` line and an exit status per
//! category: 2 config, 3 data, 4 template, 5 io, 1 anything else (such as drift).

mod commands;
mod output;
mod progress;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use hdl_course_core::driver::Phase;
use hdl_course_core::error::{CourseError, ErrorCategory};

#[derive(Parser)]
#[command(
    name = "hdl-course",
    about = "Generate labs, slide decks, quizzes, and lesson plans for the Accelerated HDL course",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to a JSON config file (defaults reproduce the published course)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Regenerate the course tree (the default)
    Generate(TreeArgs),

    /// Report files that differ from a fresh regeneration, without writing
    Check(TreeArgs),

    /// Check that the tools called by lab Makefiles are installed
    Doctor,

    /// Print the effective configuration as JSON
    Config(ConfigArgs),
}

#[derive(Args, Clone, Debug)]
struct ConfigArgs {
    /// Write the JSON to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Args, Clone, Debug)]
struct TreeArgs {
    /// Only this phase (repeatable; default: all phases)
    #[arg(long = "phase", value_enum)]
    phases: Vec<PhaseChoice>,

    /// Output root directory
    #[arg(long, default_value = ".")]
    out: PathBuf,
}

impl Default for TreeArgs {
    fn default() -> Self {
        Self {
            phases: Vec::new(),
            out: PathBuf::from("."),
        }
    }
}

impl TreeArgs {
    fn phases(&self) -> Vec<Phase> {
        self.phases.iter().map(PhaseChoice::phase).collect()
    }
}

#[derive(ValueEnum, Clone, Debug)]
pub enum PhaseChoice {
    Labs,
    Shared,
    Projects,
    Slides,
    Quizzes,
    Docs,
    Repo,
}

impl PhaseChoice {
    pub fn phase(&self) -> Phase {
        match self {
            Self::Labs => Phase::Labs,
            Self::Shared => Phase::Shared,
            Self::Projects => Phase::Projects,
            Self::Slides => Phase::Slides,
            Self::Quizzes => Phase::Quizzes,
            Self::Docs => Phase::Docs,
            Self::Repo => Phase::Repo,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::print_error(&describe_failure(&err));
            ExitCode::from(exit_status(&err))
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command.unwrap_or_else(|| Commands::Generate(TreeArgs::default())) {
        Commands::Generate(args) => {
            commands::generate::run(&config, &args.phases(), &args.out, cli.verbose > 0)?;
        }
        Commands::Check(args) => {
            commands::check::run(&config, &args.phases(), &args.out)?;
        }
        Commands::Doctor => {
            commands::doctor::run()?;
        }
        Commands::Config(args) => {
            commands::config::run(&config, args.output.as_deref())?;
        }
    }

    Ok(())
}

/// Category of the first [`CourseError`] in the chain, if the failure came from the library.
fn category(err: &anyhow::Error) -> Option<ErrorCategory> {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<CourseError>())
        .map(CourseError::category)
}

fn exit_status(err: &anyhow::Error) -> u8 {
    match category(err) {
        Some(ErrorCategory::Config) => 2,
        Some(ErrorCategory::Data) => 3,
        Some(ErrorCategory::Template) => 4,
        Some(ErrorCategory::Io) => 5,
        None => 1,
    }
}

fn describe_failure(err: &anyhow::Error) -> String {
    match category(err) {
        Some(category) => format!("{} error: {err:#}", category.as_str()),
        None => format!("{err:#}"),
    }
}
