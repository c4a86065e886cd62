mod logging;

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::de::DeserializeOwned;

use exam_score::error::ScoreError;
use exam_score::model::results::CompositeResult;
use exam_score::programs::ielts::{IeltsModule, IeltsResponses};
use exam_score::programs::snbt::SnbtResponses;
use exam_score::programs::toefl::ToeflResponses;
use exam_score::programs::{ielts, snbt, toefl};
use exam_score::report::json::render_result_json;

#[derive(Debug, Parser)]
#[command(name = "exam-score", version, about = "Convert raw test responses into scaled scores")]
struct Cli {
    /// Log filter used when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// IELTS four-skill band calculation.
    Ielts {
        #[arg(long, value_enum, default_value_t = ModuleArg::Academic)]
        module: ModuleArg,
        #[command(flatten)]
        io: IoArgs,
    },
    /// TOEFL iBT section and total scores.
    Toefl {
        #[command(flatten)]
        io: IoArgs,
    },
    /// SNBT standardized subtest scores and percentiles.
    Snbt {
        #[command(flatten)]
        io: IoArgs,
    },
}

#[derive(Debug, Args)]
struct IoArgs {
    /// JSON request file, `-` for stdin.
    #[arg(long)]
    input: PathBuf,
    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModuleArg {
    Academic,
    GeneralTraining,
}

impl From<ModuleArg> for IeltsModule {
    fn from(value: ModuleArg) -> Self {
        match value {
            ModuleArg::Academic => IeltsModule::Academic,
            ModuleArg::GeneralTraining => IeltsModule::GeneralTraining,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Io { path: String, source: io::Error },
    #[error("invalid request JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Score(#[from] ScoreError),
    #[error(transparent)]
    Logging(#[from] logging::LoggingError),
}

fn main() {
    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    logging::init(&cli.log_level)?;

    let (result, pretty) = match &cli.command {
        Command::Ielts { module, io } => {
            let request: IeltsResponses = read_request(&io.input)?;
            (ielts::score((*module).into(), &request)?, io.pretty)
        }
        Command::Toefl { io } => {
            let request: ToeflResponses = read_request(&io.input)?;
            (toefl::score(&request)?, io.pretty)
        }
        Command::Snbt { io } => {
            let request: SnbtResponses = read_request(&io.input)?;
            (snbt::score(&request)?, io.pretty)
        }
    };

    print_result(&result, pretty)
}

fn read_request<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let text = read_input(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn read_input(path: &Path) -> Result<String, CliError> {
    let io_error = |source: io::Error| CliError::Io {
        path: path.display().to_string(),
        source,
    };
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).map_err(io_error)?;
        Ok(text)
    } else {
        fs::read_to_string(path).map_err(io_error)
    }
}

fn print_result(result: &CompositeResult, pretty: bool) -> Result<(), CliError> {
    let json = render_result_json(result, pretty)?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
