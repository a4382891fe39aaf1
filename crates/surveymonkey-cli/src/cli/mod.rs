use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

mod args;

#[cfg(test)]
mod tests;

pub use args::{CodeArg, CreateArgs, OwnerArgs, ResultsArgs, WebArgs};

#[derive(Debug, Parser)]
#[command(name = "surveymonkey")]
#[command(about = "Create surveys, collect answers and read results", version)]
pub struct Cli {
    #[arg(long, default_value = ".surveymonkey")]
    pub root: PathBuf,

    /// TOML file layered under `SURVEYMONKEY_*` environment variables.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    Init,
    Web(WebArgs),
    List,
    Show(CodeArg),
    Create(CreateArgs),
    Results(ResultsArgs),
    Publish(OwnerArgs),
    Unpublish(OwnerArgs),
    Delete(OwnerArgs),
}
