use std::path::PathBuf;

use clap::Args;

#[derive(Debug, Args)]
pub struct WebArgs {
    /// Overrides `SURVEYMONKEY_HOST` and the config file.
    #[arg(long)]
    pub host: Option<String>,
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Debug, Args)]
pub struct CodeArg {
    pub code: String,
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// JSON survey definition (`title`, `password`, `questions`); `-` reads stdin.
    #[arg(long, value_name = "JSON")]
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct ResultsArgs {
    pub code: String,
    /// Owner password; without it only public results are shown.
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Debug, Args)]
pub struct OwnerArgs {
    pub code: String,
    #[arg(long)]
    pub password: String,
}
