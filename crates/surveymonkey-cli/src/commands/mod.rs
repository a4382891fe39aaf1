use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde_json::json;
use surveymonkey_core::models::NewSurvey;
use surveymonkey_core::{ServiceConfig, Survey, SurveyService};

use crate::cli::{Cli, Commands, OwnerArgs, ResultsArgs, WebArgs};
use crate::logging;

mod web;


pub(crate) fn run(cli: Cli) -> Result<()> {
    let config =
        ServiceConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    logging::init(&config.log_filter, cli.verbose, cli.log_format)?;
    run_from_root(&cli.root, config, cli.command)
}

pub(crate) fn run_from_root(root: &Path, config: ServiceConfig, command: Commands) -> Result<()> {
    if let Commands::Web(args) = &command {
        return web::serve(root, with_web_overrides(config, args));
    }

    let service = SurveyService::open(root, config)
        .with_context(|| format!("failed to open survey store under {}", root.display()))?;
    let outcome = run_validated(&service, root, command);
    let closed = service.shutdown().context("failed to close survey store");
    outcome?;
    closed
}

fn run_validated(service: &SurveyService, root: &Path, command: Commands) -> Result<()> {
    match command {
        Commands::Init => {
            let surveys = service.store().count()?;
            tracing::info!(root = %root.display(), surveys, "survey store initialized");
            println!("initialized at {}", root.display());
        }
        Commands::Web(_) => {
            return Err(anyhow!("web command must be handled before opening the store"));
        }
        Commands::List => {
            print_json(&service.list_surveys()?)?;
        }
        Commands::Show(args) => {
            let survey = require_survey(service, &args.code)?;
            print_json(&survey_view(&survey))?;
        }
        Commands::Create(args) => {
            let request = read_new_survey(&args.file)?;
            let survey = service.create_survey(request)?;
            print_json(&json!({
                "status": "ok",
                "surveyCode": survey.survey_code(),
                "title": survey.title(),
                "surveyLink": format!("/survey/{}", survey.survey_code()),
            }))?;
        }
        Commands::Results(ResultsArgs { code, password }) => {
            let results = match password.as_deref() {
                Some(password) => service.results_with_password(&code, password)?,
                None => service.public_results(&code)?,
            };
            print_json(&results)?;
        }
        Commands::Publish(OwnerArgs { code, password }) => {
            let survey = service.make_public(&code, &password)?;
            print_visibility(&survey)?;
        }
        Commands::Unpublish(OwnerArgs { code, password }) => {
            let survey = service.make_private(&code, &password)?;
            print_visibility(&survey)?;
        }
        Commands::Delete(OwnerArgs { code, password }) => {
            service.delete_survey(&code, &password)?;
            print_json(&json!({
                "status": "ok",
                "surveyCode": code,
                "deleted": true,
            }))?;
        }
    }
    Ok(())
}

/// Flags given to `web` take precedence over the file and environment.
fn with_web_overrides(mut config: ServiceConfig, args: &WebArgs) -> ServiceConfig {
    if let Some(host) = &args.host {
        config.host.clone_from(host);
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    config
}

fn require_survey(service: &SurveyService, code: &str) -> Result<Survey> {
    service
        .find_survey(code)?
        .ok_or_else(|| anyhow!("no survey with code '{code}'"))
}

/// Owner-facing view of a survey; never includes the credential.
fn survey_view(survey: &Survey) -> serde_json::Value {
    let questions: Vec<_> = survey
        .questions()
        .iter()
        .map(|pair| {
            json!({
                "question": pair.question,
                "answerCount": pair.answers.len(),
            })
        })
        .collect();
    json!({
        "summary": survey.summary(),
        "questions": questions,
    })
}

fn read_new_survey(path: &Path) -> Result<NewSurvey> {
    let raw = if path == Path::new("-") {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read survey definition from stdin")?;
        buffer
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read survey definition {}", path.display()))?
    };
    serde_json::from_str(&raw).context("survey definition is not a valid survey JSON document")
}

fn print_visibility(survey: &Survey) -> Result<()> {
    print_json(&json!({
        "status": "ok",
        "surveyCode": survey.survey_code(),
        "isPublic": survey.is_public(),
    }))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
