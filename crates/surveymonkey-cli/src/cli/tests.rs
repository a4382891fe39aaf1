use super::*;
use clap::Parser;

#[test]
fn root_defaults_to_local_state_directory() {
    let cli = Cli::try_parse_from(["surveymonkey", "list"]).expect("parse");
    assert_eq!(cli.root, PathBuf::from(".surveymonkey"));
    assert_eq!(cli.verbose, 0);
    assert_eq!(cli.log_format, LogFormat::Compact);
    assert!(cli.config.is_none());
    assert!(matches!(cli.command, Commands::List));
}

#[test]
fn global_flags_parse_before_the_command() {
    let cli = Cli::try_parse_from([
        "surveymonkey",
        "--root",
        "/tmp/surveys",
        "--config",
        "surveymonkey.toml",
        "-vv",
        "--log-format",
        "json",
        "init",
    ])
    .expect("parse");
    assert_eq!(cli.root, PathBuf::from("/tmp/surveys"));
    assert_eq!(cli.config, Some(PathBuf::from("surveymonkey.toml")));
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.log_format, LogFormat::Json);
    assert!(matches!(cli.command, Commands::Init));
}

#[test]
fn web_host_and_port_are_optional_overrides() {
    let cli = Cli::try_parse_from(["surveymonkey", "web"]).expect("parse");
    match cli.command {
        Commands::Web(WebArgs { host, port }) => {
            assert!(host.is_none());
            assert!(port.is_none());
        }
        _ => panic!("expected web command"),
    }

    let cli = Cli::try_parse_from(["surveymonkey", "web", "--host", "0.0.0.0", "--port", "9000"])
        .expect("parse");
    match cli.command {
        Commands::Web(WebArgs { host, port }) => {
            assert_eq!(host.as_deref(), Some("0.0.0.0"));
            assert_eq!(port, Some(9000));
        }
        _ => panic!("expected web command"),
    }
}

#[test]
fn owner_commands_require_a_password() {
    for command in ["publish", "unpublish", "delete"] {
        let parsed = Cli::try_parse_from(["surveymonkey", command, "abc123"]);
        assert!(parsed.is_err(), "{command} without --password must be rejected");
    }

    let cli = Cli::try_parse_from(["surveymonkey", "delete", "abc123", "--password", "pw"])
        .expect("parse");
    match cli.command {
        Commands::Delete(OwnerArgs { code, password }) => {
            assert_eq!(code, "abc123");
            assert_eq!(password, "pw");
        }
        _ => panic!("expected delete command"),
    }
}

#[test]
fn results_password_is_optional() {
    let cli = Cli::try_parse_from(["surveymonkey", "results", "abc123"]).expect("parse");
    match cli.command {
        Commands::Results(ResultsArgs { code, password }) => {
            assert_eq!(code, "abc123");
            assert!(password.is_none());
        }
        _ => panic!("expected results command"),
    }
}

#[test]
fn create_requires_a_file() {
    assert!(Cli::try_parse_from(["surveymonkey", "create"]).is_err());
    let cli = Cli::try_parse_from(["surveymonkey", "create", "--file", "survey.json"])
        .expect("parse");
    match cli.command {
        Commands::Create(CreateArgs { file }) => assert_eq!(file, PathBuf::from("survey.json")),
        _ => panic!("expected create command"),
    }
}

#[test]
fn unknown_log_format_is_rejected() {
    let parsed = Cli::try_parse_from(["surveymonkey", "--log-format", "xml", "list"]);
    assert!(parsed.is_err());
}
