use std::path::Path;
use std::process::{Command, Output};

use tempfile::tempdir;

const ENV_OVERRIDES: [&str; 7] = [
    "RUST_LOG",
    "SURVEYMONKEY_DB_PATH",
    "SURVEYMONKEY_HOST",
    "SURVEYMONKEY_PORT",
    "SURVEYMONKEY_STRICT_ANSWERS",
    "SURVEYMONKEY_CODE_LENGTH",
    "SURVEYMONKEY_LOG",
];

fn surveymonkey(root: &Path, args: &[&str]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_surveymonkey"));
    for key in ENV_OVERRIDES {
        command.env_remove(key);
    }
    command
        .arg("--root")
        .arg(root)
        .args(args)
        .output()
        .expect("run surveymonkey")
}

#[test]
fn list_on_fresh_root_prints_empty_json_array() {
    let root = tempdir().expect("tempdir");
    let output = surveymonkey(root.path(), &["list"]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "[]");
}

#[test]
fn created_survey_is_listed_and_logs_stay_on_stderr() {
    let root = tempdir().expect("tempdir");
    let definition = root.path().join("survey.json");
    std::fs::write(
        &definition,
        r#"{"title":"Process contract","password":"pw","questions":[{"question":"What is life?","questionType":"OPEN_ENDED"}]}"#,
    )
    .expect("write definition");

    let created = surveymonkey(
        root.path(),
        &[
            "--log-format",
            "json",
            "create",
            "--file",
            definition.to_str().expect("definition path"),
        ],
    );
    assert!(
        created.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&created.stderr)
    );
    let created: serde_json::Value =
        serde_json::from_slice(&created.stdout).expect("create output is json");
    let code = created["surveyCode"].as_str().expect("surveyCode");

    let listed = surveymonkey(root.path(), &["list"]);
    assert!(listed.status.success());
    let listed: serde_json::Value =
        serde_json::from_slice(&listed.stdout).expect("list output is json");
    assert_eq!(listed[0]["surveyCode"], code);
    assert_eq!(listed[0]["title"], "Process contract");
}

#[test]
fn show_unknown_survey_exits_non_zero() {
    let root = tempdir().expect("tempdir");
    let output = surveymonkey(root.path(), &["show", "missing"]);

    assert!(
        !output.status.success(),
        "stdout: {}",
        String::from_utf8_lossy(&output.stdout)
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no survey with code 'missing'"));
}
