// Commands Module Integration Tests
//
// Validates command routing and that each command runs against real files.

use clap::Parser;
use crtsh_normalizer::Args;
use crtsh_normalizer::commands::{
    BatchCommand, Command, CommandRouter, ConfigExampleCommand, NormalizeCommand,
};
use crtsh_normalizer::config::NormalizerConfig;
use std::fs;
use tempfile::TempDir;

const FIXTURE: &str = include_str!("fixtures/crtsh_example.json");

fn route(args: Args) -> Box<dyn Command> {
    let config = args.load_config().unwrap();
    CommandRouter::route(args, config).unwrap()
}

fn command(args: Args) -> NormalizeCommand {
    let config = args.load_config().unwrap();
    NormalizeCommand::new(args, config)
}

#[test]
fn test_command_names() {
    let config = NormalizerConfig::default();
    let normalize = NormalizeCommand::new(Args::default(), config.clone());
    assert_eq!(normalize.name(), "NormalizeCommand");
    assert_eq!(BatchCommand::new(Args::default(), config).name(), "BatchCommand");
    assert_eq!(
        ConfigExampleCommand::new(Args::default()).name(),
        "ConfigExampleCommand"
    );
}

#[test]
fn test_router_from_parsed_arguments() {
    let args =
        Args::try_parse_from(["crtsh-normalizer", "crtsh.json", "-H", "example.com"]).unwrap();
    assert_eq!(route(args).name(), "NormalizeCommand");

    let args = Args::try_parse_from([
        "crtsh-normalizer",
        "--job",
        "example.com=a.json",
        "--job",
        "example.org=b.json",
    ])
    .unwrap();
    assert_eq!(route(args).name(), "BatchCommand");
}

#[test]
fn test_batch_command_parses_jobs() {
    let args = Args::try_parse_from(["crtsh-normalizer", "--job", "example.com=a.json"]).unwrap();
    let jobs = BatchCommand::new(args, NormalizerConfig::default()).jobs().unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].hostname, "example.com");

    let args = Args::try_parse_from(["crtsh-normalizer", "--job", "a.json"]).unwrap();
    assert!(BatchCommand::new(args, NormalizerConfig::default()).jobs().is_err());
}

#[tokio::test]
async fn test_config_example_command_writes_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let args = Args {
        config_example: Some(path.clone()),
        ..Default::default()
    };
    route(args).execute().await.unwrap();

    let config = NormalizerConfig::from_file(&path).unwrap();
    assert_eq!(config, NormalizerConfig::default());
}

#[tokio::test]
async fn test_normalize_command_with_meta_file() {
    let dir = TempDir::new().unwrap();
    let payload = dir.path().join("crtsh.json");
    let meta = dir.path().join("meta.json");
    fs::write(&payload, FIXTURE).unwrap();
    fs::write(
        &meta,
        r#"{"boefje_meta": {"arguments": {"input": {"hostname": {"name": "example.com"}}}}}"#,
    )
    .unwrap();

    let args = Args::try_parse_from([
        "crtsh-normalizer",
        payload.to_str().unwrap(),
        "--meta",
        meta.to_str().unwrap(),
    ])
    .unwrap();

    assert!(command(args).execute().await.is_ok());
}

#[tokio::test]
async fn test_normalize_command_reports_missing_meta_key() {
    let dir = TempDir::new().unwrap();
    let payload = dir.path().join("crtsh.json");
    let meta = dir.path().join("meta.json");
    fs::write(&payload, FIXTURE).unwrap();
    fs::write(&meta, r#"{"boefje_meta": {"arguments": {"input": {}}}}"#).unwrap();

    let args = Args::try_parse_from([
        "crtsh-normalizer",
        payload.to_str().unwrap(),
        "--meta",
        meta.to_str().unwrap(),
    ])
    .unwrap();

    let err = command(args).execute().await.unwrap_err();
    assert!(err.to_string().contains("hostname"));
}

#[tokio::test]
async fn test_batch_command_fails_when_a_job_fails() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("good.json");
    fs::write(&good, FIXTURE).unwrap();
    let missing = dir.path().join("missing.json");

    let args = Args::try_parse_from([
        "crtsh-normalizer".to_string(),
        "--job".to_string(),
        format!("example.com={}", good.display()),
        "--job".to_string(),
        format!("example.com={}", missing.display()),
    ])
    .unwrap();

    let config = args.load_config().unwrap();
    let err = BatchCommand::new(args, config).execute().await.unwrap_err();
    assert_eq!(err.to_string(), "1 of 2 jobs failed");
}

#[tokio::test]
async fn test_commands_use_the_config_they_are_given() {
    let dir = TempDir::new().unwrap();
    let payload = dir.path().join("crtsh.json");
    let config_path = dir.path().join("config.toml");
    fs::write(&payload, FIXTURE).unwrap();
    fs::write(&config_path, "format = \"text\"\n").unwrap();

    let args = Args::try_parse_from([
        "crtsh-normalizer",
        payload.to_str().unwrap(),
        "-H",
        "example.com",
        "--config",
        config_path.to_str().unwrap(),
    ])
    .unwrap();
    let config = args.load_config().unwrap();

    // The file is not read again once the command holds its configuration
    fs::write(&config_path, "format = [not toml").unwrap();
    assert!(NormalizeCommand::new(args, config).execute().await.is_ok());
}
