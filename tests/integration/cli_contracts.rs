use benchreg::collate::EntityKind;
use benchreg::tooling::cli::{Cli, CliContext, Commands};
use clap::Parser;
use std::fs;
use tempfile::TempDir;

use crate::support::{build_registry, write_file};

fn collate_command() -> Commands {
    Commands::Collate {
        root: None,
        kind: None,
        indicator: None,
        output: None,
        format: "json".to_string(),
    }
}

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["benchreg", "collate"],
        vec!["benchreg", "collate", "--kind", "task", "--format", "text"],
        vec!["benchreg", "collate", "--indicator", "*.yaml", "--output", "out.json"],
        vec!["benchreg", "aggregate"],
        vec!["benchreg", "aggregate", "--input_dir", "_results", "--error-threshold", "3"],
        vec![
            "benchreg",
            "package",
            "--evaluation-fp",
            "eval.json",
            "--dataset",
            "MIMIC-IV",
            "--task",
            "mortality",
            "--model",
            "cehrbert",
            "--result-fp",
            "result.json",
            "--do-overwrite",
        ],
        vec!["benchreg", "--workspace", "/tmp", "--verbose", "collate"],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn parse_rejects_invalid_arguments() {
    assert!(Cli::try_parse_from(["benchreg", "collate", "--kind", "dataset", "--indicator", "x"]).is_err());
    assert!(Cli::try_parse_from(["benchreg", "collate", "--kind", "cohort"]).is_err());
    assert!(Cli::try_parse_from(["benchreg", "collate", "--format", "xml"]).is_err());
    assert!(Cli::try_parse_from(["benchreg", "package", "--dataset", "d"]).is_err());
}

#[test]
fn verbose_flag_raises_log_level() {
    let cli = Cli::try_parse_from(["benchreg", "--verbose", "--log-format", "json", "collate"]).unwrap();
    let logging = cli.logging_config(&Default::default());
    assert_eq!(logging.level, "debug");
    assert_eq!(logging.format, "json");
}

#[test]
fn collate_json_contract_has_entity_sections() {
    let temp = TempDir::new().unwrap();
    build_registry(temp.path());

    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    let output = cli.execute(&collate_command()).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    for section in ["datasets", "tasks", "models"] {
        assert!(parsed.get(section).and_then(|v| v.as_object()).is_some());
    }
    let mimic = &parsed["datasets"]["datasets/MIMIC"];
    assert_eq!(mimic["name"], "datasets/MIMIC");
    assert_eq!(
        mimic["children"],
        serde_json::json!(["datasets/MIMIC/III", "datasets/MIMIC/IV"])
    );
}

#[test]
fn collate_single_kind_writes_output_file() {
    let temp = TempDir::new().unwrap();
    build_registry(temp.path());

    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    let message = cli
        .execute(&Commands::Collate {
            root: None,
            kind: Some(EntityKind::Model),
            indicator: None,
            output: Some("web/models.json".into()),
            format: "json".to_string(),
        })
        .unwrap();
    assert!(message.starts_with("Wrote 1 nodes"));

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp.path().join("web/models.json")).unwrap())
            .unwrap();
    assert_eq!(written["models/cehrbert"]["data"]["model.yaml"]["model"], "value");
}

#[test]
fn collate_text_format_lists_nodes() {
    let temp = TempDir::new().unwrap();
    build_registry(temp.path());

    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    let output = cli
        .execute(&Commands::Collate {
            root: None,
            kind: Some(EntityKind::Task),
            indicator: None,
            output: None,
            format: "text".to_string(),
        })
        .unwrap();
    assert!(output.contains("tasks/readmission/30d"));
    assert!(output.contains("task.yaml"));
}

#[test]
fn collate_missing_root_is_an_error() {
    let temp = TempDir::new().unwrap();
    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    let err = cli
        .execute(&Commands::Collate {
            root: Some("nowhere".into()),
            kind: None,
            indicator: None,
            output: None,
            format: "json".to_string(),
        })
        .unwrap_err();
    assert!(err.to_string().contains("does not exist"));
}

#[test]
fn aggregate_uses_workspace_config_defaults() {
    let temp = TempDir::new().unwrap();
    write_file(
        temp.path(),
        "benchreg.toml",
        "[aggregate]\ninput_dir = \"submissions\"\noutput_path = \"web/all.json\"\n",
    );
    write_file(temp.path(), "submissions/12/result.json", r#"{"score": 1}"#);

    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    let output = cli
        .execute(&Commands::Aggregate {
            input_dir: None,
            output_path: None,
            error_threshold: None,
            format: "json".to_string(),
        })
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["added"], 1);
    assert_eq!(parsed["total"], 1);
    assert!(temp.path().join("web/all.json").exists());
}

#[test]
fn package_command_reports_destination() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "eval.json", r#"{"auroc": 0.5}"#);

    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    let command = Commands::Package {
        evaluation_fp: "eval.json".into(),
        dataset: "MIMIC-IV".to_string(),
        task: "mortality".to_string(),
        model: "random_predictor".to_string(),
        result_fp: "out/result.json".into(),
        do_overwrite: false,
    };
    let output = cli.execute(&command).unwrap();
    assert!(output.starts_with("Packaged result for MIMIC-IV/mortality/random_predictor"));
    assert!(temp.path().join("out/result.json").exists());

    assert!(cli.execute(&command).is_err());
}
