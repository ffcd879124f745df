//! Integration tests for backlink-stats.
//!
//! These exercise the path from a dataset file and config file to a rendered
//! report without spawning the binary.

use std::io::Write;
use std::path::Path;

use backlink_stats::{
    dataset_for, load_dataset, render_report, Cli, Config, OutputFormat,
};
use clap::Parser;
use tempfile::NamedTempFile;

const DATASET: &str = r#"{
    "metrics": [
        {"label": "Referring domains", "current": 145, "reference": 285},
        {"label": "Domain rating", "current": 42, "reference": 58},
        {"label": "Trust flow", "current": 78, "reference": 75},
        {"label": "Brand mentions", "current": 12, "reference": 0},
        {"label": "Anchor text ratio", "current": "1:3", "reference": "1:5"}
    ],
    "velocity": [
        {"name": "New referring domains", "series": [
            {"period": "Jan", "count": 12}, {"period": "Feb", "count": 8},
            {"period": "Mar", "count": 14}, {"period": "Apr", "count": 18},
            {"period": "May", "count": 38}, {"period": "Jun", "count": 16},
            {"period": "Jul", "count": 12}
        ]}
    ]
}"#;

const SAMPLE_DATASET: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../data/sample-dataset.json");

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_report_command_terminal_output() {
    let dataset_file = write_temp(DATASET);
    let path = dataset_file.path().to_str().unwrap();

    let cli = Cli::parse_from(["backlink-stats", "report", path, "--no-color"]);
    let mut config = Config::default();
    cli.apply_to_config(&mut config);

    let dataset = dataset_for(&cli.command).unwrap();
    let mut buffer = Vec::new();
    render_report(&dataset, &config, &mut buffer).unwrap();

    let output = String::from_utf8(buffer).unwrap();
    assert!(output.contains("-49.1%"));
    assert!(output.contains("-27.6%"));
    assert!(output.contains("+4.0%"));
    assert!(output.contains("1:3"));
    assert!(output.contains("N/A"));
    assert!(output.contains("May (38)"));
    assert!(output.contains("2 unavailable"));
    assert!(!output.contains('\u{1b}'));
}

#[test]
fn test_config_thresholds_change_tiers() {
    let config_file = write_temp(
        r#"
[thresholds]
surplus_above = 2.0
balanced_floor = -2.0
severe_below = -25.0

[output]
format = "json"
"#,
    );
    let dataset_file = write_temp(DATASET);

    let config = Config::load_from(Some(config_file.path())).unwrap();
    assert_eq!(config.output.format, OutputFormat::Json);

    let dataset = load_dataset(dataset_file.path()).unwrap();
    let mut buffer = Vec::new();
    render_report(&dataset, &config, &mut buffer).unwrap();

    let parsed: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
    // -27.6% is severe under the tighter table, +4.0% is now a surplus.
    assert_eq!(parsed["comparisons"][1]["gap"]["tier"], "deficit-severe");
    assert_eq!(parsed["comparisons"][2]["gap"]["tier"], "surplus");
    assert_eq!(
        parsed["comparisons"][3]["error"],
        "Division undefined: reference is zero"
    );
}

#[test]
fn test_stability_command_json() {
    let cli = Cli::parse_from([
        "backlink-stats",
        "stability",
        "0",
        "0",
        "0",
        "--format",
        "json",
    ]);
    let mut config = Config::default();
    cli.apply_to_config(&mut config);

    let dataset = dataset_for(&cli.command).unwrap();
    let mut buffer = Vec::new();
    render_report(&dataset, &config, &mut buffer).unwrap();

    let parsed: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
    assert!(parsed["velocity"][0]["stability"].is_null());
    assert_eq!(
        parsed["velocity"][0]["error"],
        "Division undefined: mean is zero"
    );
}

#[test]
fn test_gap_command_terminal() {
    let cli = Cli::parse_from(["backlink-stats", "gap", "320", "200", "--no-color"]);
    let mut config = Config::default();
    cli.apply_to_config(&mut config);

    let dataset = dataset_for(&cli.command).unwrap();
    let mut buffer = Vec::new();
    render_report(&dataset, &config, &mut buffer).unwrap();

    let output = String::from_utf8(buffer).unwrap();
    assert!(output.contains("+60.0%"));
    assert!(output.contains("1 surplus"));
}

#[test]
fn test_missing_dataset_file() {
    let cli = Cli::parse_from(["backlink-stats", "report", "/nonexistent/dataset.json"]);
    let err = dataset_for(&cli.command).unwrap_err();
    assert!(err.to_string().contains("Failed to read dataset"));
}

#[test]
fn test_bundled_sample_dataset() {
    let dataset = load_dataset(Path::new(SAMPLE_DATASET)).unwrap();
    assert_eq!(dataset.metrics.len(), 5);
    assert_eq!(dataset.velocity.len(), 1);

    let mut config = Config::default();
    config.output.format = OutputFormat::Json;
    let mut buffer = Vec::new();
    render_report(&dataset, &config, &mut buffer).unwrap();

    let parsed: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
    let tiers: Vec<&serde_json::Value> = parsed["comparisons"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| &row["gap"]["tier"])
        .collect();
    assert_eq!(tiers[0], "deficit-severe");
    assert_eq!(tiers[1], "deficit-moderate");
    assert_eq!(tiers[2], "balanced");
    assert_eq!(tiers[3], "balanced");
    assert!(tiers[4].is_null());

    let stability = &parsed["velocity"][0]["stability"];
    assert_eq!(stability["is_unstable"], true);
    assert_eq!(stability["outliers"][0]["period"], "May");
}
