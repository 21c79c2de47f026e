//! Integration tests for e2ediff
//!
//! These tests run the full pipeline over the fixture result sets in
//! `tests/fixtures`: load both CSVs, aggregate, compare and write output.

use clap::Parser;
use e2ediff::{
    AggregateResult, Cli, ComparisonRow, InputConfig, MalformedPolicy, MetricMean, PercentChange,
    Report, SoftwareKey, aggregate_csv, aggregate_csv_file, compare, read_comparison_csv,
    run_with_cli,
};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn load(name: &str) -> AggregateResult {
    aggregate_csv_file(&fixture(name), &InputConfig::default(), MalformedPolicy::Abort).unwrap()
}

fn find<'a>(rows: &'a [ComparisonRow], software: &str, metric: &str) -> &'a ComparisonRow {
    rows.iter()
        .find(|row| row.software().to_string() == software && row.metric == metric)
        .unwrap_or_else(|| panic!("no row for {software} {metric}"))
}

fn cli(args: &[&str]) -> Cli {
    Cli::parse_from(std::iter::once("e2ediff").chain(args.iter().copied()))
}

/// Spot-check averages of both fixture sets
#[test]
fn test_fixture_averages() {
    let old = load("old.csv");
    let new = load("new.csv");

    let ubuntu = SoftwareKey::new("ubuntu", "chrome", "banjo");
    let osx_chrome = SoftwareKey::new("osx", "chrome", "banjo");
    let osx_ndt = SoftwareKey::new("osx", "firefox", "ndt_js");
    let win = SoftwareKey::new("win", "firefox", "banjo");

    assert_eq!(old.mean(&ubuntu, "c2s_throughput"), Some(MetricMean::Mean(94.05)));
    assert_eq!(old.mean(&osx_chrome, "s2c_throughput"), Some(MetricMean::Mean(83.4)));
    assert_eq!(new.mean(&osx_ndt, "c2s_throughput"), Some(MetricMean::Mean(94.25)));
    assert_eq!(new.mean(&win, "total_duration"), Some(MetricMean::Mean(33.35)));

    // the failed win10 run only measured total_duration
    assert_eq!(old.mean(&win, "total_duration"), Some(MetricMean::Mean(15.0)));
    assert_eq!(old.mean(&win, "latency"), Some(MetricMean::NoData));

    assert_eq!(old.get(&ubuntu).unwrap().os_version, "14.04");
    assert_eq!(new.get(&ubuntu).unwrap().os_version, "16.04");
}

/// Comparison scenarios from the fixture sets
#[test]
fn test_fixture_comparison() {
    let rows = compare(&load("old.csv"), &load("new.csv"));

    // 4 software keys in the new set x 7 metric columns
    assert_eq!(rows.len(), 28);
    assert_eq!(rows[0].software().to_string(), "osx-chrome-banjo");
    assert_eq!(rows[0].metric, "total_duration");

    let ubuntu = find(&rows, "ubuntu-chrome-banjo", "total_duration");
    assert_eq!(ubuntu.old_avg, MetricMean::Mean(27.7));
    assert_eq!(ubuntu.new_avg, MetricMean::Mean(27.6));
    assert_eq!(ubuntu.percent_change.to_string(), "-0.0");

    let ndt = find(&rows, "osx-firefox-ndt_js", "s2c_throughput");
    assert_eq!(ndt.old_avg, MetricMean::NoData);
    assert_eq!(ndt.new_avg, MetricMean::Mean(93.8));
    assert_eq!(ndt.percent_change, PercentChange::Error);

    let win_latency = find(&rows, "win-firefox-banjo", "latency");
    assert_eq!(win_latency.old_avg, MetricMean::NoData);
    assert_eq!(win_latency.percent_change, PercentChange::Error);

    // zero means never produce a percentage
    let ubuntu_error = find(&rows, "ubuntu-chrome-banjo", "error");
    assert_eq!(ubuntu_error.new_avg, MetricMean::Mean(0.0));
    assert_eq!(ubuntu_error.percent_change, PercentChange::Error);

    // (73.0 - 52.5) / 73.0 = 0.2808 -> 0.28 -> 28%
    let osx_latency = find(&rows, "osx-chrome-banjo", "latency");
    match osx_latency.percent_change {
        PercentChange::Percent(v) => assert!((v - 28.0).abs() < 1e-9),
        PercentChange::Error => panic!("expected a percentage"),
    }

    // error_list is never a metric
    assert!(rows.iter().all(|row| row.metric != "error_list"));
}

/// Headerless input produces the same aggregate as the headed fixture
#[test]
fn test_headerless_input_matches_headed_input() {
    let headed = std::fs::read_to_string(fixture("new.csv")).unwrap();
    let headerless: String = headed.lines().skip(1).map(|line| format!("{line}\n")).collect();

    let config = InputConfig::default();
    let from_headed = aggregate_csv(headed.as_bytes(), &config, MalformedPolicy::Abort).unwrap();
    let from_headerless = aggregate_csv(headerless.as_bytes(), &config, MalformedPolicy::Abort).unwrap();

    assert_eq!(from_headed, from_headerless);
}

/// The CLI writes a CSV that reads back into the same rows
#[test]
fn test_cli_writes_csv_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("comparison.csv");
    let old = fixture("old.csv");
    let new = fixture("new.csv");

    run_with_cli(cli(&[
        "--old-csv",
        old.to_str().unwrap(),
        "--new-csv",
        new.to_str().unwrap(),
        "--output-file",
        output.to_str().unwrap(),
        "--quiet",
    ]))
    .unwrap();

    let text = std::fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("os,browser,client,metric,old_avg,new_avg,%change\r\n"));
    assert!(text.contains("ubuntu,chrome,banjo,total_duration,27.7,27.6,-0.0\r\n"));
    assert!(text.contains("osx,firefox,ndt_js,s2c_throughput,none,93.8,error\r\n"));

    let written = read_comparison_csv(text.as_bytes()).unwrap();
    let expected = compare(&load("old.csv"), &load("new.csv"));
    assert_eq!(written, expected);
}

/// JSON output carries metadata and software summaries
#[test]
fn test_cli_writes_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("comparison.json");
    let old = fixture("old.csv");
    let new = fixture("new.csv");

    run_with_cli(cli(&[
        "--old-csv",
        old.to_str().unwrap(),
        "--new-csv",
        new.to_str().unwrap(),
        "--output-file",
        output.to_str().unwrap(),
        "--format",
        "json",
        "--quiet",
    ]))
    .unwrap();

    let report: Report = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(report.old_software.len(), 3);
    assert_eq!(report.new_software.len(), 4);
    assert_eq!(report.comparisons.len(), 28);
    assert!(report.meta.old_csv.ends_with("old.csv"));
}

/// A malformed filename aborts the run unless skipping is requested
#[test]
fn test_cli_malformed_filename_policy() {
    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("bad.csv");
    std::fs::write(
        &bad,
        "filename,latency\n\
         osx10.12-chrome57-banjo-2017-04-06T223328Z-results.json,73.0\n\
         broken.json,1.0\n",
    )
    .unwrap();
    let output = dir.path().join("out.csv");
    let new = fixture("new.csv");

    let args = [
        "--old-csv",
        bad.to_str().unwrap(),
        "--new-csv",
        new.to_str().unwrap(),
        "--output-file",
        output.to_str().unwrap(),
        "--quiet",
    ];

    let err = run_with_cli(cli(&args)).unwrap_err();
    assert!(format!("{err:#}").contains("bad.csv"));
    assert!(!output.exists());

    let mut skipping = args.to_vec();
    skipping.extend(["--on-malformed", "skip"]);
    run_with_cli(cli(&skipping)).unwrap();
    assert!(output.exists());
}

/// A missing input file is an error naming the path
#[test]
fn test_cli_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.csv");
    let new = fixture("new.csv");
    let output = dir.path().join("out.csv");

    let err = run_with_cli(cli(&[
        "--old-csv",
        missing.to_str().unwrap(),
        "--new-csv",
        new.to_str().unwrap(),
        "--output-file",
        output.to_str().unwrap(),
        "--quiet",
    ]))
    .unwrap_err();

    assert!(err.to_string().contains("missing.csv"));
}
