//! Integration tests for CLI argument handling
//!
//! Tests the --serve and --source flags from the command line.

use std::process::Command;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_feedscope"))
        .args(args)
        .output()
        .expect("Failed to execute feedscope")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("feedscope"), "Help should mention feedscope");
    assert!(stdout.contains("serve"), "Help should mention --serve flag");
    assert!(stdout.contains("source"), "Help should mention --source flag");
}

#[test]
fn test_version_flag_exits_successfully() {
    let output = run_cli(&["--version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("feedscope"));
}

#[test]
fn test_invalid_source_prints_error_and_exits() {
    let output = run_cli(&["--source", "not_a_source"]);
    assert!(
        !output.status.success(),
        "Expected invalid source to fail"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid source"),
        "Should print error message about invalid source: {}",
        stderr
    );
    assert!(
        stderr.contains("not_a_source"),
        "Error should echo the offending value: {}",
        stderr
    );
}

mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use feedscope::cli::{Cli, RunMode, SourceKind, StartupConfig};

    #[test]
    fn test_serve_with_source_combination() {
        let cli = Cli::parse_from(["feedscope", "--serve", "--source", "demo"]);
        let config = StartupConfig::from_cli(&cli).unwrap();

        assert!(matches!(config.mode, RunMode::Serve(_)));
        assert_eq!(config.source, SourceKind::Demo);
    }

    #[test]
    fn test_base_url_is_carried_through() {
        let cli = Cli::parse_from([
            "feedscope",
            "--source",
            "live",
            "--base-url",
            "http://upstream:9000/api",
        ]);
        let config = StartupConfig::from_cli(&cli).unwrap();

        assert_eq!(config.base_url.as_deref(), Some("http://upstream:9000/api"));
    }
}
