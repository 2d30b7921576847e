//! CLI smoke tests for the election-server binary
//!
//! Covers help output, configuration validation and a short `run --mock` startup.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::timeout;

fn run_election_server(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_election-server"))
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute election-server")
}

/// Run with a deadline; an elapsed deadline means the process was still serving.
async fn run_election_server_with_timeout(
    args: &[&str],
    timeout_duration: Duration,
) -> Result<std::process::Output, Box<dyn std::error::Error>> {
    let mut cmd = tokio::process::Command::new(env!("CARGO_BIN_EXE_election-server"));
    cmd.args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    match timeout(timeout_duration, cmd.output()).await {
        Ok(result) => result.map_err(|e| e.into()),
        Err(elapsed) => Err(elapsed.into()),
    }
}

/// Write `body` below a `server` section homed in `dir`, so logs and
/// database files stay inside the temp directory.
fn write_config(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    let home = dir.to_string_lossy().replace('\\', "/");
    let content = format!(
        "server:\n  home_dir: \"{home}\"\n  host: \"127.0.0.1\"\n  port: 0\n{body}"
    );
    std::fs::write(&path, content).expect("Failed to write config file");
    path
}

#[test]
fn test_cli_help_command() {
    let output = run_election_server(&["--help"]);

    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("election-server"), "Should contain binary name");
    assert!(stdout.contains("Usage:"), "Should contain usage information");
    assert!(stdout.contains("run"), "Should contain 'run' subcommand");
    assert!(stdout.contains("check"), "Should contain 'check' subcommand");
    assert!(stdout.contains("--config"), "Should mention config option");
    assert!(stdout.contains("--mock"), "Should mention mock option");
    assert!(stdout.contains("--seed"), "Should mention seed option");
}

#[test]
fn test_cli_version_command() {
    let output = run_election_server(&["--version"]);

    assert!(output.status.success(), "Version command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("election-server"));
    assert!(stdout.chars().any(|c| c.is_ascii_digit()));
}

#[test]
fn test_cli_invalid_command() {
    let output = run_election_server(&["invalid-command"]);

    assert!(!output.status.success(), "Invalid command should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error"), "Should report the bad subcommand: {stderr}");
}

#[test]
fn test_cli_config_validation_missing_file() {
    for flag in ["--config", "-c"] {
        let output = run_election_server(&[flag, "/nonexistent/config.yaml", "check"]);

        assert!(!output.status.success(), "Should fail with missing config");

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(
            stderr.contains("Config file not found"),
            "Should mention config file issue: {stderr}"
        );
    }
}

#[test]
fn test_cli_config_validation_invalid_yaml() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("invalid.yaml");
    std::fs::write(&config_path, "invalid: yaml: content: [unclosed")
        .expect("Failed to write file");

    let output = run_election_server(&["--config", config_path.to_str().unwrap(), "check"]);

    assert!(!output.status.success(), "Should fail with invalid YAML");

    let stderr = String::from_utf8_lossy(&output.stderr).to_lowercase();
    assert!(
        stderr.contains("yaml") || stderr.contains("config"),
        "Should mention YAML parsing issue: {stderr}"
    );
}

#[test]
fn test_cli_config_validation_valid_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(
        temp_dir.path(),
        "valid.yaml",
        r#"
database:
  url: "sqlite://database/election.db"

logging:
  default:
    console_level: info
    file: "logs/election.log"
    file_level: info
    max_backups: 3
    max_size_mb: 10
"#,
    );

    let output = run_election_server(&["--config", config_path.to_str().unwrap(), "check"]);

    if !output.status.success() {
        eprintln!("STDERR: {}", String::from_utf8_lossy(&output.stderr));
    }
    assert!(output.status.success(), "Should succeed with valid config");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Configuration check passed"), "{stdout}");
    assert!(stdout.contains("election.db"), "Should echo the resolved config: {stdout}");
}

#[test]
fn test_cli_unknown_database_scheme_fails_check() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(
        temp_dir.path(),
        "redis.yaml",
        "database:\n  url: \"redis://localhost\"\n",
    );

    let output = run_election_server(&["--config", config_path.to_str().unwrap(), "check"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown DSN"), "{stderr}");
}

#[test]
fn test_cli_mock_flag() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    // --mock replaces whatever database is configured
    let config_path = write_config(
        temp_dir.path(),
        "mock.yaml",
        "database:\n  url: \"redis://localhost\"\n",
    );

    let output =
        run_election_server(&["--config", config_path.to_str().unwrap(), "--mock", "check"]);

    if !output.status.success() {
        eprintln!("STDERR: {}", String::from_utf8_lossy(&output.stderr));
    }
    assert!(output.status.success(), "Should succeed with mock database");
}

#[test]
fn test_cli_print_config_applies_port_override() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(temp_dir.path(), "print.yaml", "");

    let output = run_election_server(&[
        "--config",
        config_path.to_str().unwrap(),
        "--port",
        "4321",
        "--print-config",
    ]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("port: 4321"), "{stdout}");
    assert!(stdout.contains("server:"), "{stdout}");
}

#[test]
fn test_cli_verbose_flag() {
    let output = run_election_server(&["-vv", "--help"]);

    assert!(output.status.success(), "Verbose help should succeed");
    assert!(String::from_utf8_lossy(&output.stdout).contains("Usage:"));
}

#[test]
fn test_cli_subcommand_help() {
    let output = run_election_server(&["run", "--help"]);
    assert!(output.status.success(), "Run subcommand help should succeed");
    assert!(String::from_utf8_lossy(&output.stdout).contains("Start the server"));

    let output = run_election_server(&["check", "--help"]);
    assert!(output.status.success(), "Check subcommand help should succeed");
    assert!(String::from_utf8_lossy(&output.stdout).contains("Check configuration"));
}

#[tokio::test]
async fn test_cli_run_command_with_mock_database() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(
        temp_dir.path(),
        "run.yaml",
        r#"
logging:
  default:
    console_level: info
    file: ""
    file_level: "off"
"#,
    );

    let result = run_election_server_with_timeout(
        &["--config", config_path.to_str().unwrap(), "--mock", "--seed", "run"],
        Duration::from_secs(5),
    )
    .await;

    match result {
        // Timeout is expected: the server was still running
        Err(err) if err.to_string().contains("elapsed") => {}
        Err(err) => panic!("Server failed to start: {err}"),
        Ok(output) => panic!(
            "Server exited early ({}): {}",
            output.status,
            String::from_utf8_lossy(&output.stderr)
        ),
    }
}

#[test]
fn test_cli_run_fails_fast_on_unknown_database() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(
        temp_dir.path(),
        "bad-db.yaml",
        "database:\n  url: \"redis://localhost\"\n",
    );

    let output = run_election_server(&["--config", config_path.to_str().unwrap(), "run"]);

    assert!(!output.status.success(), "Startup must abort without a database");
}
