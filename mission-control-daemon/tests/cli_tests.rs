//! CLI parsing and configuration resolution tests.

use std::io::Write;

use clap::Parser;
use serial_test::serial;
use tempfile::NamedTempFile;

use mission_control_daemon::cli::DaemonCli;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn parses_all_flags() {
    let cli = DaemonCli::try_parse_from([
        "mission-control-daemon",
        "--config",
        "/tmp/mc.toml",
        "--log-level",
        "debug",
        "--log-format",
        "pretty",
        "--port",
        "9000",
        "--validate",
    ])
    .unwrap();

    assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("/tmp/mc.toml")));
    assert_eq!(cli.log_level.as_deref(), Some("debug"));
    assert_eq!(cli.log_format.as_deref(), Some("pretty"));
    assert_eq!(cli.port, Some(9000));
    assert!(cli.validate);
}

#[test]
fn flags_are_optional() {
    let cli = DaemonCli::try_parse_from(["mission-control-daemon"]).unwrap();
    assert!(cli.config.is_none());
    assert!(cli.port.is_none());
    assert!(!cli.validate);
}

#[test]
fn rejects_non_numeric_port() {
    assert!(DaemonCli::try_parse_from(["mission-control-daemon", "--port", "http"]).is_err());
}

#[tokio::test]
#[serial]
async fn cli_overrides_file_values() {
    let file = write_config(
        r#"
[general]
log_level = "warn"

[server]
port = 8600

[discovery]
denylist = ["traefik"]
"#,
    );
    let path = file.path().to_str().unwrap().to_owned();
    let cli = DaemonCli::try_parse_from([
        "mission-control-daemon",
        "--config",
        &path,
        "--log-level",
        "trace",
        "--port",
        "9100",
    ])
    .unwrap();

    let config = cli.resolve_config().await.unwrap();

    assert_eq!(config.general.log_level, "trace");
    assert_eq!(config.server.port, 9100);
    assert_eq!(config.discovery.denylist, vec!["traefik"]);
}

#[tokio::test]
#[serial]
async fn explicit_missing_config_is_an_error() {
    let cli = DaemonCli::try_parse_from([
        "mission-control-daemon",
        "--config",
        "/nonexistent/mission-control.toml",
    ])
    .unwrap();

    let err = cli.resolve_config().await.unwrap_err();
    assert!(err.to_string().contains("/nonexistent/mission-control.toml"));
}

#[tokio::test]
#[serial]
async fn invalid_cli_override_fails_validation() {
    let file = write_config("");
    let path = file.path().to_str().unwrap().to_owned();
    let cli = DaemonCli::try_parse_from([
        "mission-control-daemon",
        "--config",
        &path,
        "--log-format",
        "xml",
    ])
    .unwrap();

    let err = cli.resolve_config().await.unwrap_err();
    assert!(err.to_string().contains("invalid configuration"));
}

#[tokio::test]
#[serial]
async fn zero_port_override_fails_validation() {
    let file = write_config("");
    let path = file.path().to_str().unwrap().to_owned();
    let cli =
        DaemonCli::try_parse_from(["mission-control-daemon", "--config", &path, "--port", "0"])
            .unwrap();

    assert!(cli.resolve_config().await.is_err());
}
