//! Configuration-phase logging tests.
//!
//! Warnings raised while resolving configuration must reach the bootstrap
//! subscriber, since the configured subscriber does not exist yet.

use std::io::Write;
use std::sync::{Arc, Mutex};

use clap::Parser;
use serial_test::serial;
use tempfile::NamedTempFile;

use mission_control_daemon::cli::DaemonCli;
use mission_control_daemon::logging::bootstrap_tracing_with_writer;

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
#[serial]
async fn unparsable_env_override_is_logged_during_config_load() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"[server]\nport = 8600\n").unwrap();
    let path = file.path().to_str().unwrap().to_owned();
    let cli = DaemonCli::try_parse_from(["mission-control-daemon", "--config", &path]).unwrap();

    // SAFETY: serial 테스트에서만 환경변수를 조작합니다.
    unsafe { std::env::set_var("MISSION_CONTROL_SERVER_PORT", "notaport") };

    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let config = {
        let _bootstrap = bootstrap_tracing_with_writer(move || writer.clone());
        cli.resolve_config().await
    };

    unsafe { std::env::remove_var("MISSION_CONTROL_SERVER_PORT") };

    let config = config.unwrap();
    assert_eq!(config.server.port, 8600);

    let output = logs.contents();
    assert!(output.contains("failed to parse env var"), "logs: {output}");
    assert!(output.contains("MISSION_CONTROL_SERVER_PORT"), "logs: {output}");
}

#[test]
fn bootstrap_guard_is_scoped() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    {
        let _bootstrap = bootstrap_tracing_with_writer(move || writer.clone());
        tracing::warn!("inside bootstrap scope");
    }
    tracing::warn!("after bootstrap scope");

    let output = logs.contents();
    assert!(output.contains("inside bootstrap scope"));
    assert!(!output.contains("after bootstrap scope"));
}
