use anyhow::Result;
use clap::Parser;

use mission_control_daemon::cli::DaemonCli;
use mission_control_daemon::logging::{bootstrap_tracing, init_tracing};
use mission_control_daemon::metrics_server::install_metrics_recorder;
use mission_control_daemon::server;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = DaemonCli::parse();

    // 설정 로딩 중 경고는 임시 구독자로 stderr에 남긴다
    let config = {
        let _bootstrap = bootstrap_tracing();
        cli.resolve_config().await?
    };

    if cli.validate {
        println!("configuration is valid");
        return Ok(());
    }

    init_tracing(&config.general)?;
    tracing::info!(
        port = config.server.port,
        self_name = %config.discovery.self_name,
        denylist = ?config.discovery.denylist,
        "mission-control-daemon starting"
    );

    if config.metrics.enabled {
        install_metrics_recorder(&config.metrics)?;
    }

    let state = server::build_state(&config).await?;
    server::serve(&config.server, state).await?;

    tracing::info!("mission-control-daemon shut down");
    Ok(())
}
