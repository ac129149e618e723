//! Docker API abstraction for testability.
//!
//! The [`DockerClient`] trait abstracts the single read-only runtime call the
//! discovery service needs, allowing production code to use
//! [`BollardDockerClient`] while tests use `MockDockerClient`.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │ DiscoveryService │
//! └────────┬─────────┘
//!          │
//!          ▼
//!   ┌─────────────┐
//!   │DockerClient │ (trait)
//!   └─────────────┘
//!        │     │
//!        ▼     ▼
//!   ┌───────┐ ┌────┐
//!   │Bollard│ │Mock│
//!   └───┬───┘ └────┘
//!       │
//!       ▼
//!   Docker Daemon
//! ```
//!
//! # Examples
//!
//! ```ignore
//! use mission_control_discovery::BollardDockerClient;
//!
//! let client = BollardDockerClient::new("/var/run/docker.sock");
//! let containers = client.list_containers().await?;
//! # Ok::<(), mission_control_discovery::DiscoveryError>(())
//! ```

use std::future::Future;
use std::sync::Arc;

use bollard::models::{ContainerSummary, Port, PortTypeEnum};
use tokio::sync::OnceCell;

use crate::error::DiscoveryError;
use crate::types::{ContainerRecord, PortBinding, Transport};

/// Trait abstracting the container runtime.
///
/// Any runtime client that can list running containers with their names and
/// port bindings satisfies the discovery contract.
///
/// The trait is `Send + Sync + 'static`, allowing it to be shared across
/// concurrent request handlers behind an `Arc`.
pub trait DockerClient: Send + Sync + 'static {
    /// Lists running containers.
    ///
    /// Stopped/exited containers are not returned.
    ///
    /// # Errors
    ///
    /// Returns `DiscoveryError::DockerApi` if the runtime call fails.
    fn list_containers(
        &self,
    ) -> impl Future<Output = Result<Vec<ContainerRecord>, DiscoveryError>> + Send;

    /// Checks Docker daemon connectivity.
    ///
    /// # Errors
    ///
    /// Returns `DiscoveryError::DockerConnection` if the daemon is unreachable.
    fn ping(&self) -> impl Future<Output = Result<(), DiscoveryError>> + Send;
}

/// Production Docker client implementation using `bollard`.
///
/// Communicates with the Docker daemon via a Unix socket. The underlying
/// `bollard::Docker` is built on the first call and reused afterwards, so a
/// missing socket surfaces as `DiscoveryError::DockerConnection` from
/// [`list_containers`](DockerClient::list_containers) or
/// [`ping`](DockerClient::ping), never from construction. A failed build is
/// retried on the next call.
///
/// # Connection Management
///
/// - Connection timeout: 120 seconds
/// - API version: Default (auto-negotiated)
#[derive(Clone)]
pub struct BollardDockerClient {
    /// Socket path, or `None` for bollard's local defaults
    socket_path: Option<String>,
    docker: Arc<OnceCell<bollard::Docker>>,
}

impl BollardDockerClient {
    /// Creates a client for the given socket path.
    ///
    /// An empty path selects the default local socket (`DOCKER_HOST` or
    /// `/var/run/docker.sock`).
    pub fn new(socket_path: &str) -> Self {
        if socket_path.trim().is_empty() {
            Self::local()
        } else {
            Self {
                socket_path: Some(socket_path.to_owned()),
                docker: Arc::new(OnceCell::new()),
            }
        }
    }

    /// Creates a client for the default local socket.
    pub fn local() -> Self {
        Self {
            socket_path: None,
            docker: Arc::new(OnceCell::new()),
        }
    }

    /// Socket path this client connects to (`None` for local defaults).
    pub fn socket_path(&self) -> Option<&str> {
        self.socket_path.as_deref()
    }

    async fn docker(&self) -> Result<&bollard::Docker, DiscoveryError> {
        self.docker
            .get_or_try_init(|| async { self.connect() })
            .await
    }

    fn connect(&self) -> Result<bollard::Docker, DiscoveryError> {
        match &self.socket_path {
            Some(path) => {
                bollard::Docker::connect_with_socket(path, 120, bollard::API_DEFAULT_VERSION)
                    .map_err(|e| {
                        DiscoveryError::DockerConnection(format!(
                            "failed to connect to docker at {path}: {e}"
                        ))
                    })
            }
            None => bollard::Docker::connect_with_local_defaults().map_err(|e| {
                DiscoveryError::DockerConnection(format!("failed to connect to docker: {e}"))
            }),
        }
    }
}

impl DockerClient for BollardDockerClient {
    async fn list_containers(&self) -> Result<Vec<ContainerRecord>, DiscoveryError> {
        use bollard::container::ListContainersOptions;

        let options = ListContainersOptions::<String> {
            all: false,
            ..Default::default()
        };

        let containers = self
            .docker()
            .await?
            .list_containers(Some(options))
            .await
            .map_err(|e| DiscoveryError::DockerApi(format!("list containers failed: {e}")))?;

        Ok(containers.into_iter().map(record_from_summary).collect())
    }

    async fn ping(&self) -> Result<(), DiscoveryError> {
        self.docker()
            .await?
            .ping()
            .await
            .map_err(|e| DiscoveryError::DockerConnection(format!("ping failed: {e}")))?;
        Ok(())
    }
}

/// Converts a bollard summary into a [`ContainerRecord`].
///
/// Absent fields become empty collections so the filter can treat
/// "missing" and "empty" identically.
pub(crate) fn record_from_summary(summary: ContainerSummary) -> ContainerRecord {
    ContainerRecord {
        id: summary.id.unwrap_or_default(),
        names: summary.names.unwrap_or_default(),
        ports: summary
            .ports
            .unwrap_or_default()
            .into_iter()
            .map(binding_from_port)
            .collect(),
    }
}

fn binding_from_port(port: Port) -> PortBinding {
    PortBinding {
        transport: transport_from(port.typ),
        public_port: port.public_port,
        private_port: Some(port.private_port),
    }
}

fn transport_from(typ: Option<PortTypeEnum>) -> Transport {
    match typ {
        Some(PortTypeEnum::TCP) => Transport::Tcp,
        Some(PortTypeEnum::UDP) => Transport::Udp,
        Some(PortTypeEnum::SCTP) => Transport::Sctp,
        _ => Transport::Unknown,
    }
}

/// 테스트용 Mock Docker 클라이언트
///
/// 설정 가능한 응답을 반환하여 Docker 없이도 테스트할 수 있습니다.
#[cfg(test)]
#[derive(Default)]
pub struct MockDockerClient {
    /// list_containers 호출 시 반환할 컨테이너 목록
    pub containers: Vec<ContainerRecord>,
    /// 목록 조회 실패를 시뮬레이션할지 여부
    pub fail_list: bool,
    /// ping 실패를 시뮬레이션할지 여부
    pub fail_ping: bool,
}

#[cfg(test)]
impl MockDockerClient {
    /// 빈 컨테이너 목록으로 mock 클라이언트를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 테스트용 컨테이너를 설정합니다.
    pub fn with_containers(mut self, containers: Vec<ContainerRecord>) -> Self {
        self.containers = containers;
        self
    }

    /// 목록 조회가 실패하도록 설정합니다.
    pub fn with_failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    /// ping이 실패하도록 설정합니다.
    pub fn with_failing_ping(mut self) -> Self {
        self.fail_ping = true;
        self
    }
}

#[cfg(test)]
impl DockerClient for MockDockerClient {
    async fn list_containers(&self) -> Result<Vec<ContainerRecord>, DiscoveryError> {
        if self.fail_list {
            return Err(DiscoveryError::DockerApi(
                "connect ENOENT /var/run/docker.sock".to_owned(),
            ));
        }
        Ok(self.containers.clone())
    }

    async fn ping(&self) -> Result<(), DiscoveryError> {
        if self.fail_ping {
            return Err(DiscoveryError::DockerConnection("mock ping failure".to_owned()));
        }
        Ok(())
    }
}
