//! 통합 테스트 -- 런타임 조회부터 서비스 목록까지 전체 플로우 검증
//!
//! 목록 조회 → 이름 정규화 → 제외 규칙 → 포트 선택 → 제목 포맷팅
//! 시나리오를 테스트 전용 DockerClient 구현으로 검증합니다.

use std::sync::Arc;
use std::time::Duration;

use mission_control_discovery::{
    ContainerRecord, DiscoveryError, DiscoveryService, FilterConfig, FilterConfigBuilder,
    PortBinding, ServiceEntry, Transport,
};

// Test-only Docker clients
mod mock {
    use super::*;
    use mission_control_discovery::DockerClient;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Mutex;

    pub struct TestDockerClient {
        containers: Mutex<Vec<ContainerRecord>>,
        fail_list: Mutex<bool>,
        calls: AtomicUsize,
    }

    impl TestDockerClient {
        pub fn new(containers: Vec<ContainerRecord>) -> Self {
            Self {
                containers: Mutex::new(containers),
                fail_list: Mutex::new(false),
                calls: AtomicUsize::new(0),
            }
        }

        pub async fn set_fail_list(&self, fail: bool) {
            *self.fail_list.lock().await = fail;
        }

        pub async fn replace(&self, containers: Vec<ContainerRecord>) {
            *self.containers.lock().await = containers;
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl DockerClient for TestDockerClient {
        async fn list_containers(&self) -> Result<Vec<ContainerRecord>, DiscoveryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if *self.fail_list.lock().await {
                return Err(DiscoveryError::DockerConnection(
                    "connect ENOENT /var/run/docker.sock".to_owned(),
                ));
            }
            Ok(self.containers.lock().await.clone())
        }

        async fn ping(&self) -> Result<(), DiscoveryError> {
            Ok(())
        }
    }

    /// 응답하지 않는 런타임
    pub struct HangingDockerClient;

    impl DockerClient for HangingDockerClient {
        async fn list_containers(&self) -> Result<Vec<ContainerRecord>, DiscoveryError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Vec::new())
        }

        async fn ping(&self) -> Result<(), DiscoveryError> {
            Ok(())
        }
    }
}

use mock::{HangingDockerClient, TestDockerClient};

fn tcp(name: &str, port: u16) -> ContainerRecord {
    ContainerRecord::named(format!("id-{name}"), name).with_port(PortBinding::tcp(port))
}

fn default_service(client: Arc<TestDockerClient>) -> DiscoveryService<TestDockerClient> {
    DiscoveryService::new(client, &FilterConfig::default()).expect("valid config")
}

#[tokio::test]
async fn reference_scenario_yields_single_entry() {
    let client = Arc::new(TestDockerClient::new(vec![
        tcp("/apollo-mission-control", 8503),
        tcp("/lavin-proxy", 9000),
        tcp("/widget-api", 7000),
    ]));
    let service = default_service(client);

    let entries = service.discover().await.expect("discovery should succeed");
    let json = serde_json::to_string(&entries).expect("serialize");
    assert_eq!(json, r#"[{"title":"Widget API","dockerPublicPort":7000}]"#);
}

#[tokio::test]
async fn mixed_host_produces_only_presentable_services() {
    let nameless = ContainerRecord {
        id: "nameless".to_owned(),
        names: vec![],
        ports: vec![PortBinding::tcp(4000)],
    };
    let udp_only = ContainerRecord::named("udp", "/coredns").with_port(PortBinding {
        transport: Transport::Udp,
        public_port: Some(53),
        private_port: Some(53),
    });
    let internal_only = ContainerRecord::named("pg", "/postgres").with_port(PortBinding {
        transport: Transport::Tcp,
        public_port: None,
        private_port: Some(5432),
    });
    let client = Arc::new(TestDockerClient::new(vec![
        nameless,
        tcp("/grafana", 3000),
        udp_only,
        tcp("/ETCD-node-1", 2379),
        internal_only,
        tcp("/Synnax-console", 9090),
        tcp("/API-gateway", 8080),
        tcp("/my-cool-service", 8000),
    ]));
    let service = default_service(client);

    let entries = service.discover().await.expect("discovery should succeed");
    assert_eq!(
        entries,
        vec![
            ServiceEntry {
                title: "Grafana".to_owned(),
                docker_public_port: 3000,
            },
            ServiceEntry {
                title: "API Gateway".to_owned(),
                docker_public_port: 8080,
            },
            ServiceEntry {
                title: "My Cool Service".to_owned(),
                docker_public_port: 8000,
            },
        ]
    );
}

#[tokio::test]
async fn custom_self_port_and_denylist_are_honoured() {
    let config = FilterConfigBuilder::new()
        .self_port(9000)
        .self_name("dashboard")
        .denylist(["redis"])
        .build()
        .expect("valid config");
    let client = Arc::new(TestDockerClient::new(vec![
        tcp("/team-dashboard", 9100),
        tcp("/Redis-cache", 6379),
        tcp("/proxy", 9000),
        tcp("/lavin-proxy", 9001),
    ]));
    let service = DiscoveryService::new(client, &config).expect("valid config");

    let entries = service.discover().await.expect("discovery should succeed");
    assert_eq!(
        entries,
        vec![ServiceEntry {
            title: "Lavin Proxy".to_owned(),
            docker_public_port: 9001,
        }]
    );
}

#[tokio::test]
async fn failure_returns_no_partial_results() {
    let client = Arc::new(TestDockerClient::new(vec![tcp("/grafana", 3000)]));
    let service = default_service(Arc::clone(&client));

    assert_eq!(service.discover().await.expect("first call").len(), 1);

    client.set_fail_list(true).await;
    let err = service.discover().await.unwrap_err();
    assert!(matches!(err, DiscoveryError::DockerConnection(_)));

    // 실패 후 복구되면 다음 요청은 정상 처리
    client.set_fail_list(false).await;
    assert_eq!(service.discover().await.expect("recovered").len(), 1);
}

#[tokio::test]
async fn each_request_polls_the_runtime() {
    let client = Arc::new(TestDockerClient::new(vec![tcp("/grafana", 3000)]));
    let service = default_service(Arc::clone(&client));

    service.discover().await.expect("first");
    client.replace(vec![tcp("/grafana", 3000), tcp("/loki", 3100)]).await;
    let entries = service.discover().await.expect("second");

    assert_eq!(client.calls(), 2);
    assert_eq!(entries.len(), 2);
}

#[tokio::test]
async fn concurrent_requests_see_identical_results() {
    let client = Arc::new(TestDockerClient::new(vec![
        tcp("/grafana", 3000),
        tcp("/widget-api", 7000),
    ]));
    let service = Arc::new(default_service(client));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let svc = Arc::clone(&service);
            tokio::spawn(async move { svc.discover().await })
        })
        .collect();

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.expect("join").expect("discover"));
    }
    assert!(results.windows(2).all(|w| w[0] == w[1]));
}

#[tokio::test(start_paused = true)]
async fn hanging_runtime_times_out_when_deadline_configured() {
    let config = FilterConfigBuilder::new()
        .list_timeout_secs(2)
        .build()
        .expect("valid config");
    let service = DiscoveryService::new(Arc::new(HangingDockerClient), &config).expect("valid");

    let err = service.discover().await.unwrap_err();
    assert!(matches!(err, DiscoveryError::Timeout { secs: 2 }));
}

#[tokio::test(start_paused = true)]
async fn hanging_runtime_blocks_without_deadline() {
    let service = DiscoveryService::new(Arc::new(HangingDockerClient), &FilterConfig::default())
        .expect("valid");

    let outcome = tokio::time::timeout(Duration::from_secs(60), service.discover()).await;
    assert!(outcome.is_err(), "discover should still be pending");
}
