//! 디스커버리 서비스 -- 런타임 조회와 필터를 묶는 요청 단위 진입점
//!
//! [`DiscoveryService`]는 요청마다 런타임 목록을 한 번 조회하고
//! [`DiscoveryFilter`]로 변환합니다. 요청 사이에 공유되는 것은
//! 읽기 전용 설정과 클라이언트뿐이므로 잠금 없이 동시에 호출할 수 있습니다.
//!
//! 재시도나 캐시는 없습니다. 조회가 실패하면 그 요청은 실패하고,
//! 호출자가 다시 요청해야 합니다.

use std::sync::Arc;
use std::time::{Duration, Instant};

use metrics::{counter, gauge, histogram};
use tracing::debug;

use mission_control_core::health::HealthStatus;
use mission_control_core::metrics as names;

use crate::config::FilterConfig;
use crate::docker::DockerClient;
use crate::error::DiscoveryError;
use crate::filter::DiscoveryFilter;
use crate::types::{ContainerRecord, ServiceEntry};

/// 컨테이너 디스커버리 서비스
pub struct DiscoveryService<D: DockerClient> {
    client: Arc<D>,
    filter: DiscoveryFilter,
    list_timeout: Option<Duration>,
}

impl<D: DockerClient> DiscoveryService<D> {
    /// 클라이언트와 설정으로 서비스를 생성합니다.
    ///
    /// # Errors
    ///
    /// 설정 검증에 실패하면 `DiscoveryError::Config`를 반환합니다.
    pub fn new(client: Arc<D>, config: &FilterConfig) -> Result<Self, DiscoveryError> {
        config.validate()?;
        let list_timeout =
            (config.list_timeout_secs > 0).then(|| Duration::from_secs(config.list_timeout_secs));
        Ok(Self {
            client,
            filter: DiscoveryFilter::new(config),
            list_timeout,
        })
    }

    /// 실행 중인 컨테이너를 조회해 표시 가능한 서비스 목록을 만듭니다.
    ///
    /// 결과가 비어 있어도 성공입니다.
    ///
    /// # Errors
    ///
    /// 런타임 조회 실패 또는 타임아웃 시 에러를 반환합니다.
    /// 부분 결과는 없습니다.
    pub async fn discover(&self) -> Result<Vec<ServiceEntry>, DiscoveryError> {
        let started = Instant::now();
        let listed = self.list().await;
        histogram!(names::DISCOVERY_LIST_DURATION_SECONDS).record(started.elapsed().as_secs_f64());

        let records = match listed {
            Ok(records) => records,
            Err(e) => {
                counter!(names::DISCOVERY_UPSTREAM_FAILURES_TOTAL).increment(1);
                counter!(names::DISCOVERY_REQUESTS_TOTAL, names::LABEL_RESULT => "failure")
                    .increment(1);
                return Err(e);
            }
        };

        let entries = self.filter.select(&records);
        debug!(
            containers = records.len(),
            services = entries.len(),
            "discovery completed"
        );

        counter!(names::DISCOVERY_REQUESTS_TOTAL, names::LABEL_RESULT => "success").increment(1);
        gauge!(names::DISCOVERY_SERVICES_RETURNED).set(entries.len() as f64);

        Ok(entries)
    }

    /// 런타임 연결 상태를 확인합니다.
    pub async fn health_check(&self) -> HealthStatus {
        match self.client.ping().await {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Unhealthy(format!("container runtime unreachable: {e}")),
        }
    }

    async fn list(&self) -> Result<Vec<ContainerRecord>, DiscoveryError> {
        match self.list_timeout {
            Some(limit) => tokio::time::timeout(limit, self.client.list_containers())
                .await
                .map_err(|_| DiscoveryError::Timeout {
                    secs: limit.as_secs(),
                })?,
            None => self.client.list_containers().await,
        }
    }
}
