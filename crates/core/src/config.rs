//! 설정 관리 -- mission-control.toml 파싱 및 런타임 설정
//!
//! [`MissionControlConfig`]는 모든 섹션의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선, 데몬에서 적용)
//! 2. 환경변수 (`MISSION_CONTROL_SERVER_PORT=8503` 형식)
//! 3. 설정 파일 (`mission-control.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), mission_control_core::error::MissionControlError> {
//! use mission_control_core::config::MissionControlConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = MissionControlConfig::load("mission-control.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = MissionControlConfig::parse("[server]\nport = 9000")?;
//! # Ok(())
//! # }
//! ```

use std::net::IpAddr;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, MissionControlError};

/// 기본 설정 파일 경로
pub const DEFAULT_CONFIG_PATH: &str = "/etc/mission-control/mission-control.toml";

/// 런타임 목록 조회 타임아웃 상한 (초)
pub const MAX_LIST_TIMEOUT_SECS: u64 = 300;

/// Mission Control 통합 설정
///
/// `mission-control.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MissionControlConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// HTTP 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 컨테이너 디스커버리 설정
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    /// 메트릭 익스포터 설정
    #[serde(default)]
    pub metrics: MetricsConfig,
}

impl MissionControlConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    ///
    /// 설정 로딩 순서:
    /// 1. TOML 파일 파싱
    /// 2. 환경변수 오버라이드 적용
    /// 3. 유효성 검증
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, MissionControlError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 파일이 없으면 기본값에서 시작하는 [`load`](Self::load) 변형입니다.
    ///
    /// 기본 경로를 사용하는 경우처럼 설정 파일이 선택 사항일 때 사용합니다.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self, MissionControlError> {
        let mut config = match Self::from_file(path.as_ref()).await {
            Ok(config) => config,
            Err(MissionControlError::Config(ConfigError::FileNotFound { path })) => {
                warn!(path = path.as_str(), "config file not found, using defaults");
                Self::default()
            }
            Err(e) => return Err(e),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, MissionControlError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MissionControlError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                MissionControlError::Io(e)
            }
        })?;
        Self::parse(&content)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, MissionControlError> {
        toml::from_str(toml_str).map_err(|e| {
            MissionControlError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `MISSION_CONTROL_{SECTION}_{FIELD}`
    /// 목록 필드는 쉼표로 구분합니다 (`MISSION_CONTROL_DISCOVERY_DENYLIST=lavin,etcd`).
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(
            &mut self.general.log_level,
            "MISSION_CONTROL_GENERAL_LOG_LEVEL",
        );
        override_string(
            &mut self.general.log_format,
            "MISSION_CONTROL_GENERAL_LOG_FORMAT",
        );

        // Server
        override_string(
            &mut self.server.listen_addr,
            "MISSION_CONTROL_SERVER_LISTEN_ADDR",
        );
        override_parsed(&mut self.server.port, "MISSION_CONTROL_SERVER_PORT");

        // Discovery
        override_string(
            &mut self.discovery.docker_socket,
            "MISSION_CONTROL_DISCOVERY_DOCKER_SOCKET",
        );
        override_string(
            &mut self.discovery.self_name,
            "MISSION_CONTROL_DISCOVERY_SELF_NAME",
        );
        override_csv(
            &mut self.discovery.denylist,
            "MISSION_CONTROL_DISCOVERY_DENYLIST",
        );
        override_csv(
            &mut self.discovery.acronyms,
            "MISSION_CONTROL_DISCOVERY_ACRONYMS",
        );
        override_parsed(
            &mut self.discovery.list_timeout_secs,
            "MISSION_CONTROL_DISCOVERY_LIST_TIMEOUT_SECS",
        );

        // Metrics
        override_parsed(&mut self.metrics.enabled, "MISSION_CONTROL_METRICS_ENABLED");
        override_string(
            &mut self.metrics.listen_addr,
            "MISSION_CONTROL_METRICS_LISTEN_ADDR",
        );
        override_parsed(&mut self.metrics.port, "MISSION_CONTROL_METRICS_PORT");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), MissionControlError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(invalid(
                "general.log_level",
                format!("must be one of: {}", valid_levels.join(", ")),
            ));
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(invalid(
                "general.log_format",
                format!("must be one of: {}", valid_formats.join(", ")),
            ));
        }

        if self.server.port == 0 {
            return Err(invalid("server.port", "must be greater than 0"));
        }

        if self.server.listen_addr.parse::<IpAddr>().is_err() {
            return Err(invalid(
                "server.listen_addr",
                format!("'{}' is not an IP address", self.server.listen_addr),
            ));
        }

        // 빈 부분 문자열은 모든 이름에 매칭되므로 전체 목록이 비게 됩니다.
        if self.discovery.self_name.trim().is_empty() {
            return Err(invalid("discovery.self_name", "must not be empty"));
        }

        if self.discovery.denylist.iter().any(|s| s.trim().is_empty()) {
            return Err(invalid(
                "discovery.denylist",
                "entries must not be empty strings",
            ));
        }

        if self.discovery.acronyms.iter().any(|s| s.trim().is_empty()) {
            return Err(invalid(
                "discovery.acronyms",
                "entries must not be empty strings",
            ));
        }

        if self.discovery.list_timeout_secs > MAX_LIST_TIMEOUT_SECS {
            return Err(invalid(
                "discovery.list_timeout_secs",
                format!("must be 0 (disabled) or 1-{MAX_LIST_TIMEOUT_SECS}"),
            ));
        }

        if self.metrics.enabled {
            if self.metrics.port == 0 {
                return Err(invalid("metrics.port", "must be greater than 0"));
            }
            let metrics_ip = self.metrics.listen_addr.parse::<IpAddr>().map_err(|_| {
                invalid(
                    "metrics.listen_addr",
                    format!("'{}' is not an IP address", self.metrics.listen_addr),
                )
            })?;
            if self.metrics.port == self.server.port
                && addresses_overlap(metrics_ip, &self.server.listen_addr)
            {
                return Err(invalid(
                    "metrics.port",
                    "must differ from server.port on an overlapping listen address",
                ));
            }
        }

        Ok(())
    }
}

/// 둘 중 하나라도 미지정 주소(`0.0.0.0`, `::`)면 같은 포트를 두고 충돌합니다.
fn addresses_overlap(metrics_ip: IpAddr, server_addr: &str) -> bool {
    match server_addr.parse::<IpAddr>() {
        Ok(server_ip) => {
            metrics_ip == server_ip || metrics_ip.is_unspecified() || server_ip.is_unspecified()
        }
        Err(_) => false,
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> MissionControlError {
    ConfigError::InvalidValue {
        field: field.to_owned(),
        reason: reason.into(),
    }
    .into()
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "json".to_owned(),
        }
    }
}

/// HTTP 서버 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 수신 주소
    pub listen_addr: String,
    /// 수신 포트 (자기 자신을 목록에서 제외할 때도 사용)
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0".to_owned(),
            port: 8503,
        }
    }
}

/// 컨테이너 디스커버리 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Docker 소켓 경로
    pub docker_socket: String,
    /// 자기 자신을 식별하는 이름 부분 문자열
    pub self_name: String,
    /// 목록에서 제외할 이름 부분 문자열 (대소문자 무시)
    pub denylist: Vec<String>,
    /// 제목에서 대문자로 표시할 약어
    pub acronyms: Vec<String>,
    /// 런타임 목록 조회 타임아웃 (초, 0이면 비활성화)
    pub list_timeout_secs: u64,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            docker_socket: "/var/run/docker.sock".to_owned(),
            self_name: "apollo-mission-control".to_owned(),
            denylist: vec!["lavin".to_owned(), "etcd".to_owned(), "synnax".to_owned()],
            acronyms: vec!["api".to_owned()],
            list_timeout_secs: 0,
        }
    }
}

/// Prometheus 메트릭 익스포터 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// 활성화 여부
    pub enabled: bool,
    /// 수신 주소
    pub listen_addr: String,
    /// 수신 포트
    pub port: u16,
    /// 스크레이프 경로
    pub endpoint: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            listen_addr: "127.0.0.1".to_owned(),
            port: 9100,
            endpoint: "/metrics".to_owned(),
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_parsed<T: FromStr>(target: &mut T, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<T>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                expected = std::any::type_name::<T>(),
                "failed to parse env var, ignoring"
            ),
        }
    }
}

fn override_csv(target: &mut Vec<String>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect();
    }
}
