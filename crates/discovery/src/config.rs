//! 디스커버리 필터 설정
//!
//! [`FilterConfig`]는 core의 [`MissionControlConfig`]에서 파생되며,
//! 필터가 자기 자신을 제외할 때 필요한 서버 포트를 함께 담습니다.
//!
//! # 사용 예시
//! ```ignore
//! use mission_control_core::config::MissionControlConfig;
//! use mission_control_discovery::config::FilterConfig;
//!
//! let core_config = MissionControlConfig::default();
//! let config = FilterConfig::from_core(&core_config);
//! ```

use serde::{Deserialize, Serialize};

use mission_control_core::config::{MAX_LIST_TIMEOUT_SECS, MissionControlConfig};

use crate::error::DiscoveryError;

/// 디스커버리 필터 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Docker 소켓 경로
    pub docker_socket: String,
    /// 이 서비스가 수신 중인 포트 (같은 공개 포트는 후보에서 제외)
    pub self_port: u16,
    /// 이 서비스 자신을 식별하는 이름 부분 문자열
    pub self_name: String,
    /// 제외할 이름 부분 문자열 목록 (대소문자 무시)
    pub denylist: Vec<String>,
    /// 제목에서 대문자로 표시할 약어
    pub acronyms: Vec<String>,
    /// 런타임 목록 조회 타임아웃 (초, 0이면 비활성화)
    pub list_timeout_secs: u64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self::from_core(&MissionControlConfig::default())
    }
}

impl FilterConfig {
    /// core의 `MissionControlConfig`에서 필터 설정을 생성합니다.
    pub fn from_core(core: &MissionControlConfig) -> Self {
        Self {
            docker_socket: core.discovery.docker_socket.clone(),
            self_port: core.server.port,
            self_name: core.discovery.self_name.clone(),
            denylist: core.discovery.denylist.clone(),
            acronyms: core.discovery.acronyms.clone(),
            list_timeout_secs: core.discovery.list_timeout_secs,
        }
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), DiscoveryError> {
        if self.self_port == 0 {
            return Err(DiscoveryError::Config {
                field: "self_port".to_owned(),
                reason: "must be greater than 0".to_owned(),
            });
        }

        if self.self_name.trim().is_empty() {
            return Err(DiscoveryError::Config {
                field: "self_name".to_owned(),
                reason: "must not be empty".to_owned(),
            });
        }

        if self.denylist.iter().any(|s| s.trim().is_empty()) {
            return Err(DiscoveryError::Config {
                field: "denylist".to_owned(),
                reason: "entries must not be empty strings".to_owned(),
            });
        }

        if self.acronyms.iter().any(|s| s.trim().is_empty()) {
            return Err(DiscoveryError::Config {
                field: "acronyms".to_owned(),
                reason: "entries must not be empty strings".to_owned(),
            });
        }

        if self.list_timeout_secs > MAX_LIST_TIMEOUT_SECS {
            return Err(DiscoveryError::Config {
                field: "list_timeout_secs".to_owned(),
                reason: format!("must be 0 (disabled) or 1-{MAX_LIST_TIMEOUT_SECS}"),
            });
        }

        Ok(())
    }
}

/// 필터 설정 빌더
#[derive(Default)]
pub struct FilterConfigBuilder {
    config: FilterConfig,
}

impl FilterConfigBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// Docker 소켓 경로를 설정합니다.
    pub fn docker_socket(mut self, socket: impl Into<String>) -> Self {
        self.config.docker_socket = socket.into();
        self
    }

    /// 자기 포트를 설정합니다.
    pub fn self_port(mut self, port: u16) -> Self {
        self.config.self_port = port;
        self
    }

    /// 자기 이름 부분 문자열을 설정합니다.
    pub fn self_name(mut self, name: impl Into<String>) -> Self {
        self.config.self_name = name.into();
        self
    }

    /// denylist를 교체합니다.
    pub fn denylist<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.denylist = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// 약어 목록을 교체합니다.
    pub fn acronyms<I, S>(mut self, acronyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.acronyms = acronyms.into_iter().map(Into::into).collect();
        self
    }

    /// 목록 조회 타임아웃(초)을 설정합니다.
    pub fn list_timeout_secs(mut self, secs: u64) -> Self {
        self.config.list_timeout_secs = secs;
        self
    }

    /// 설정을 검증하고 빌드합니다.
    pub fn build(self) -> Result<FilterConfig, DiscoveryError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
