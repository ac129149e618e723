//! 디스커버리 에러 타입
//!
//! [`DiscoveryError`]는 디스커버리 크레이트 내부에서 발생하는 모든 에러를 표현합니다.
//! `From<DiscoveryError> for MissionControlError` 변환이 구현되어 있어
//! 상위 레이어에서 `?` 연산자로 전파할 수 있습니다.

use mission_control_core::error::{ConfigError, DiscoveryFailure, MissionControlError};

/// 디스커버리 도메인 에러
///
/// HTTP 응답에는 이 에러의 내용이 노출되지 않습니다.
/// 조회 단계의 모든 실패는 호출자에게 동일한 업스트림 실패로 보입니다.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// Docker API 호출 실패
    #[error("docker api error: {0}")]
    DockerApi(String),

    /// Docker 소켓 연결 실패
    #[error("docker connection error: {0}")]
    DockerConnection(String),

    /// 목록 조회 타임아웃
    #[error("container listing timed out after {secs}s")]
    Timeout {
        /// 설정된 타임아웃 (초)
        secs: u64,
    },

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },
}

impl From<DiscoveryError> for MissionControlError {
    fn from(err: DiscoveryError) -> Self {
        match err {
            DiscoveryError::DockerApi(msg) | DiscoveryError::DockerConnection(msg) => {
                MissionControlError::Discovery(DiscoveryFailure::RuntimeApi(msg))
            }
            DiscoveryError::Timeout { secs } => {
                MissionControlError::Discovery(DiscoveryFailure::Timeout { secs })
            }
            DiscoveryError::Config { field, reason } => {
                MissionControlError::Config(ConfigError::InvalidValue { field, reason })
            }
        }
    }
}
