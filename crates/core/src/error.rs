//! 에러 타입 -- 도메인별 에러 정의

/// Mission Control 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum MissionControlError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 컨테이너 디스커버리 에러
    #[error("discovery error: {0}")]
    Discovery(#[from] DiscoveryFailure),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 컨테이너 런타임 조회 실패
///
/// 디스커버리 크레이트의 세부 에러가 상위 레이어로 올라올 때 사용하는 형태입니다.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryFailure {
    /// 런타임 API 호출 실패
    #[error("runtime api error: {0}")]
    RuntimeApi(String),

    /// 런타임 응답 시간 초과
    #[error("runtime did not respond within {secs}s")]
    Timeout { secs: u64 },
}
