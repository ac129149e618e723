//! 메트릭 상수 및 설명 등록
//!
//! 모든 Prometheus 메트릭의 이름과 설명을 중앙에서 정의합니다.
//! 각 크레이트는 이 상수를 사용하여 `metrics::counter!()`, `metrics::gauge!()`,
//! `metrics::histogram!()` 매크로를 호출합니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `mission_control_`
//! - 접미어: `_total` (counter), `_seconds` (histogram), 없음 (gauge)
//!
//! # 사용 예시
//!
//! ```ignore
//! use metrics::counter;
//!
//! counter!(mission_control_core::metrics::DISCOVERY_REQUESTS_TOTAL).increment(1);
//! ```

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 제외 사유 레이블 키 (missing_name, self_match, denylisted, no_public_port)
pub const LABEL_REASON: &str = "reason";

/// 결과 레이블 키 (success, failure)
pub const LABEL_RESULT: &str = "result";

// ─── Discovery 메트릭 ───────────────────────────────────────────────

/// Discovery: 처리한 디스커버리 요청 수 (counter, label: result)
pub const DISCOVERY_REQUESTS_TOTAL: &str = "mission_control_discovery_requests_total";

/// Discovery: 런타임 목록 조회 실패 수 (counter)
pub const DISCOVERY_UPSTREAM_FAILURES_TOTAL: &str =
    "mission_control_discovery_upstream_failures_total";

/// Discovery: 제외된 컨테이너 수 (counter, label: reason)
pub const DISCOVERY_CONTAINERS_EXCLUDED_TOTAL: &str =
    "mission_control_discovery_containers_excluded_total";

/// Discovery: 마지막 응답에 포함된 서비스 수 (gauge)
pub const DISCOVERY_SERVICES_RETURNED: &str = "mission_control_discovery_services_returned";

/// Discovery: 런타임 목록 조회 지연 시간 (histogram, 초)
pub const DISCOVERY_LIST_DURATION_SECONDS: &str =
    "mission_control_discovery_list_duration_seconds";

// ─── 히스토그램 버킷 ────────────────────────────────────────────────

/// 런타임 목록 조회 지연 버킷 (초)
///
/// 1ms ~ 10s 범위 (Unix 소켓 왕복 기준)
pub const LIST_DURATION_BUCKETS: [f64; 9] = [0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 10.0];

// ─── 설명 등록 함수 ─────────────────────────────────────────────────

/// 모든 메트릭의 설명(description)을 등록합니다.
///
/// 전역 레코더 설치 후 한 번 호출합니다.
pub fn describe_all() {
    use metrics::{describe_counter, describe_gauge, describe_histogram};

    describe_counter!(
        DISCOVERY_REQUESTS_TOTAL,
        "Total number of container discovery requests handled"
    );
    describe_counter!(
        DISCOVERY_UPSTREAM_FAILURES_TOTAL,
        "Total number of failed container runtime listing calls"
    );
    describe_counter!(
        DISCOVERY_CONTAINERS_EXCLUDED_TOTAL,
        "Containers dropped from discovery results, by reason"
    );
    describe_gauge!(
        DISCOVERY_SERVICES_RETURNED,
        "Number of service entries in the most recent discovery response"
    );
    describe_histogram!(
        DISCOVERY_LIST_DURATION_SECONDS,
        "Container runtime listing latency in seconds"
    );
}
