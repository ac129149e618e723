//! 디스커버리 필터 -- 제외 규칙, 포트 선택, 제목 생성
//!
//! [`DiscoveryFilter`]는 런타임이 보고한 [`ContainerRecord`] 목록을
//! UI에 노출할 [`ServiceEntry`] 목록으로 변환합니다.
//! 입력 순서를 유지하며 내부 상태를 변경하지 않으므로 같은 입력에는
//! 항상 같은 출력을 냅니다.
//!
//! # 평가 순서
//!
//! 1. 첫 번째 이름 정규화: 없으면 [`Exclusion::MissingName`]
//! 2. 자기 이름 포함: [`Exclusion::SelfMatch`]
//! 3. denylist 포함: [`Exclusion::Denylisted`]
//! 4. 공개 TCP 포트 선택: 없으면 [`Exclusion::NoPublicPort`]
//! 5. 제목 포맷팅

use std::fmt;

use tracing::debug;

use crate::config::FilterConfig;
use crate::title::TitleFormatter;
use crate::types::{ContainerRecord, PortBinding, ServiceEntry, Transport};

/// 컨테이너가 결과에서 제외된 사유
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exclusion {
    /// 이름 목록이 비어 있거나 첫 이름이 비어 있음
    MissingName,
    /// 이 서비스 자신
    SelfMatch,
    /// denylist 패턴에 매칭됨
    Denylisted {
        /// 매칭된 패턴 (설정에 적힌 그대로)
        pattern: String,
    },
    /// 노출할 공개 TCP 포트가 없음
    NoPublicPort,
}

impl Exclusion {
    /// 메트릭 레이블 값
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::MissingName => "missing_name",
            Self::SelfMatch => "self_match",
            Self::Denylisted { .. } => "denylisted",
            Self::NoPublicPort => "no_public_port",
        }
    }
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName => f.write_str("no container name"),
            Self::SelfMatch => f.write_str("matches own service name"),
            Self::Denylisted { pattern } => write!(f, "matches denylist pattern '{pattern}'"),
            Self::NoPublicPort => f.write_str("no qualifying public tcp port"),
        }
    }
}

/// 이름 목록에서 표시 대상 이름을 꺼냅니다.
///
/// 첫 번째 이름만 사용하며 선행 `/` 하나를 제거합니다.
/// 이름이 없거나 제거 후 비어 있으면 `None`입니다.
pub fn normalize_name(names: &[String]) -> Option<&str> {
    let first = names.first()?.as_str();
    let name = first.strip_prefix('/').unwrap_or(first);
    if name.is_empty() { None } else { Some(name) }
}

/// 컨테이너 레코드를 서비스 엔트리로 변환하는 필터
///
/// 생성 시 매칭용 패턴을 소문자로 정규화해 두며, 이후에는 읽기 전용입니다.
#[derive(Debug, Clone)]
pub struct DiscoveryFilter {
    self_port: u16,
    self_name: String,
    /// (소문자 패턴, 원본 패턴)
    denylist: Vec<(String, String)>,
    titles: TitleFormatter,
}

impl DiscoveryFilter {
    /// 설정으로 필터를 생성합니다.
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            self_port: config.self_port,
            self_name: config.self_name.to_lowercase(),
            denylist: config
                .denylist
                .iter()
                .map(|p| (p.to_lowercase(), p.clone()))
                .collect(),
            titles: TitleFormatter::new(&config.acronyms),
        }
    }

    /// 컨테이너 하나를 평가합니다.
    pub fn evaluate(&self, record: &ContainerRecord) -> Result<ServiceEntry, Exclusion> {
        let name = normalize_name(&record.names).ok_or(Exclusion::MissingName)?;

        let lowered = name.to_lowercase();
        if lowered.contains(&self.self_name) {
            return Err(Exclusion::SelfMatch);
        }
        if let Some((_, pattern)) = self
            .denylist
            .iter()
            .find(|(needle, _)| lowered.contains(needle.as_str()))
        {
            return Err(Exclusion::Denylisted {
                pattern: pattern.clone(),
            });
        }

        let port = self
            .select_public_port(&record.ports)
            .ok_or(Exclusion::NoPublicPort)?;

        Ok(ServiceEntry {
            title: self.titles.format(name),
            docker_public_port: port,
        })
    }

    /// 컨테이너 목록을 평가해 통과한 엔트리만 입력 순서대로 반환합니다.
    ///
    /// 제외된 컨테이너는 사유와 함께 debug 로그와 메트릭으로만 남습니다.
    pub fn select(&self, records: &[ContainerRecord]) -> Vec<ServiceEntry> {
        records
            .iter()
            .filter_map(|record| match self.evaluate(record) {
                Ok(entry) => Some(entry),
                Err(reason) => {
                    debug!(
                        container_id = record.id.as_str(),
                        name = record.names.first().map(String::as_str).unwrap_or(""),
                        reason = %reason,
                        "container excluded from discovery"
                    );
                    metrics::counter!(
                        mission_control_core::metrics::DISCOVERY_CONTAINERS_EXCLUDED_TOTAL,
                        mission_control_core::metrics::LABEL_REASON => reason.as_label()
                    )
                    .increment(1);
                    None
                }
            })
            .collect()
    }

    /// 첫 번째로 조건을 만족하는 공개 TCP 포트를 고릅니다.
    ///
    /// 여러 개가 있어도 첫 번째만 사용합니다.
    fn select_public_port(&self, ports: &[PortBinding]) -> Option<u16> {
        ports
            .iter()
            .filter(|p| p.transport == Transport::Tcp)
            .filter_map(|p| p.public_port)
            .find(|&port| port != self.self_port)
    }
}
