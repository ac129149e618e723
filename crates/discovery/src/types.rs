//! 도메인 타입 -- 런타임 입력 레코드와 HTTP 출력 엔트리
//!
//! [`ContainerRecord`]는 런타임 클라이언트가 만들어 내는 입력이고,
//! [`ServiceEntry`]는 요청마다 생성되어 응답 후 버려지는 출력입니다.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 포트 바인딩의 전송 프로토콜
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// TCP
    Tcp,
    /// UDP
    Udp,
    /// SCTP
    Sctp,
    /// 런타임이 타입을 보고하지 않았거나 알 수 없는 값
    Unknown,
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Tcp => "tcp",
            Self::Udp => "udp",
            Self::Sctp => "sctp",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// 컨테이너 포트 바인딩
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortBinding {
    /// 전송 프로토콜
    pub transport: Transport,
    /// 호스트 측 공개 포트 (매핑되지 않았으면 `None`)
    pub public_port: Option<u16>,
    /// 컨테이너 내부 포트
    pub private_port: Option<u16>,
}

impl PortBinding {
    /// 공개 포트가 매핑된 TCP 바인딩을 생성합니다.
    pub fn tcp(public_port: u16) -> Self {
        Self {
            transport: Transport::Tcp,
            public_port: Some(public_port),
            private_port: None,
        }
    }
}

/// 런타임이 보고한 실행 중인 컨테이너
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerRecord {
    /// 컨테이너 ID
    pub id: String,
    /// 컨테이너 이름 목록 (Docker는 `/name` 형식으로 보고)
    pub names: Vec<String>,
    /// 포트 바인딩 목록
    pub ports: Vec<PortBinding>,
}

impl ContainerRecord {
    /// 이름 하나를 가진 레코드를 생성합니다.
    pub fn named(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            names: vec![name.into()],
            ports: Vec::new(),
        }
    }

    /// 포트 바인딩을 추가합니다.
    pub fn with_port(mut self, port: PortBinding) -> Self {
        self.ports.push(port);
        self
    }
}

/// UI에 표시되는 서비스 엔트리
///
/// JSON 키는 `title`, `dockerPublicPort`로 고정입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceEntry {
    /// 표시용 제목
    pub title: String,
    /// 외부에서 접근 가능한 호스트 TCP 포트
    pub docker_public_port: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_entry_uses_camel_case_keys() {
        let entry = ServiceEntry {
            title: "Widget API".to_owned(),
            docker_public_port: 7000,
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"title":"Widget API","dockerPublicPort":7000}"#);
    }

    #[test]
    fn empty_entry_list_serializes_to_empty_array() {
        let entries: Vec<ServiceEntry> = vec![];
        assert_eq!(serde_json::to_string(&entries).unwrap(), "[]");
    }

    #[test]
    fn transport_display_is_lowercase() {
        assert_eq!(Transport::Tcp.to_string(), "tcp");
        assert_eq!(Transport::Unknown.to_string(), "unknown");
    }

    #[test]
    fn record_builder_appends_ports_in_order() {
        let record = ContainerRecord::named("abc", "/web")
            .with_port(PortBinding::tcp(8080))
            .with_port(PortBinding {
                private_port: Some(443),
                ..PortBinding::tcp(8443)
            });
        assert_eq!(record.names, vec!["/web"]);
        assert_eq!(record.ports[0].public_port, Some(8080));
        assert_eq!(record.ports[1].private_port, Some(443));
    }
}
