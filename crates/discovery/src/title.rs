//! 표시용 제목 포맷팅
//!
//! 컨테이너 이름을 하이픈 기준으로 나누어 각 세그먼트를 다음 규칙으로 변환한 뒤
//! 공백 하나로 다시 잇습니다.
//!
//! 1. 이미 전부 대문자인 세그먼트는 약어로 보고 그대로 둡니다 (`API` → `API`).
//! 2. 설정된 약어와 대소문자 무시로 일치하면 대문자로 바꿉니다 (`api` → `API`).
//! 3. 그 외에는 첫 글자만 대문자로 바꿉니다 (`gateway` → `Gateway`).
//!
//! 단방향 표시 변환이며 원래 이름으로 되돌릴 수 있다는 보장은 없습니다.

/// 약어 목록 없이 제목을 포맷합니다.
///
/// ```
/// use mission_control_discovery::title::format_title;
///
/// assert_eq!(format_title("my-cool-service"), "My Cool Service");
/// assert_eq!(format_title("API-gateway"), "API Gateway");
/// ```
pub fn format_title(raw: &str) -> String {
    TitleFormatter::default().format(raw)
}

/// 설정된 약어를 인식하는 제목 포매터
#[derive(Debug, Clone, Default)]
pub struct TitleFormatter {
    /// 소문자로 정규화된 약어 목록
    acronyms: Vec<String>,
}

impl TitleFormatter {
    /// 약어 목록으로 포매터를 생성합니다.
    pub fn new<I, S>(acronyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            acronyms: acronyms
                .into_iter()
                .map(|a| a.as_ref().trim().to_lowercase())
                .filter(|a| !a.is_empty())
                .collect(),
        }
    }

    /// 원시 컨테이너 이름을 표시용 제목으로 변환합니다.
    pub fn format(&self, raw: &str) -> String {
        raw.split('-')
            .map(|segment| self.format_segment(segment))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn format_segment(&self, segment: &str) -> String {
        if is_fully_uppercase(segment) {
            return segment.to_owned();
        }
        if self.is_acronym(segment) {
            return segment.to_uppercase();
        }
        capitalize_first(segment)
    }

    fn is_acronym(&self, segment: &str) -> bool {
        let lowered = segment.to_lowercase();
        self.acronyms.iter().any(|a| *a == lowered)
    }
}

fn is_fully_uppercase(segment: &str) -> bool {
    segment == segment.to_uppercase()
}

fn capitalize_first(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
