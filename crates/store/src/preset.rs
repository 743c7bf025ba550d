//! 필터 프리셋 — 자주 쓰는 장애 조사 프로파일
//!
//! 프리셋은 `level`/`contains` 두 필드만 채울 수 있는 부분 템플릿이며,
//! 호출자가 명시한 값을 절대 덮어쓰지 않습니다.

use crate::query::LogFilter;

/// 프리셋 정의 — level/contains의 부분 집합
struct Preset {
    name: &'static str,
    level: Option<&'static str>,
    contains: Option<&'static str>,
}

/// 고정 프리셋 표
const PRESETS: &[Preset] = &[
    Preset {
        name: "email",
        level: Some("ERROR"),
        contains: Some("failed to send email"),
    },
    Preset {
        name: "network",
        level: None,
        contains: Some("network"),
    },
    Preset {
        name: "proxy",
        level: None,
        contains: Some("proxy"),
    },
    Preset {
        name: "agent",
        level: None,
        contains: Some("Zabbix agent"),
    },
    Preset {
        name: "db",
        level: None,
        contains: Some("database"),
    },
];

/// 알려진 프리셋 이름 목록을 반환합니다.
pub fn preset_names() -> Vec<&'static str> {
    PRESETS.iter().map(|p| p.name).collect()
}

/// 프리셋을 필터에 병합합니다.
///
/// 호출자가 채운 필드는 항상 이기고, 프리셋은 비어 있는
/// `level`/`contains`만 채웁니다. 알 수 없는 이름이면 `false`를
/// 반환하고 필터는 그대로 둡니다.
pub fn apply_preset(name: &str, filter: &mut LogFilter) -> bool {
    let Some(preset) = PRESETS.iter().find(|p| p.name == name) else {
        return false;
    };

    if filter.level.as_deref().filter(|s| !s.is_empty()).is_none() {
        filter.level = preset.level.map(str::to_owned);
    }
    if filter.contains.as_deref().filter(|s| !s.is_empty()).is_none() {
        filter.contains = preset.contains.map(str::to_owned);
    }
    true
}
