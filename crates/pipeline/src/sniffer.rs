//! 형식 감지 — 바이트 접두로 텍스트 로그 여부 판별
//!
//! 업로드 수집 경로의 게이트입니다. 최대 8192바이트 접두 스냅샷만 보고
//! 판단하는 순수 함수라서 같은 접두에 몇 번을 불러도 결과가 같습니다.

use regex::Regex;

/// 접두에서 제어문자/비ASCII가 이 비율을 넘으면 바이너리로 간주
const BINARY_RATIO_LIMIT: f64 = 0.15;

/// 점수를 매기는 최대 라인 수
const MAX_SCORED_LINES: usize = 20;

/// 바이트 접두가 텍스트 로그처럼 보이는지 판별합니다.
///
/// 판별 기준:
/// 1. 빈 입력은 거부.
/// 2. 제어문자(0x00–0x08) 또는 0x7E 초과 바이트가 15%를 넘으면 거부.
/// 3. 관대하게 디코딩(잘못된 시퀀스는 버림)한 뒤 비어있지 않은 라인이
///    하나도 없으면 거부.
/// 4. 처음 20개 비공백 라인에 점수를 매김: 길이 15자 이상이고
///    (타임스탬프 모양 — PHP 브래킷, ISO, BSD syslog — 로 시작하거나
///    ERROR/WARN(ING)/INFO/CRITICAL/NOTICE/EXCEPTION 토큰을 포함) 하면
///    1점.
/// 5. 점수 라인 2개 이상, 또는 비율 0.3 이상, 또는 (확장자가
///    .log/.txt/.out/.err 이고 점수 라인 1개 이상)이면 수락.
pub fn is_probably_log(prefix: &[u8], filename: Option<&str>) -> bool {
    if prefix.is_empty() {
        return false;
    }

    let non_text = prefix.iter().filter(|&&b| b <= 0x08 || b > 0x7E).count();
    if non_text as f64 / prefix.len() as f64 > BINARY_RATIO_LIMIT {
        return false;
    }

    // 잘못된 UTF-8 시퀀스는 대체문자로 바뀌므로 제거
    let text: String = String::from_utf8_lossy(prefix)
        .chars()
        .filter(|&c| c != '\u{FFFD}')
        .collect();

    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|ln| !ln.is_empty())
        .collect();
    if lines.is_empty() {
        return false;
    }

    let php_ts = Regex::new(r"^\[\d{2}-[A-Za-z]{3}-\d{4}\s+\d{2}:\d{2}:\d{2}\s+[^\]]+\]")
        .unwrap();
    let iso_ts = Regex::new(r"^\d{4}-\d{2}-\d{2}[ T]\d{2}:\d{2}:\d{2}").unwrap();
    let syslog_ts = Regex::new(r"^[A-Z][a-z]{2}\s+[ 0-9]{1,2}\s+\d{2}:\d{2}:\d{2}").unwrap();
    let level_keywords =
        Regex::new(r"(?i)\b(ERROR|WARN(ING)?|INFO|CRITICAL|NOTICE|EXCEPTION)\b").unwrap();

    let mut scored = 0usize;
    for ln in lines.iter().take(MAX_SCORED_LINES) {
        if ln.chars().count() < 15 {
            continue;
        }

        let has_ts = php_ts.is_match(ln) || iso_ts.is_match(ln) || syslog_ts.is_match(ln);
        let has_level = level_keywords.is_match(ln);

        if has_ts || has_level {
            scored += 1;
        }
    }

    let considered = lines.len().min(MAX_SCORED_LINES);
    if scored >= 2 {
        return true;
    }
    if scored as f64 / considered as f64 >= 0.3 {
        return true;
    }

    if let Some(name) = filename {
        let lower = name.to_lowercase();
        let known_ext = [".log", ".txt", ".out", ".err"]
            .iter()
            .any(|ext| lower.ends_with(ext));
        if known_ext && scored >= 1 {
            return true;
        }
    }

    false
}
