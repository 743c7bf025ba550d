//! 원인 추론 — 메시지 본문에서 장애 분류/사유/조치 도출
//!
//! PHP 에러 로그에서 관측되는 cURL/네트워크 장애에 특화된 휴리스틱이며,
//! 해당 없는 메시지는 항상 `aplicacao` 버킷으로 떨어집니다. 규칙 기반
//! 엔진이 아니라 고정 패턴 매칭입니다.
//!
//! 사유/조치 문구는 기존 저장 데이터 및 대시보드와의 호환을 위해
//! 포르투갈어 원문을 그대로 유지합니다.

use std::sync::LazyLock;

use regex::Regex;

use loghound_core::types::Cause;

/// `<IPv4> port <숫자>` 패턴
static IP_PORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d{1,3}(?:\.\d{1,3}){3})\s+port\s+(\d+)").unwrap());

/// 본문 끝의 `": <텍스트>"` 조각
static TRAILING_REASON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":\s*([^:]+)$").unwrap());

/// 메시지 본문에서 원인을 추론합니다. 항상 완전한 [`Cause`]를 반환합니다.
///
/// 1. `msg_main` = 첫 번째 `" in "`(대소문자 구분) 앞부분 — PHP가 붙이는
///    파일/라인 꼬리를 떼어내는 휴리스틱.
/// 2. 본문 전체에서 `<IPv4> port <숫자>` 패턴을 탐색.
/// 3. `"curl error"`(대소문자 무시)가 있거나 IP:포트를 찾았으면
///    `network` 분류. IP와 포트가 모두 있으면 `msg_main` 끝의
///    `": <텍스트>"` 조각을 사람이 읽을 사유로 추출(없으면
///    "Erro de conexão").
/// 4. 그 외에는 `aplicacao` 분류.
pub fn infer_cause(rest: &str) -> Cause {
    let msg_main = match rest.find(" in ") {
        Some(idx) => rest[..idx].trim(),
        None => rest,
    };

    let captured = IP_PORT.captures(rest);

    if rest.to_lowercase().contains("curl error") || captured.is_some() {
        if let Some(caps) = captured {
            let ip = &caps[1];
            let port = &caps[2];

            let human_reason = TRAILING_REASON
                .captures(msg_main)
                .map(|c| c[1].trim().to_owned())
                .unwrap_or_else(|| "Erro de conexão".to_owned());

            return Cause {
                group: "network".to_owned(),
                reason: format!("cURL falhou ao conectar em {ip}:{port} ({human_reason})"),
                action: format!(
                    "Verificar serviço/porta {port} em {ip} (controller / backend) ou regras de firewall"
                ),
            };
        }

        return Cause {
            group: "network".to_owned(),
            reason: msg_main.to_owned(),
            action: "Verificar conectividade de rede/serviço referenciado pelo cURL".to_owned(),
        };
    }

    Cause {
        group: "aplicacao".to_owned(),
        reason: msg_main.to_owned(),
        action: "Avaliar stack trace e corrigir causa raiz no código PHP".to_owned(),
    }
}
