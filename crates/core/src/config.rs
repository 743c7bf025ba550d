//! 설정 관리 — loghound.toml 파싱 및 런타임 설정
//!
//! [`LoghoundConfig`]는 모든 모듈의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`LOGHOUND_STORAGE_DB_PATH=/tmp/logs.db` 형식)
//! 3. 설정 파일 (`loghound.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), loghound_core::error::LoghoundError> {
//! use loghound_core::config::LoghoundConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = LoghoundConfig::load("loghound.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = LoghoundConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, LoghoundError};

/// Loghound 통합 설정
///
/// `loghound.toml` 파일의 최상위 구조를 나타냅니다.
/// 각 모듈은 자기 섹션만 읽어 사용합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoghoundConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 스토리지 설정
    #[serde(default)]
    pub storage: StorageConfig,
    /// 수집(ingest) 설정
    #[serde(default)]
    pub ingest: IngestConfig,
}

impl LoghoundConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    ///
    /// 설정 로딩 순서:
    /// 1. TOML 파일 파싱
    /// 2. 환경변수 오버라이드 적용
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, LoghoundError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, LoghoundError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LoghoundError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                LoghoundError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, LoghoundError> {
        toml::from_str(toml_str).map_err(|e| {
            LoghoundError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `LOGHOUND_{SECTION}_{FIELD}`
    /// 예: `LOGHOUND_STORAGE_DB_PATH=/tmp/logs.db`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "LOGHOUND_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "LOGHOUND_GENERAL_LOG_FORMAT");
        override_string(&mut self.general.data_dir, "LOGHOUND_GENERAL_DATA_DIR");

        // Storage
        override_string(&mut self.storage.db_path, "LOGHOUND_STORAGE_DB_PATH");

        // Ingest
        override_string(
            &mut self.ingest.default_host,
            "LOGHOUND_INGEST_DEFAULT_HOST",
        );
        override_usize(
            &mut self.ingest.sniff_max_bytes,
            "LOGHOUND_INGEST_SNIFF_MAX_BYTES",
        );
        override_opt_i32(&mut self.ingest.year_hint, "LOGHOUND_INGEST_YEAR_HINT");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), LoghoundError> {
        // log_level 검증
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        // log_format 검증
        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        // db_path 검증
        if self.storage.db_path.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "storage.db_path".to_owned(),
                reason: "db_path must not be empty".to_owned(),
            }
            .into());
        }

        // sniff_max_bytes 검증
        if self.ingest.sniff_max_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "ingest.sniff_max_bytes".to_owned(),
                reason: "sniff_max_bytes must be greater than zero".to_owned(),
            }
            .into());
        }

        Ok(())
    }
}

// Default는 derive 매크로로 자동 생성 (각 필드가 Default를 구현하므로)

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
    /// 데이터 디렉토리
    pub data_dir: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
            data_dir: "./data".to_owned(),
        }
    }
}

/// 스토리지 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite 데이터베이스 파일 경로
    pub db_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: "./data/loghound.db".to_owned(),
        }
    }
}

/// 수집(ingest) 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// 호스트 필드가 없는 라인에 쓸 기본 호스트 별칭
    pub default_host: String,
    /// 로그 파일 판별에 읽는 최대 접두 바이트 수
    pub sniff_max_bytes: usize,
    /// 연도가 없는 타임스탬프(syslog)에 적용할 연도 (없으면 현재 연도)
    pub year_hint: Option<i32>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            default_host: "unknown".to_owned(),
            sniff_max_bytes: 8192,
            year_hint: None,
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<usize>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}

fn override_opt_i32(target: &mut Option<i32>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<i32>() {
            Ok(parsed) => *target = Some(parsed),
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse i32 from env var, ignoring"
            ),
        }
    }
}
