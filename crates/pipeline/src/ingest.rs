//! 수집 오케스트레이터 — 파일을 파서 체인에 통과시켜 싱크에 기록
//!
//! 한 파일의 수집은 엄격한 순차 라인 단위 패스입니다. 공백 라인은
//! 건너뛰고, 수락된 라인 하나가 곧 즉시 커밋되는 삽입 하나입니다.
//! 라인 단위 실패는 패스를 중단시키지 않습니다 — 수집을 중단시키는
//! 것은 입력 파일 부재와 싱크 장애뿐입니다.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use tracing::{debug, info};

use loghound_core::pipeline::{ParseOptions, RecordSink};

use crate::error::PipelineError;
use crate::parser::{GenericParser, ParserChain, PhpErrorParser, SyslogParser, ZabbixKind, ZabbixParser};
use crate::sniffer::is_probably_log;

/// 수집 오케스트레이터
///
/// [`RecordSink`]을 빌려 레코드를 기록하고, 기록한 레코드 수를
/// 반환합니다.
pub struct Ingestor<'a, S: RecordSink> {
    sink: &'a mut S,
    opts: ParseOptions,
    sniff_max_bytes: usize,
}

impl<'a, S: RecordSink> Ingestor<'a, S> {
    /// 새 오케스트레이터를 생성합니다.
    pub fn new(sink: &'a mut S, opts: ParseOptions, sniff_max_bytes: usize) -> Self {
        Self {
            sink,
            opts,
            sniff_max_bytes,
        }
    }

    /// syslog 파일을 수집합니다. 형식 불일치 라인은 건너뜁니다.
    pub fn ingest_syslog(&mut self, path: impl AsRef<Path>) -> Result<u64, PipelineError> {
        let chain = ParserChain::new().register(Box::new(SyslogParser::new()));
        self.ingest_with_chain(path.as_ref(), &chain)
    }

    /// zabbix_server.log를 수집합니다. 어떤 비공백 라인도 버려지지
    /// 않습니다(raw 강등).
    pub fn ingest_zabbix_server(&mut self, path: impl AsRef<Path>) -> Result<u64, PipelineError> {
        let chain = ParserChain::new().register(Box::new(ZabbixParser::new(ZabbixKind::Server)));
        self.ingest_with_chain(path.as_ref(), &chain)
    }

    /// zabbix_proxy.log를 수집합니다.
    pub fn ingest_zabbix_proxy(&mut self, path: impl AsRef<Path>) -> Result<u64, PipelineError> {
        let chain = ParserChain::new().register(Box::new(ZabbixParser::new(ZabbixKind::Proxy)));
        self.ingest_with_chain(path.as_ref(), &chain)
    }

    /// 임의의 업로드 텍스트 파일을 수집합니다.
    ///
    /// 접두 스니핑이 게이트입니다: 로그로 판별되지 않으면
    /// [`PipelineError::NotALogFile`]이고 아무것도 쓰지 않습니다.
    /// 통과하면 PHP 파서 → 범용 파서 순의 체인이
    /// `upload:<파일명>` source 태그로 라인을 처리합니다.
    pub fn ingest_upload(&mut self, path: impl AsRef<Path>) -> Result<u64, PipelineError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PipelineError::InputNotFound {
                path: path.display().to_string(),
            });
        }

        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_owned());

        // 접두만 읽어 판별하고, 본 수집은 파일을 다시 연다.
        let mut prefix = Vec::new();
        File::open(path)?
            .take(self.sniff_max_bytes as u64)
            .read_to_end(&mut prefix)?;

        if !is_probably_log(&prefix, Some(&filename)) {
            return Err(PipelineError::NotALogFile {
                path: path.display().to_string(),
            });
        }

        let source = format!("upload:{filename}");
        let chain = ParserChain::new()
            .register(Box::new(PhpErrorParser::new(source.clone())))
            .register(Box::new(GenericParser::new(source)));
        self.ingest_with_chain(path, &chain)
    }

    /// 공통 수집 루프: 라인 읽기 → 공백 건너뛰기 → 체인 → 싱크.
    fn ingest_with_chain(&mut self, path: &Path, chain: &ParserChain) -> Result<u64, PipelineError> {
        if !path.exists() {
            return Err(PipelineError::InputNotFound {
                path: path.display().to_string(),
            });
        }

        let mut reader = BufReader::new(File::open(path)?);
        let mut count = 0u64;
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let read = reader.read_until(b'\n', &mut buf)?;
            if read == 0 {
                break;
            }

            // 잘못된 UTF-8 시퀀스는 버리고 계속 진행
            let line: String = String::from_utf8_lossy(&buf)
                .chars()
                .filter(|&c| c != '\u{FFFD}')
                .collect();
            let line = line.trim_end_matches(['\n', '\r']);
            if line.trim().is_empty() {
                continue;
            }

            if let Some(record) = chain.parse(line, &self.opts) {
                self.sink
                    .insert(&record)
                    .map_err(|e| PipelineError::Sink(e.to_string()))?;
                count += 1;
            } else {
                debug!(line, "no parser claimed line, skipping");
            }
        }

        info!(path = %path.display(), records = count, "ingestion pass finished");
        Ok(count)
    }
}
