//! 스토어 통합 테스트 — 임시 DB에 삽입하고 조회/집계를 검증

use chrono::NaiveDate;
use loghound_core::types::{Cause, Level, LogRecord};
use loghound_store::{LogFilter, LogStore, apply_preset};

fn record(ts: (u32, u32, u32), level: Level, host: &str, source: &str, message: &str) -> LogRecord {
    let (day, hour, min) = ts;
    LogRecord {
        timestamp: NaiveDate::from_ymd_opt(2024, 11, day)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap(),
        source: source.to_owned(),
        level,
        host: host.to_owned(),
        message: message.to_owned(),
        cause: None,
    }
}

fn seeded_store(dir: &tempfile::TempDir) -> LogStore {
    let store = LogStore::open(dir.path().join("logs.db")).unwrap();
    let records = [
        record((25, 9, 0), Level::Info, "host1", "syslog", "service started"),
        record((25, 10, 0), Level::Error, "host1", "syslog", "disk failure"),
        record((26, 11, 0), Level::Error, "host2", "zabbix_server", "disk failure"),
        record((26, 12, 0), Level::Error, "host2", "zabbix_server", "disk failure"),
        record((27, 13, 0), Level::Warning, "host3", "upload:app.log", "slow response"),
        record((27, 14, 0), Level::Error, "host3", "zabbix_server", "failed to send email alert"),
    ];
    for r in &records {
        store.insert_record(r).unwrap();
    }
    store
}

#[test]
fn latest_orders_by_timestamp_desc() {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_store(&dir);

    let rows = store.latest(3).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].message, "failed to send email alert");
    assert_eq!(rows[1].message, "slow response");
    assert!(rows[0].timestamp >= rows[1].timestamp);
}

#[test]
fn count_by_level_orders_by_count_desc() {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_store(&dir);

    let counts = store.count_by_level().unwrap();
    assert_eq!(counts[0], ("ERROR".to_owned(), 4));
    assert!(counts.iter().any(|(l, c)| l == "INFO" && *c == 1));
    assert!(counts.iter().any(|(l, c)| l == "WARNING" && *c == 1));
}

#[test]
fn filter_combines_predicates_with_and() {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_store(&dir);

    let filter = LogFilter {
        level: Some("ERROR".to_owned()),
        host: Some("host2".to_owned()),
        ..Default::default()
    };
    let rows = store.filter_logs(&filter, false, 20).unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.level == "ERROR" && r.host == "host2"));
}

#[test]
fn filter_contains_matches_substring() {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_store(&dir);

    let filter = LogFilter {
        contains: Some("email".to_owned()),
        ..Default::default()
    };
    let rows = store.filter_logs(&filter, false, 20).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].message, "failed to send email alert");
}

#[test]
fn filter_time_bounds_are_inclusive() {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_store(&dir);

    let filter = LogFilter {
        since: Some("2024-11-26 11:00:00".to_owned()),
        until: Some("2024-11-27 13:00:00".to_owned()),
        ..Default::default()
    };
    let rows = store.filter_logs(&filter, true, 20).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].timestamp, "2024-11-26 11:00:00");
    assert_eq!(rows[2].timestamp, "2024-11-27 13:00:00");
}

#[test]
fn filter_asc_flag_reverses_order() {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_store(&dir);

    let asc = store.filter_logs(&LogFilter::default(), true, 20).unwrap();
    let desc = store.filter_logs(&LogFilter::default(), false, 20).unwrap();
    assert_eq!(asc.first().unwrap().timestamp, desc.last().unwrap().timestamp);
}

#[test]
fn filter_with_no_matches_yields_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_store(&dir);

    let filter = LogFilter {
        host: Some("no-such-host".to_owned()),
        ..Default::default()
    };
    assert!(store.filter_logs(&filter, false, 20).unwrap().is_empty());
}

#[test]
fn distinct_hosts_counts_per_host() {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_store(&dir);

    let hosts = store.distinct_hosts(&LogFilter::default(), 20).unwrap();
    assert_eq!(hosts.len(), 3);
    // host2와 host3가 2건씩, host1도 2건 — 개수 내림차순 정렬 확인만
    assert!(hosts[0].1 >= hosts[1].1);
    assert!(hosts[1].1 >= hosts[2].1);
}

#[test]
fn top_messages_ranks_by_frequency() {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_store(&dir);

    let top = store.top_messages(&LogFilter::default(), 1).unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0], (3, "disk failure".to_owned()));
}

#[test]
fn top_messages_level_defaults_to_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_store(&dir);

    // WARNING 레코드("slow response")는 기본 ERROR 필터에 걸리지 않는다.
    let top = store.top_messages(&LogFilter::default(), 20).unwrap();
    assert!(top.iter().all(|(_, msg)| msg != "slow response"));

    let filter = LogFilter {
        level: Some("WARNING".to_owned()),
        ..Default::default()
    };
    let top = store.top_messages(&filter, 20).unwrap();
    assert_eq!(top[0].1, "slow response");
}

#[test]
fn preset_merges_into_store_query() {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_store(&dir);

    let mut filter = LogFilter::default();
    assert!(apply_preset("email", &mut filter));
    let rows = store.filter_logs(&filter, false, 20).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].message, "failed to send email alert");
}

#[test]
fn summary_counts_and_bounds() {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_store(&dir);

    let summary = store.summary().unwrap();
    assert_eq!(summary.total, 6);
    assert_eq!(summary.errors, 4);
    assert_eq!(summary.warnings, 1);
    assert_eq!(summary.first_ts.as_deref(), Some("2024-11-25 09:00:00"));
    assert_eq!(summary.last_ts.as_deref(), Some("2024-11-27 14:00:00"));
}

#[test]
fn summary_on_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = LogStore::open(dir.path().join("empty.db")).unwrap();

    let summary = store.summary().unwrap();
    assert_eq!(summary.total, 0);
    assert!(summary.first_ts.is_none());
    assert!(summary.last_ts.is_none());
}

#[test]
fn latest_detailed_includes_id_and_cause() {
    let dir = tempfile::tempdir().unwrap();
    let store = LogStore::open(dir.path().join("logs.db")).unwrap();

    let mut with_cause = record((27, 15, 0), Level::Warning, "host1", "upload:php.log", "curl down");
    with_cause.cause = Some(Cause {
        group: "network".to_owned(),
        reason: "refused".to_owned(),
        action: "check firewall".to_owned(),
    });
    store.insert_record(&with_cause).unwrap();
    store
        .insert_record(&record((27, 16, 0), Level::Info, "host1", "syslog", "ok"))
        .unwrap();

    let rows = store.latest_detailed(10, 0, None).unwrap();
    assert_eq!(rows.len(), 2);
    // id 내림차순: 마지막 삽입이 먼저
    assert!(rows[0].id > rows[1].id);
    assert!(rows[0].cause_group.is_none());
    assert_eq!(rows[1].cause_group.as_deref(), Some("network"));
    assert_eq!(rows[1].cause_reason.as_deref(), Some("refused"));
}

#[test]
fn latest_detailed_pagination_and_level_filter() {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_store(&dir);

    let page1 = store.latest_detailed(2, 0, Some("ERROR")).unwrap();
    let page2 = store.latest_detailed(2, 2, Some("ERROR")).unwrap();
    assert_eq!(page1.len(), 2);
    assert_eq!(page2.len(), 2);
    assert!(page1[1].id > page2[0].id);
    assert!(page1.iter().chain(&page2).all(|r| r.level == "ERROR"));
}
