use relcat_core::manifest::{reconcile, ManifestStore};
use relcat_core::ReleaseRecord;
use std::collections::HashSet;

fn record(date: &str, seq: &str, title: &str) -> ReleaseRecord {
    ReleaseRecord {
        date: date.to_string(),
        seq: seq.to_string(),
        title: title.to_string(),
        desc: String::new(),
    }
}

fn assert_unique_keys(records: &[ReleaseRecord]) {
    let dates = records.iter().map(|r| r.date.as_str()).collect::<HashSet<_>>();
    let seqs = records.iter().map(|r| r.seq.as_str()).collect::<HashSet<_>>();
    assert_eq!(dates.len(), records.len(), "duplicate date in {records:?}");
    assert_eq!(seqs.len(), records.len(), "duplicate seq in {records:?}");
}

#[test]
fn new_record_can_evict_two_different_records() {
    let store = vec![record("20250101", "1", "a"), record("20250102", "2", "b")];
    let result = reconcile(store, record("20250101", "2", "X"));
    assert_eq!(result, vec![record("20250101", "2", "X")]);
}

#[test]
fn newest_date_sorts_first() {
    let store = vec![record("20250101", "1", "a"), record("20250102", "2", "b")];
    let result = reconcile(store, record("20250103", "3", "c"));
    let dates = result.iter().map(|r| r.date.as_str()).collect::<Vec<_>>();
    assert_eq!(dates, vec!["20250103", "20250102", "20250101"]);
}

#[test]
fn republishing_same_release_replaces_it() {
    let store = vec![record("20250101", "1", "old")];
    let result = reconcile(store, record("20250101", "1", "new"));
    assert_eq!(result, vec![record("20250101", "1", "new")]);
}

#[test]
fn keys_stay_unique_across_many_upserts() {
    let inserts = [
        ("20250105", "5"),
        ("20250101", "1"),
        ("20250103", "3"),
        ("20250101", "3"),
        ("20250102", "5"),
        ("20250104", "4"),
        ("20250104", "1"),
        ("20250106", "2"),
        ("20250102", "2"),
    ];
    let mut records = Vec::new();
    for (date, seq) in inserts {
        records = reconcile(records, record(date, seq, "t"));
        assert_unique_keys(&records);
        assert!(records.windows(2).all(|w| w[0].date >= w[1].date));
        assert!(records.iter().any(|r| r.date == date && r.seq == seq));
    }
}

#[test]
fn seq_is_compared_as_string() {
    let store = vec![record("20250101", "06", "legacy")];
    let result = reconcile(store, record("20250102", "6", "new"));
    assert_eq!(result.len(), 2);
}

#[test]
fn absent_manifest_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = ManifestStore::load(dir.path().join("releases").join("manifest.json"));
    assert!(store.records().is_empty());
}

#[test]
fn corrupt_manifest_loads_empty_and_heals_on_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("manifest.json");
    std::fs::write(&path, "{ not json").unwrap();

    let mut store = ManifestStore::load(&path);
    assert!(store.records().is_empty());
    store.upsert(record("20250101", "1", "a"));
    store.save().unwrap();

    let reloaded = ManifestStore::load(&path);
    assert_eq!(reloaded.records(), &[record("20250101", "1", "a")]);
}

#[test]
fn saved_manifest_is_pretty_utf8_array() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("releases").join("manifest.json");

    let mut store = ManifestStore::load(&path);
    store.upsert(record("20250101", "1", "Écho"));
    store.upsert(record("20250102", "2", "Ünïcode — ok"));
    store.save().unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("[\n  {\n    \"date\": \"20250102\""));
    assert!(text.contains("Ünïcode — ok"));
    assert!(!text.contains("\\u"));

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let entries = value.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1]["seq"], "1");
    assert_eq!(entries[1]["desc"], "");
}

#[test]
fn legacy_numeric_seq_is_evicted_by_string_seq() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("manifest.json");
    std::fs::write(
        &path,
        r#"[{"date":"20250101","seq":4,"title":"legacy","desc":"d"}]"#,
    )
    .unwrap();

    let mut store = ManifestStore::load(&path);
    let evicted = store.upsert(record("20250109", "4", "fresh"));
    assert_eq!(evicted.len(), 1);
    assert_eq!(store.records(), &[record("20250109", "4", "fresh")]);
}

#[test]
fn reconcile_collapses_keys_already_duplicated_in_store() {
    let store = vec![
        record("20250101", "1", "a"),
        record("20250101", "2", "b"),
        record("20250102", "2", "c"),
    ];
    let result = reconcile(store, record("20250105", "5", "new"));
    assert_unique_keys(&result);
    assert_eq!(
        result,
        vec![
            record("20250105", "5", "new"),
            record("20250102", "2", "c"),
            record("20250101", "1", "a"),
        ]
    );
}

#[test]
fn duplicated_manifest_entries_are_dropped_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("manifest.json");
    std::fs::write(
        &path,
        r#"[
  {"date":"20250102","seq":"2","title":"kept","desc":""},
  {"date":"20250102","seq":"3","title":"same date","desc":""},
  {"date":"20250101","seq":"2","title":"same seq","desc":""},
  {"date":"20250101","seq":"1","title":"also kept","desc":""}
]"#,
    )
    .unwrap();

    let mut store = ManifestStore::load(&path);
    assert_eq!(
        store.records(),
        &[record("20250102", "2", "kept"), record("20250101", "1", "also kept")]
    );

    let evicted = store.upsert(record("20250103", "3", "fresh"));
    assert!(evicted.is_empty());
    assert_unique_keys(store.records());
}
