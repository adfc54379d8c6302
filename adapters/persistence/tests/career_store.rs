use std::{fs, path::PathBuf};

use bastion_core::SessionSummary;
use bastion_persistence::{Achievement, CareerRecord, CareerStore, PersistenceError};
use serde_json::json;

fn scratch_dir(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "bastion-persistence-{}-{test}",
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

#[test]
fn missing_file_loads_as_none() {
    let dir = scratch_dir("missing");
    let store = CareerStore::new(dir.join("career.json"));

    assert!(store.load().expect("load").is_none());
    store.clear().expect("clearing a missing file");
}

#[test]
fn saved_record_round_trips_with_settings() {
    let dir = scratch_dir("round-trip");
    let store = CareerStore::new(dir.join("nested").join("career.json"));

    let mut record = CareerRecord::default();
    let _ = record.settings.insert("tick_ms".to_owned(), json!(16));
    let _ = record.record_session(&SessionSummary {
        final_score: 320,
        final_wave: 3,
        enemies_defeated: 17,
    });
    store.save(&mut record).expect("save");
    assert!(record.saved_at_ms > 0);

    let loaded = store.load().expect("load").expect("record present");
    assert_eq!(loaded, record);
    assert!(!store.path().with_extension("json.tmp").exists());
}

#[test]
fn sessions_accumulate_across_saves() {
    let dir = scratch_dir("accumulate");
    let store = CareerStore::new(dir.join("career.json"));

    let (_, unlocked) = store
        .record_session(&SessionSummary {
            final_score: 90,
            final_wave: 2,
            enemies_defeated: 9,
        })
        .expect("first session");
    assert_eq!(unlocked, vec![Achievement::FirstBlood]);

    let (record, unlocked) = store
        .record_session(&SessionSummary {
            final_score: 1_500,
            final_wave: 7,
            enemies_defeated: 95,
        })
        .expect("second session");
    assert_eq!(
        unlocked,
        vec![
            Achievement::Survivor,
            Achievement::Centurion,
            Achievement::HighRoller,
        ]
    );
    assert_eq!(record.total_games_played, 2);
    assert_eq!(record.total_enemies_defeated, 104);
    assert_eq!(store.load().expect("load"), Some(record));

    store.clear().expect("clear");
    assert!(store.load().expect("load").is_none());
}

#[test]
fn malformed_file_is_reported() {
    let dir = scratch_dir("malformed");
    let path = dir.join("career.json");
    fs::write(&path, "{\"high_score\": \"lots\"}").expect("write");

    let error = CareerStore::new(&path).load().unwrap_err();
    assert!(matches!(error, PersistenceError::Malformed { .. }), "{error}");
}

#[test]
fn sparse_file_fills_defaults() {
    let dir = scratch_dir("sparse");
    let path = dir.join("career.json");
    fs::write(&path, "{\"high_score\": 12, \"saved_at_ms\": 1}").expect("write");

    let record = CareerStore::new(&path)
        .load()
        .expect("load")
        .expect("record present");
    assert_eq!(record.high_score, 12);
    assert_eq!(record.highest_wave, 1);
    assert!(record.achievements.is_empty());
}
