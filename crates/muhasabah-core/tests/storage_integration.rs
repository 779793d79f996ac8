//! Integration tests for the engine writing through to an on-disk store.

use chrono::{Duration, Utc};
use muhasabah_core::storage::state_store::{PROFILE_KEY, SALAH_KEY};
use muhasabah_core::{Engine, ExerciseId, HabitState, SalahId, StateStore, Theme};

#[test]
fn test_engine_changes_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("muhasabah.db");

    {
        let store = StateStore::open_at(&path).unwrap();
        let state = store.load(Utc::now());
        let mut engine = Engine::new(state).with_sink(store);
        engine.update_exercise_progress(ExerciseId::Plank, 45);
        engine.toggle_salah(SalahId::Asr);
        engine.set_theme(Theme::Violet);
        engine.add_reflection("Grateful", "gratitude");
    }

    let store = StateStore::open_at(&path).unwrap();
    let (state, report) = store.load_with_report(Utc::now());
    assert!(report.is_clean());
    assert_eq!(
        state.goals.exercise(ExerciseId::Plank).unwrap().current_progress,
        45
    );
    assert_eq!(state.goals.salah_completed(), 1);
    assert_eq!(state.profile.theme, Theme::Violet);
    assert_eq!(state.profile.reflections.len(), 1);
    // 5 for the prayer, 5 for the reflection.
    assert_eq!(state.profile.ledger.exp, 10);
}

#[test]
fn test_settlement_after_reopen_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("muhasabah.db");
    let yesterday = Utc::now() - Duration::days(1);

    {
        let store = StateStore::open_at(&path).unwrap();
        let mut state = HabitState::seed(yesterday);
        state.toggle_salah(SalahId::Fajr, yesterday).unwrap();
        store.save(&state).unwrap();
    }

    {
        let store = StateStore::open_at(&path).unwrap();
        let state = store.load(Utc::now());
        let mut engine = Engine::new(state).with_sink(store);
        let events = engine.settle_if_due(&Utc::now());
        assert_eq!(events.len(), 1);
    }

    let store = StateStore::open_at(&path).unwrap();
    let state = store.load(Utc::now());
    assert_eq!(state.goals.salah_completed(), 0);
    assert_eq!(state.profile.weekly_history.len(), 1);
    assert_eq!(state.profile.weekly_history[0].spiritual_completions, 1);
    assert!(state.profile.penalty_debt.has_any());
}

#[test]
fn test_corrupt_record_only_affects_itself() {
    let store = StateStore::in_memory().unwrap();
    let mut state = HabitState::seed(Utc::now());
    state.profile.name = "Yusuf".to_string();
    state.toggle_salah(SalahId::Dhuhr, Utc::now()).unwrap();
    store.save(&state).unwrap();

    store.database().kv_set(SALAH_KEY, "[[[").unwrap();
    let (loaded, report) = store.load_with_report(Utc::now());
    assert_eq!(loaded.profile.name, "Yusuf");
    assert_eq!(loaded.goals.salah_completed(), 0);
    assert_eq!(report.seeded, vec![SALAH_KEY]);
    assert!(!report.seeded.contains(&PROFILE_KEY));
}

#[test]
fn test_records_are_enveloped() {
    let store = StateStore::in_memory().unwrap();
    store.save(&HabitState::seed(Utc::now())).unwrap();
    let raw = store.database().kv_get(PROFILE_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["schema_version"], 2);
    assert_eq!(value["data"]["name"], "Servant");
}
