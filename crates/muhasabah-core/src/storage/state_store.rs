//! Persisted state layout.
//!
//! The profile and the four daily collections are stored independently
//! under fixed keys, each wrapped in a versioned envelope:
//!
//! ```text
//! muhasabah_profile        { "schema_version": 2, "data": { ...Profile } }
//! muhasabah_exercises      { "schema_version": 2, "data": [ ...Exercise ] }
//! muhasabah_salah          { "schema_version": 2, "data": [ ...Salah ] }
//! muhasabah_knowledge      { "schema_version": 2, "data": [ ...KnowledgeQuest ] }
//! muhasabah_study_minutes  { "schema_version": 2, "data": 40 }
//! ```
//!
//! A payload without an envelope is schema version 1 and is migrated on
//! read. Loading never fails: missing or unreadable records fall back to
//! the seed, and individual profile fields that are absent or ill-typed are
//! filled from the seed profile.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::Path;

use super::Database;
use crate::engine::StateSink;
use crate::error::StorageError;
use crate::goals::{DailyGoals, Exercise, KnowledgeQuest, Salah};
use crate::profile::Profile;
use crate::settlement::HISTORY_LEN;
use crate::state::HabitState;

pub const PROFILE_KEY: &str = "muhasabah_profile";
pub const EXERCISES_KEY: &str = "muhasabah_exercises";
pub const SALAH_KEY: &str = "muhasabah_salah";
pub const KNOWLEDGE_KEY: &str = "muhasabah_knowledge";
pub const STUDY_MINUTES_KEY: &str = "muhasabah_study_minutes";

/// Current envelope version.
pub const SCHEMA_VERSION: u64 = 2;

/// What happened while loading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records that were missing or unreadable and came from the seed.
    pub seeded: Vec<&'static str>,
    /// Profile fields filled from the seed.
    pub backfilled: Vec<String>,
    /// Records read with an older schema version and migrated.
    pub migrated: Vec<&'static str>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.seeded.is_empty() && self.backfilled.is_empty()
    }
}

fn envelope(data: Value) -> Value {
    serde_json::json!({ "schema_version": SCHEMA_VERSION, "data": data })
}

/// Split a stored payload into `(version, data)`. Bare payloads are v1.
fn open_envelope(raw: &str) -> Option<(u64, Value)> {
    let value: Value = serde_json::from_str(raw).ok()?;
    if let Value::Object(obj) = &value {
        if let (Some(version), Some(data)) =
            (obj.get("schema_version").and_then(Value::as_u64), obj.get("data"))
        {
            return Some((version, data.clone()));
        }
    }
    Some((1, value))
}

fn rename_key(obj: &mut Map<String, Value>, from: &str, to: &str) {
    if let Some(v) = obj.remove(from) {
        obj.entry(to.to_string()).or_insert(v);
    }
}

/// v1 stored a `completed` flag next to progress; v2 derives completion and
/// only remembers whether the reward was paid.
fn migrate_completed_flag(item: &mut Value) {
    if let Value::Object(obj) = item {
        rename_key(obj, "completed", "rewardClaimed");
    }
}

fn migrate_profile_v1(data: &mut Value) {
    let Value::Object(obj) = data else {
        return;
    };
    rename_key(obj, "physicalLevel", "level");
    obj.remove("dailyCompletionRate");
    if let Some(Value::Array(tasks)) = obj.get_mut("customTasks") {
        for task in tasks {
            migrate_completed_flag(task);
            if let Value::Object(t) = task {
                rename_key(t, "trackingType", "trackingMode");
            }
        }
    }
}

fn migrate_items_v1(data: &mut Value) {
    if let Value::Array(items) = data {
        items.iter_mut().for_each(migrate_completed_flag);
    }
}

fn profile_accepts(candidate: &Map<String, Value>) -> bool {
    serde_json::from_value::<Profile>(Value::Object(candidate.clone())).is_ok()
}

/// Build a profile from stored data, field by field.
///
/// A stored field is kept only if the profile still deserializes with it in
/// place; list fields are filtered element by element. Everything else
/// comes from `seed`. Returns the names of the fields that were filled.
pub fn profile_from_value(data: &Value, seed: &Profile) -> (Profile, Vec<String>) {
    let Ok(Value::Object(seed_map)) = serde_json::to_value(seed) else {
        return (seed.clone(), Vec::new());
    };
    let empty = Map::new();
    let loaded = data.as_object().unwrap_or(&empty);

    let mut merged = seed_map.clone();
    let mut backfilled = Vec::new();

    for key in seed_map.keys() {
        let Some(candidate) = loaded.get(key) else {
            backfilled.push(key.clone());
            continue;
        };

        if let Value::Array(items) = candidate {
            let kept: Vec<Value> = items
                .iter()
                .filter(|item| {
                    let mut trial = merged.clone();
                    trial.insert(key.clone(), Value::Array(vec![(*item).clone()]));
                    profile_accepts(&trial)
                })
                .cloned()
                .collect();
            if kept.len() != items.len() {
                backfilled.push(format!("{key}[{}]", items.len() - kept.len()));
            }
            merged.insert(key.clone(), Value::Array(kept));
            continue;
        }

        let mut trial = merged.clone();
        trial.insert(key.clone(), candidate.clone());
        if profile_accepts(&trial) {
            merged = trial;
        } else {
            backfilled.push(key.clone());
        }
    }

    let mut profile: Profile =
        serde_json::from_value(Value::Object(merged)).unwrap_or_else(|_| seed.clone());

    profile.ledger.normalize();
    profile.weekly_history.truncate(HISTORY_LEN);
    for task in &mut profile.custom_tasks {
        task.target = task.target.max(1);
        task.current = task.current.min(task.target);
    }

    (profile, backfilled)
}

/// Overlay stored items onto the seed by identifier. Unknown ids are
/// dropped, missing ids keep their seed value.
fn merge_by_id<T, K, F, M>(data: &Value, seed: Vec<T>, key: F, merge: M) -> Vec<T>
where
    T: DeserializeOwned,
    K: PartialEq,
    F: Fn(&T) -> K,
    M: Fn(T, T) -> T,
{
    let stored: Vec<T> = match data {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .collect(),
        _ => Vec::new(),
    };
    let mut stored: Vec<Option<T>> = stored.into_iter().map(Some).collect();

    seed.into_iter()
        .map(|seeded| {
            let slot = stored
                .iter_mut()
                .find(|s| matches!(s, Some(found) if key(found) == key(&seeded)));
            match slot.and_then(Option::take) {
                Some(found) => merge(seeded, found),
                None => seeded,
            }
        })
        .collect()
}

fn goals_from_values(
    exercises: Option<&Value>,
    salah: Option<&Value>,
    knowledge: Option<&Value>,
    study_minutes: Option<&Value>,
) -> DailyGoals {
    let null = Value::Null;
    DailyGoals {
        exercises: merge_by_id(
            exercises.unwrap_or(&null),
            Exercise::seeds(),
            |e: &Exercise| e.id,
            |seed, found| Exercise {
                base_target: if found.base_target > 0 {
                    found.base_target
                } else {
                    seed.base_target
                },
                ..found
            },
        ),
        salah: merge_by_id(salah.unwrap_or(&null), Salah::seeds(), |s: &Salah| s.id, |_, found| found),
        knowledge: merge_by_id(
            knowledge.unwrap_or(&null),
            KnowledgeQuest::seeds(),
            |k: &KnowledgeQuest| k.id.clone(),
            |seed, found| KnowledgeQuest {
                current_minutes: found.current_minutes.min(seed.target_minutes),
                reward_claimed: found.reward_claimed,
                ..seed
            },
        ),
        study_minutes: study_minutes
            .and_then(Value::as_u64)
            .map(|m| u32::try_from(m).unwrap_or(u32::MAX))
            .unwrap_or(0),
    }
}

/// Reads and writes [`HabitState`] through the kv table.
pub struct StateStore {
    db: Database,
}

impl StateStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Open the store in the default data directory.
    pub fn open() -> Result<Self, StorageError> {
        Ok(Self::new(Database::open()?))
    }

    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        Ok(Self::new(Database::open_at(path)?))
    }

    pub fn in_memory() -> Result<Self, StorageError> {
        Ok(Self::new(Database::open_memory()?))
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Read one record. Read errors and corrupt payloads count as missing.
    fn read(&self, key: &'static str, report: &mut LoadReport) -> Option<Value> {
        let raw = match self.db.kv_get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                report.seeded.push(key);
                return None;
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read stored record");
                report.seeded.push(key);
                return None;
            }
        };
        let Some((version, mut data)) = open_envelope(&raw) else {
            tracing::warn!(key, "stored record is not valid JSON, using seed");
            report.seeded.push(key);
            return None;
        };

        if version < SCHEMA_VERSION {
            match key {
                PROFILE_KEY => migrate_profile_v1(&mut data),
                EXERCISES_KEY | KNOWLEDGE_KEY => migrate_items_v1(&mut data),
                _ => {}
            }
            report.migrated.push(key);
        } else if version > SCHEMA_VERSION {
            tracing::warn!(key, version, "record written by a newer schema, reading what we can");
        }
        Some(data)
    }

    /// Load the full state, falling back to seeds wherever needed.
    pub fn load_with_report(&self, now: DateTime<Utc>) -> (HabitState, LoadReport) {
        let mut report = LoadReport::default();
        let seed = Profile::seed(now);

        let profile = match self.read(PROFILE_KEY, &mut report) {
            Some(data) => {
                let (profile, backfilled) = profile_from_value(&data, &seed);
                report.backfilled = backfilled;
                profile
            }
            None => seed,
        };

        let exercises = self.read(EXERCISES_KEY, &mut report);
        let salah = self.read(SALAH_KEY, &mut report);
        let knowledge = self.read(KNOWLEDGE_KEY, &mut report);
        let study = self.read(STUDY_MINUTES_KEY, &mut report);
        let goals = goals_from_values(
            exercises.as_ref(),
            salah.as_ref(),
            knowledge.as_ref(),
            study.as_ref(),
        );

        let mut state = HabitState { profile, goals };
        state.clamp_exercise_progress();

        if !report.backfilled.is_empty() {
            tracing::warn!(fields = ?report.backfilled, "profile fields filled from seed");
        }
        (state, report)
    }

    pub fn load(&self, now: DateTime<Utc>) -> HabitState {
        self.load_with_report(now).0
    }

    /// Write all five records in a single transaction.
    pub fn save(&self, state: &HabitState) -> Result<(), StorageError> {
        fn encode<T: serde::Serialize>(key: &str, value: &T) -> Result<String, StorageError> {
            let data = serde_json::to_value(value).map_err(|source| StorageError::Encode {
                key: key.to_string(),
                source,
            })?;
            Ok(envelope(data).to_string())
        }

        self.db.kv_set_many(&[
            (PROFILE_KEY, encode(PROFILE_KEY, &state.profile)?),
            (EXERCISES_KEY, encode(EXERCISES_KEY, &state.goals.exercises)?),
            (SALAH_KEY, encode(SALAH_KEY, &state.goals.salah)?),
            (KNOWLEDGE_KEY, encode(KNOWLEDGE_KEY, &state.goals.knowledge)?),
            (STUDY_MINUTES_KEY, encode(STUDY_MINUTES_KEY, &state.goals.study_minutes)?),
        ])
    }
}

impl StateSink for StateStore {
    fn persist(&self, state: &HabitState) -> Result<(), StorageError> {
        self.save(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::{ExerciseId, SalahId};
    use crate::progression::INITIAL_NEXT_LEVEL_EXP;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 10, 9, 30, 0).unwrap()
    }

    #[test]
    fn empty_store_yields_seed() {
        let store = StateStore::in_memory().unwrap();
        let (state, report) = store.load_with_report(now());
        assert_eq!(state, HabitState::seed(now()));
        assert_eq!(report.seeded.len(), 5);
    }

    #[test]
    fn save_then_load_preserves_state() {
        let store = StateStore::in_memory().unwrap();
        let mut state = HabitState::seed(now());
        state.update_exercise_progress(ExerciseId::Squats, 12, now()).unwrap();
        state.toggle_salah(SalahId::Maghrib, now()).unwrap();
        state.add_study_minutes(30, now()).unwrap();
        state.profile.streak = 3;
        store.save(&state).unwrap();

        let (loaded, report) = store.load_with_report(now());
        assert!(report.is_clean());
        assert_eq!(loaded, state);
    }

    #[test]
    fn missing_profile_fields_are_backfilled() {
        let store = StateStore::in_memory().unwrap();
        store
            .database()
            .kv_set(
                PROFILE_KEY,
                r#"{"schema_version":2,"data":{"level":4,"exp":12,"nextLevelExp":172,"streak":"seven"}}"#,
            )
            .unwrap();

        let (state, report) = store.load_with_report(now());
        assert_eq!(state.profile.level(), 4);
        assert_eq!(state.profile.ledger.exp, 12);
        assert_eq!(state.profile.streak, 0);
        assert!(state.profile.sound_enabled);
        assert!(report.backfilled.contains(&"streak".to_string()));
        assert!(report.backfilled.contains(&"soundEnabled".to_string()));
        assert!(!report.backfilled.contains(&"level".to_string()));
    }

    #[test]
    fn corrupt_payload_falls_back_to_seed() {
        let store = StateStore::in_memory().unwrap();
        store.database().kv_set(PROFILE_KEY, "{not json").unwrap();
        store.database().kv_set(STUDY_MINUTES_KEY, "\"lots\"").unwrap();

        let (state, report) = store.load_with_report(now());
        assert_eq!(state.profile, Profile::seed(now()));
        assert_eq!(state.goals.study_minutes, 0);
        assert!(report.seeded.contains(&PROFILE_KEY));
    }

    #[test]
    fn bad_list_entries_are_dropped_individually() {
        let seed = Profile::seed(now());
        let data = serde_json::json!({
            "customTasks": [
                {"id": "a", "title": "Walk", "category": "Physical", "trackingMode": "minutes",
                 "target": 20, "current": 5, "unit": "min", "expReward": 5},
                {"id": "b", "title": "Broken", "category": "Cosmic"}
            ]
        });
        let (profile, backfilled) = profile_from_value(&data, &seed);
        assert_eq!(profile.custom_tasks.len(), 1);
        assert_eq!(profile.custom_tasks[0].id, "a");
        assert!(backfilled.contains(&"customTasks[1]".to_string()));
    }

    #[test]
    fn v1_payloads_are_migrated() {
        let store = StateStore::in_memory().unwrap();
        store
            .database()
            .kv_set(
                PROFILE_KEY,
                r#"{"name":"Old","physicalLevel":3,"exp":10,"nextLevelExp":144,"dailyCompletionRate":40}"#,
            )
            .unwrap();
        store
            .database()
            .kv_set(
                EXERCISES_KEY,
                r#"[{"id":"pushups","baseTarget":20,"currentProgress":30,"completed":true}]"#,
            )
            .unwrap();

        let (state, report) = store.load_with_report(now());
        assert_eq!(state.profile.name, "Old");
        assert_eq!(state.profile.level(), 3);
        let pushups = state.goals.exercise(ExerciseId::Pushups).unwrap();
        assert!(pushups.reward_claimed);
        assert_eq!(pushups.current_progress, 30);
        assert_eq!(state.goals.exercises.len(), 4);
        assert!(report.migrated.contains(&PROFILE_KEY));
        assert!(report.migrated.contains(&EXERCISES_KEY));
    }

    #[test]
    fn tampered_ledger_loads_in_bounded_time() {
        let store = StateStore::in_memory().unwrap();
        store
            .database()
            .kv_set(
                PROFILE_KEY,
                r#"{"schema_version":2,"data":{"level":1,"exp":18446744073709551615,"nextLevelExp":4}}"#,
            )
            .unwrap();

        let state = store.load(now());
        let ledger = state.profile.ledger;
        assert!(ledger.level > 1 && ledger.level < 300);
        assert!(ledger.next_level_exp >= INITIAL_NEXT_LEVEL_EXP);
        assert!(ledger.exp < ledger.next_level_exp);
    }

    #[test]
    fn stored_progress_is_clamped_to_target() {
        let store = StateStore::in_memory().unwrap();
        store
            .database()
            .kv_set(
                EXERCISES_KEY,
                r#"{"schema_version":2,"data":[{"id":"squats","baseTarget":30,"currentProgress":900}]}"#,
            )
            .unwrap();
        let state = store.load(now());
        assert_eq!(state.goals.exercise(ExerciseId::Squats).unwrap().current_progress, 30);
    }
}
