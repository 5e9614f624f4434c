use std::{collections::HashMap, sync::Mutex};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::booster::{Booster, BoosterSettings};

/// Fixed key the custom booster log is stored under.
const CUSTOM_BOOSTERS_KEY: &str = "customPastBoosters";

/// Retained entries; anything older is evicted.
const MAX_STORED_BOOSTERS: usize = 20;

/// Minimal key-value persistence boundary. The engine only ever reads and
/// writes whole values under fixed keys, so swapping the backing store out
/// never touches generation code.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}

/// Process-lifetime store backing the server.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value);
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

/// One generated custom booster as kept in the history log.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoredBooster {
    pub id: String,
    pub timestamp: i64,
    pub settings: BoosterSettings,
    pub booster: Booster,
}

/// Capped log of recently generated custom boosters, newest first.
pub struct BoosterHistory {
    store: Box<dyn KeyValueStore>,
}

impl BoosterHistory {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn save(&self, settings: &BoosterSettings, booster: &Booster) -> StoredBooster {
        let now = Utc::now().timestamp_millis();
        let entry = StoredBooster {
            id: format!("custom-{now}-{}", Uuid::new_v4().simple()),
            timestamp: now,
            settings: settings.clone(),
            booster: booster.clone(),
        };

        let mut entries = self.list();
        entries.insert(0, entry.clone());
        entries.truncate(MAX_STORED_BOOSTERS);
        self.write(&entries);

        entry
    }

    pub fn list(&self) -> Vec<StoredBooster> {
        self.store
            .get(CUSTOM_BOOSTERS_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    pub fn delete(&self, id: &str) {
        let mut entries = self.list();
        entries.retain(|entry| entry.id != id);
        self.write(&entries);
    }

    pub fn clear(&self) {
        self.store.remove(CUSTOM_BOOSTERS_KEY);
    }

    fn write(&self, entries: &[StoredBooster]) {
        match serde_json::to_string(entries) {
            Ok(raw) => self.store.set(CUSTOM_BOOSTERS_KEY, raw),
            Err(e) => tracing::error!("Failed to encode booster history: {e}"),
        }
    }
}

#[cfg(test)]
mod test {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::booster::generate_custom_booster;

    fn history() -> BoosterHistory {
        BoosterHistory::new(Box::new(MemoryStore::default()))
    }

    fn save_sample(history: &BoosterHistory, commons: u32) -> StoredBooster {
        let settings = BoosterSettings {
            commons,
            ..Default::default()
        };
        let booster = generate_custom_booster(&settings, &mut StdRng::seed_from_u64(commons.into()));
        history.save(&settings, &booster)
    }

    #[test]
    fn test_log_caps_at_twenty_evicting_oldest() {
        let history = history();
        let mut ids = Vec::new();
        for i in 0..25 {
            ids.push(save_sample(&history, i).id);
        }

        let stored = history.list();
        assert_eq!(stored.len(), 20);
        assert_eq!(stored[0].id, ids[24]);
        assert!(ids[..5]
            .iter()
            .all(|id| stored.iter().all(|entry| &entry.id != id)));
    }

    #[test]
    fn test_entries_round_trip_through_the_store() {
        let history = history();
        let saved = save_sample(&history, 7);

        let stored = history.list();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, saved.id);
        assert_eq!(stored[0].settings.commons, 7);
        assert_eq!(stored[0].booster, saved.booster);
    }

    #[test]
    fn test_delete_by_id() {
        let history = history();
        save_sample(&history, 1);
        let target = save_sample(&history, 2);
        save_sample(&history, 3);

        history.delete(&target.id);
        let stored = history.list();
        assert_eq!(stored.len(), 2);
        assert!(stored.iter().all(|entry| entry.id != target.id));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let history = history();
        history.clear();

        save_sample(&history, 1);
        save_sample(&history, 2);
        history.clear();
        assert!(history.list().is_empty());
        history.clear();
        assert!(history.list().is_empty());
    }
}
