use crate::errors::StoreError;
use crate::models::WorkoutRecord;
use crate::storage::{KeyValueStore, WORKOUTS_KEY, get_json, set_json};
use tracing::info;

/// Caller intent for destructive operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Confirmation::Confirmed
        } else {
            Confirmation::Declined
        }
    }
}

/// Ordered workout log, written through to the store on every change.
#[derive(Debug, Clone, Default)]
pub struct WorkoutRepository {
    records: Vec<WorkoutRecord>,
}

impl WorkoutRepository {
    pub fn load(store: &dyn KeyValueStore) -> Self {
        Self {
            records: get_json(store, WORKOUTS_KEY, Vec::new()),
        }
    }

    pub fn add(
        &mut self,
        store: &mut dyn KeyValueStore,
        record: WorkoutRecord,
    ) -> Result<(), StoreError> {
        let mut next = self.records.clone();
        next.push(record);
        set_json(store, WORKOUTS_KEY, &next)?;
        self.records = next;
        info!(count = self.records.len(), "workout added");
        Ok(())
    }

    /// Removes every record. Returns `false` and changes nothing when declined.
    pub fn clear(
        &mut self,
        store: &mut dyn KeyValueStore,
        confirmation: Confirmation,
    ) -> Result<bool, StoreError> {
        if confirmation == Confirmation::Declined {
            info!("clear declined");
            return Ok(false);
        }
        set_json(store, WORKOUTS_KEY, &Vec::<WorkoutRecord>::new())?;
        let removed = self.records.len();
        self.records.clear();
        info!(removed, "workouts cleared");
        Ok(true)
    }

    /// Records in insertion order.
    pub fn all(&self) -> &[WorkoutRecord] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn record(date: &str, workout_type: &str, calories: f64) -> WorkoutRecord {
        WorkoutRecord {
            date: date.to_string(),
            workout_type: workout_type.to_string(),
            duration: 30.0,
            calories,
        }
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: String) -> Result<(), StoreError> {
            Err(std::io::Error::other("disk full").into())
        }
    }

    #[test]
    fn add_is_visible_and_persisted() {
        let mut store = MemoryStore::new();
        let mut repo = WorkoutRepository::load(&store);
        let run = record("2024-01-01", "Run", 300.0);
        repo.add(&mut store, run.clone()).unwrap();
        repo.add(&mut store, run.clone()).unwrap();

        assert_eq!(repo.all(), &[run.clone(), run.clone()]);
        let reloaded = WorkoutRepository::load(&store);
        assert_eq!(reloaded.all(), repo.all());
    }

    #[test]
    fn failed_write_leaves_memory_unchanged() {
        let mut repo = WorkoutRepository::default();
        let result = repo.add(&mut FailingStore, record("2024-01-01", "Run", 300.0));
        assert!(result.is_err());
        assert!(repo.all().is_empty());
    }

    #[test]
    fn clear_requires_confirmation() {
        let mut store = MemoryStore::new();
        let mut repo = WorkoutRepository::load(&store);
        repo.add(&mut store, record("2024-01-02", "Bike", 150.0)).unwrap();

        assert!(!repo.clear(&mut store, Confirmation::Declined).unwrap());
        assert_eq!(repo.all().len(), 1);
        assert_eq!(WorkoutRepository::load(&store).all().len(), 1);

        assert!(repo.clear(&mut store, Confirmation::Confirmed).unwrap());
        assert!(repo.all().is_empty());
        assert!(WorkoutRepository::load(&store).all().is_empty());
        assert_eq!(store.get(WORKOUTS_KEY).as_deref(), Some("[]"));
    }

    #[test]
    fn corrupt_log_loads_empty() {
        let store = MemoryStore::new().with_entry(WORKOUTS_KEY, "{broken");
        assert!(WorkoutRepository::load(&store).all().is_empty());
    }
}
