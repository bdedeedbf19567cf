use crate::errors::StoreError;
use crate::storage::{GOAL_KEY, KeyValueStore, get_json, set_json};
use tracing::info;

/// Weekly calorie target. `None` means no goal is set.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GoalSetting {
    goal: Option<f64>,
}

impl GoalSetting {
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let stored: Option<f64> = get_json(store, GOAL_KEY, None);
        Self {
            goal: stored.and_then(normalize),
        }
    }

    /// Stores `value` as the goal, or clears it when the value is not a positive number.
    pub fn set_goal(&mut self, store: &mut dyn KeyValueStore, value: f64) -> Result<(), StoreError> {
        let goal = normalize(value);
        set_json(store, GOAL_KEY, &goal)?;
        self.goal = goal;
        match goal {
            Some(goal) => info!(goal, "weekly goal set"),
            None => info!("weekly goal cleared"),
        }
        Ok(())
    }

    pub fn get_goal(&self) -> Option<f64> {
        self.goal
    }
}

// Infinity cannot be stored as a JSON number, so it is treated as unset.
fn normalize(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn positive_goal_is_kept_and_persisted() {
        let mut store = MemoryStore::new();
        let mut goal = GoalSetting::load(&store);
        assert_eq!(goal.get_goal(), None);

        goal.set_goal(&mut store, 500.0).unwrap();
        assert_eq!(goal.get_goal(), Some(500.0));
        assert_eq!(GoalSetting::load(&store).get_goal(), Some(500.0));
    }

    #[test]
    fn non_positive_or_non_numeric_goal_is_unset() {
        let mut store = MemoryStore::new();
        let mut goal = GoalSetting::default();
        for value in [0.0, -20.0, f64::NAN, f64::INFINITY] {
            goal.set_goal(&mut store, 500.0).unwrap();
            goal.set_goal(&mut store, value).unwrap();
            assert_eq!(goal.get_goal(), None, "value {value}");
            assert_eq!(store.get(GOAL_KEY).as_deref(), Some("null"));
        }
    }

    #[test]
    fn stored_negative_goal_loads_as_unset() {
        let store = MemoryStore::new().with_entry(GOAL_KEY, "-5");
        assert_eq!(GoalSetting::load(&store).get_goal(), None);
    }

    #[test]
    fn corrupt_goal_loads_as_unset() {
        let store = MemoryStore::new().with_entry(GOAL_KEY, "\"lots\"");
        assert_eq!(GoalSetting::load(&store).get_goal(), None);
    }
}
