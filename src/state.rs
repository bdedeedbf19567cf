use crate::errors::AppError;
use crate::goal::GoalSetting;
use crate::models::{NewWorkout, WorkoutRecord};
use crate::repository::{Confirmation, WorkoutRepository};
use crate::storage::KeyValueStore;
use crate::view::{self, DashboardView};
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Application state: the store plus the in-memory log and goal read from it at startup.
/// Rendering reads only the in-memory copies.
pub struct Tracker {
    store: Box<dyn KeyValueStore>,
    workouts: WorkoutRepository,
    goal: GoalSetting,
}

impl Tracker {
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let workouts = WorkoutRepository::load(store.as_ref());
        let goal = GoalSetting::load(store.as_ref());
        Self {
            store,
            workouts,
            goal,
        }
    }

    pub fn add_workout(&mut self, input: NewWorkout) -> Result<(), AppError> {
        let record = input.validate()?;
        self.workouts.add(self.store.as_mut(), record)?;
        Ok(())
    }

    pub fn set_goal(&mut self, value: f64) -> Result<(), AppError> {
        self.goal.set_goal(self.store.as_mut(), value)?;
        Ok(())
    }

    pub fn clear_workouts(&mut self, confirmation: Confirmation) -> Result<bool, AppError> {
        Ok(self.workouts.clear(self.store.as_mut(), confirmation)?)
    }

    pub fn workouts(&self) -> &[WorkoutRecord] {
        self.workouts.all()
    }

    pub fn goal(&self) -> Option<f64> {
        self.goal.get_goal()
    }

    pub fn dashboard_at(&self, today: NaiveDate) -> DashboardView {
        view::dashboard(today, self.workouts(), self.goal())
    }
}

#[derive(Clone)]
pub struct AppState {
    pub tracker: Arc<Mutex<Tracker>>,
}

impl AppState {
    pub fn new(tracker: Tracker) -> Self {
        Self {
            tracker: Arc::new(Mutex::new(tracker)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{GOAL_KEY, MemoryStore, WORKOUTS_KEY};

    fn run(date: &str, calories: f64) -> NewWorkout {
        NewWorkout {
            date: date.to_string(),
            workout_type: "Run".to_string(),
            duration: 30.0,
            calories,
        }
    }

    #[test]
    fn loads_existing_state_from_store() {
        let store = MemoryStore::new()
            .with_entry(
                WORKOUTS_KEY,
                r#"[{"date":"2024-01-01","type":"Run","duration":30,"calories":300}]"#,
            )
            .with_entry(GOAL_KEY, "900");
        let tracker = Tracker::load(Box::new(store));
        assert_eq!(tracker.workouts().len(), 1);
        assert_eq!(tracker.workouts()[0].calories, 300.0);
        assert_eq!(tracker.goal(), Some(900.0));
    }

    #[test]
    fn invalid_input_is_rejected_before_storing() {
        let mut tracker = Tracker::load(Box::new(MemoryStore::new()));
        let mut input = run("2024-01-01", 100.0);
        input.workout_type = " ".to_string();
        let err = tracker.add_workout(input).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
        assert!(tracker.workouts().is_empty());
    }

    #[test]
    fn every_mutation_is_reflected_in_the_dashboard() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut tracker = Tracker::load(Box::new(MemoryStore::new()));

        tracker.add_workout(run("2024-01-01", 300.0)).unwrap();
        tracker.add_workout(run("2024-01-01", 150.0)).unwrap();
        tracker.set_goal(500.0).unwrap();
        let view = tracker.dashboard_at(today);
        assert_eq!(view.chart.values.last(), Some(&450.0));
        assert_eq!(view.summary, "This week: 450/500 cal");

        assert!(!tracker.clear_workouts(Confirmation::Declined).unwrap());
        assert_eq!(tracker.workouts().len(), 2);

        assert!(tracker.clear_workouts(Confirmation::Confirmed).unwrap());
        let view = tracker.dashboard_at(today);
        assert_eq!(view.table.len(), 1);
        assert_eq!(view.summary, "This week: 0/500 cal");
    }
}
