use crate::coerce::{self, nan_when_null, number_from_json, to_number};
use crate::errors::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One logged session. Records have no id; duplicates are independent entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub date: String,
    #[serde(rename = "type")]
    pub workout_type: String,
    #[serde(default = "coerce::nan", deserialize_with = "nan_when_null")]
    pub duration: f64,
    #[serde(default = "coerce::nan", deserialize_with = "nan_when_null")]
    pub calories: f64,
}

impl PartialEq for WorkoutRecord {
    // NaN fields compare equal so stored records round-trip as equal.
    fn eq(&self, other: &Self) -> bool {
        fn same(a: f64, b: f64) -> bool {
            a == b || (a.is_nan() && b.is_nan())
        }
        self.date == other.date
            && self.workout_type == other.workout_type
            && same(self.duration, other.duration)
            && same(self.calories, other.calories)
    }
}

/// Already-coerced input for a new record.
#[derive(Debug, Clone)]
pub struct NewWorkout {
    pub date: String,
    pub workout_type: String,
    pub duration: f64,
    pub calories: f64,
}

impl NewWorkout {
    /// Requires a date and a non-blank type; numbers pass through untouched, NaN included.
    pub fn validate(self) -> Result<WorkoutRecord, ValidationError> {
        let date = self.date.trim().to_string();
        if date.is_empty() {
            return Err(ValidationError::MissingDate);
        }
        let workout_type = self.workout_type.trim().to_string();
        if workout_type.is_empty() {
            return Err(ValidationError::MissingType);
        }
        Ok(WorkoutRecord {
            date,
            workout_type,
            duration: self.duration,
            calories: self.calories,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct WorkoutForm {
    #[serde(default)]
    pub date: String,
    #[serde(default, rename = "type")]
    pub workout_type: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub calories: String,
}

impl From<WorkoutForm> for NewWorkout {
    fn from(form: WorkoutForm) -> Self {
        Self {
            duration: to_number(&form.duration),
            calories: to_number(&form.calories),
            date: form.date,
            workout_type: form.workout_type,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct WorkoutRequest {
    #[serde(default)]
    pub date: String,
    #[serde(default, rename = "type")]
    pub workout_type: String,
    #[serde(default)]
    pub duration: Value,
    #[serde(default)]
    pub calories: Value,
}

impl From<WorkoutRequest> for NewWorkout {
    fn from(request: WorkoutRequest) -> Self {
        Self {
            duration: number_from_json(&request.duration),
            calories: number_from_json(&request.calories),
            date: request.date,
            workout_type: request.workout_type,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GoalForm {
    #[serde(default)]
    pub goal: String,
}

#[derive(Debug, Deserialize)]
pub struct GoalRequest {
    #[serde(default)]
    pub goal: Value,
}

#[derive(Debug, Deserialize)]
pub struct ClearForm {
    pub confirm: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ClearRequest {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Deserialize)]
pub struct DailyTotalsQuery {
    pub days: Option<i64>,
}
