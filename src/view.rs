//! View models for the dashboard.
//!
//! Each projection takes a snapshot of the log and goal and returns plain data.
//! The HTML page and the JSON API both render from these, so a mutation always
//! produces the same four views whichever surface triggered it.

use crate::coerce::display_number;
use crate::models::WorkoutRecord;
use crate::stats::{self, CHART_DAYS, DailyTotal, GoalSummary};
use chrono::NaiveDate;
use serde::Serialize;

pub const EMPTY_TABLE_MESSAGE: &str = "No workouts logged yet";
pub const NO_GOAL_TEXT: &str = "No goal set";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableRow {
    Placeholder {
        message: String,
    },
    Workout {
        date: String,
        workout_type: String,
        duration: String,
        calories: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalLabel {
    pub text: String,
    pub input_value: String,
}

/// Fixed settings for the single-series line chart. The page draws no legend.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ChartConfig {
    pub dataset_label: &'static str,
    pub x_axis_title: &'static str,
    pub y_begin_at_zero: bool,
    pub fill: bool,
}

pub const CHART_CONFIG: ChartConfig = ChartConfig {
    dataset_label: "Calories",
    x_axis_title: "Date",
    y_begin_at_zero: true,
    fill: true,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub table: Vec<TableRow>,
    pub goal: GoalLabel,
    pub chart: ChartData,
    pub summary: String,
}

/// All records, newest date first. An empty log yields the single placeholder row.
pub fn table_rows(records: &[WorkoutRecord]) -> Vec<TableRow> {
    if records.is_empty() {
        return vec![TableRow::Placeholder {
            message: EMPTY_TABLE_MESSAGE.to_string(),
        }];
    }

    let mut sorted: Vec<&WorkoutRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
        .into_iter()
        .map(|record| TableRow::Workout {
            date: record.date.clone(),
            workout_type: record.workout_type.clone(),
            duration: display_number(record.duration),
            calories: display_number(record.calories),
        })
        .collect()
}

pub fn goal_label(goal: Option<f64>) -> GoalLabel {
    match goal {
        Some(goal) => GoalLabel {
            text: format!("{} cal/week", display_number(goal)),
            input_value: display_number(goal),
        },
        None => GoalLabel {
            text: NO_GOAL_TEXT.to_string(),
            input_value: String::new(),
        },
    }
}

/// Chart series with the year dropped from each label.
pub fn chart_data(totals: &[DailyTotal]) -> ChartData {
    ChartData {
        labels: totals
            .iter()
            .map(|day| day.date.get(5..).unwrap_or(day.date.as_str()).to_string())
            .collect(),
        values: totals.iter().map(|day| day.total).collect(),
    }
}

pub fn goal_summary_text(summary: Option<GoalSummary>) -> String {
    match summary {
        Some(GoalSummary { total, goal }) => format!(
            "This week: {}/{} cal",
            display_number(total),
            display_number(goal)
        ),
        None => String::new(),
    }
}

pub fn dashboard(today: NaiveDate, records: &[WorkoutRecord], goal: Option<f64>) -> DashboardView {
    let totals = stats::daily_totals_at(today, records, CHART_DAYS);
    DashboardView {
        table: table_rows(records),
        goal: goal_label(goal),
        chart: chart_data(&totals),
        summary: goal_summary_text(stats::goal_summary_at(today, records, goal)),
    }
}
