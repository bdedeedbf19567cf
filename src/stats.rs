use crate::coerce::calories_or_zero;
use crate::models::WorkoutRecord;
use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

pub const CHART_DAYS: usize = 14;
pub const MAX_WINDOW_DAYS: usize = 3660;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotal {
    pub date: String,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalSummary {
    pub total: f64,
    pub goal: f64,
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn daily_totals(records: &[WorkoutRecord], days: usize) -> Vec<DailyTotal> {
    daily_totals_at(today(), records, days)
}

/// Calorie totals for the `days` calendar days ending at `today`, oldest first.
/// Records are matched on their exact date key; anything outside the window is ignored.
pub fn daily_totals_at(today: NaiveDate, records: &[WorkoutRecord], days: usize) -> Vec<DailyTotal> {
    let mut totals = Vec::with_capacity(days);
    for offset in (0..days).rev() {
        let date = today - Duration::days(offset as i64);
        totals.push(DailyTotal {
            date: date_key(date),
            total: 0.0,
        });
    }

    let index: HashMap<String, usize> = totals
        .iter()
        .enumerate()
        .map(|(position, day)| (day.date.clone(), position))
        .collect();
    for record in records {
        if let Some(&position) = index.get(&record.date) {
            totals[position].total += calories_or_zero(record.calories);
        }
    }
    totals
}

/// Most recent Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// Calories logged from this week's Sunday through `today`, inclusive.
/// Records whose date does not parse as a calendar date are skipped.
pub fn week_to_date_total_at(today: NaiveDate, records: &[WorkoutRecord]) -> f64 {
    let start = week_start(today);
    records
        .iter()
        .filter_map(|record| {
            let date = NaiveDate::parse_from_str(&record.date, "%Y-%m-%d").ok()?;
            (start <= date && date <= today).then(|| calories_or_zero(record.calories))
        })
        .sum()
}

/// Week-to-date total against the goal, or `None` when no goal is set.
pub fn goal_summary_at(
    today: NaiveDate,
    records: &[WorkoutRecord],
    goal: Option<f64>,
) -> Option<GoalSummary> {
    let goal = goal?;
    Some(GoalSummary {
        total: week_to_date_total_at(today, records),
        goal,
    })
}

fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, calories: f64) -> WorkoutRecord {
        WorkoutRecord {
            date: date.to_string(),
            workout_type: "Run".to_string(),
            duration: 30.0,
            calories,
        }
    }

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn same_day_records_sum() {
        let records = vec![record("2024-01-01", 300.0), record("2024-01-01", 150.0)];
        let totals = daily_totals_at(ymd(2024, 1, 1), &records, 1);
        assert_eq!(
            totals,
            vec![DailyTotal {
                date: "2024-01-01".to_string(),
                total: 450.0
            }]
        );
    }

    #[test]
    fn window_has_consecutive_increasing_days() {
        let today = ymd(2024, 3, 2);
        for days in [1, 7, 14, 60] {
            let totals = daily_totals_at(today, &[], days);
            assert_eq!(totals.len(), days);
            assert_eq!(totals.last().unwrap().date, "2024-03-02");
            for pair in totals.windows(2) {
                let a = NaiveDate::parse_from_str(&pair[0].date, "%Y-%m-%d").unwrap();
                let b = NaiveDate::parse_from_str(&pair[1].date, "%Y-%m-%d").unwrap();
                assert_eq!(b - a, Duration::days(1));
            }
            assert!(totals.iter().all(|day| day.total == 0.0));
        }
        // crosses the leap day
        let window = daily_totals_at(today, &[], 3);
        assert_eq!(window[0].date, "2024-02-29");
    }

    #[test]
    fn zero_days_is_empty() {
        assert!(daily_totals_at(ymd(2024, 1, 1), &[record("2024-01-01", 10.0)], 0).is_empty());
    }

    #[test]
    fn window_total_matches_records_inside_window() {
        let today = ymd(2024, 1, 14);
        let records = vec![
            record("2024-01-14", 100.0),
            record("2024-01-01", 40.0),
            record("2023-12-31", 999.0),
            record("2024-01-15", 999.0),
            record("2024-01-07", 25.5),
            record("2024-01-07", f64::NAN),
            record("not a date", 999.0),
        ];
        let totals = daily_totals_at(today, &records, 14);
        let window: Vec<&str> = totals.iter().map(|day| day.date.as_str()).collect();
        let expected: f64 = records
            .iter()
            .filter(|r| window.contains(&r.date.as_str()))
            .map(|r| calories_or_zero(r.calories))
            .sum();
        let actual: f64 = totals.iter().map(|day| day.total).sum();
        assert_eq!(actual, expected);
        assert_eq!(actual, 165.5);
    }

    #[test]
    fn week_starts_on_sunday() {
        assert_eq!(week_start(ymd(2024, 1, 6)), ymd(2023, 12, 31));
        assert_eq!(week_start(ymd(2023, 12, 31)), ymd(2023, 12, 31));
        assert_eq!(week_start(ymd(2024, 1, 1)), ymd(2023, 12, 31));
    }

    #[test]
    fn week_to_date_sums_sunday_through_today() {
        let saturday = ymd(2024, 1, 6);
        let calories = [100.0, 0.0, 0.0, 200.0, 0.0, 0.0, 50.0];
        let mut records: Vec<WorkoutRecord> = calories
            .iter()
            .enumerate()
            .map(|(offset, &cal)| {
                let date = ymd(2023, 12, 31) + Duration::days(offset as i64);
                record(&date_key(date), cal)
            })
            .collect();
        records.push(record("2023-12-30", 500.0));
        records.push(record("2024-01-07", 500.0));

        assert_eq!(week_to_date_total_at(saturday, &records), 350.0);
        let summary = goal_summary_at(saturday, &records, Some(2000.0)).unwrap();
        assert_eq!(summary, GoalSummary { total: 350.0, goal: 2000.0 });
    }

    #[test]
    fn no_goal_means_no_summary() {
        assert_eq!(goal_summary_at(ymd(2024, 1, 6), &[record("2024-01-06", 50.0)], None), None);
    }
}
