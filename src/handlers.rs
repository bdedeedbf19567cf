use crate::coerce::{number_from_json, to_number};
use crate::errors::AppError;
use crate::models::{
    ClearForm, ClearRequest, DailyTotalsQuery, GoalForm, GoalRequest, NewWorkout, WorkoutForm,
    WorkoutRecord, WorkoutRequest,
};
use crate::repository::Confirmation;
use crate::state::AppState;
use crate::stats::{self, CHART_DAYS, DailyTotal, MAX_WINDOW_DAYS};
use crate::ui::render_index;
use crate::view::DashboardView;
use axum::{
    Form, Json,
    extract::{Query, State},
    response::{Html, Redirect},
};

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let tracker = state.tracker.lock().await;
    let view = tracker.dashboard_at(stats::today());
    Ok(Html(render_index(&view).map_err(AppError::internal)?))
}

pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardView> {
    let tracker = state.tracker.lock().await;
    Json(tracker.dashboard_at(stats::today()))
}

pub async fn get_workouts(State(state): State<AppState>) -> Json<Vec<WorkoutRecord>> {
    let tracker = state.tracker.lock().await;
    Json(tracker.workouts().to_vec())
}

pub async fn get_daily_totals(
    State(state): State<AppState>,
    Query(query): Query<DailyTotalsQuery>,
) -> Result<Json<Vec<DailyTotal>>, AppError> {
    let days = window_days(query.days)?;
    let tracker = state.tracker.lock().await;
    Ok(Json(stats::daily_totals(tracker.workouts(), days)))
}

pub async fn add_workout(
    State(state): State<AppState>,
    Json(payload): Json<WorkoutRequest>,
) -> Result<Json<DashboardView>, AppError> {
    apply_workout(&state, payload.into()).await.map(Json)
}

pub async fn set_goal(
    State(state): State<AppState>,
    Json(payload): Json<GoalRequest>,
) -> Result<Json<DashboardView>, AppError> {
    apply_goal(&state, number_from_json(&payload.goal)).await.map(Json)
}

pub async fn clear(
    State(state): State<AppState>,
    Json(payload): Json<ClearRequest>,
) -> Result<Json<DashboardView>, AppError> {
    apply_clear(&state, payload.confirm.into()).await.map(Json)
}

pub async fn submit_workout_form(
    State(state): State<AppState>,
    Form(form): Form<WorkoutForm>,
) -> Result<Redirect, AppError> {
    apply_workout(&state, form.into()).await?;
    Ok(Redirect::to("/"))
}

pub async fn submit_goal_form(
    State(state): State<AppState>,
    Form(form): Form<GoalForm>,
) -> Result<Redirect, AppError> {
    apply_goal(&state, to_number(&form.goal)).await?;
    Ok(Redirect::to("/"))
}

pub async fn submit_clear_form(
    State(state): State<AppState>,
    Form(form): Form<ClearForm>,
) -> Result<Redirect, AppError> {
    apply_clear(&state, form_confirmation(form.confirm.as_deref())).await?;
    Ok(Redirect::to("/"))
}

async fn apply_workout(state: &AppState, input: NewWorkout) -> Result<DashboardView, AppError> {
    let mut tracker = state.tracker.lock().await;
    tracker.add_workout(input)?;
    Ok(tracker.dashboard_at(stats::today()))
}

async fn apply_goal(state: &AppState, value: f64) -> Result<DashboardView, AppError> {
    let mut tracker = state.tracker.lock().await;
    tracker.set_goal(value)?;
    Ok(tracker.dashboard_at(stats::today()))
}

async fn apply_clear(
    state: &AppState,
    confirmation: Confirmation,
) -> Result<DashboardView, AppError> {
    let mut tracker = state.tracker.lock().await;
    tracker.clear_workouts(confirmation)?;
    Ok(tracker.dashboard_at(stats::today()))
}

/// A form clears only when its `confirm` field says `yes` or `true`.
fn form_confirmation(confirm: Option<&str>) -> Confirmation {
    matches!(confirm.map(str::trim), Some("yes") | Some("true")).into()
}

fn window_days(requested: Option<i64>) -> Result<usize, AppError> {
    let Some(days) = requested else {
        return Ok(CHART_DAYS);
    };
    if days <= 0 {
        return Ok(0);
    }
    let days = usize::try_from(days).unwrap_or(usize::MAX);
    if days > MAX_WINDOW_DAYS {
        return Err(AppError::bad_request(format!(
            "days must be at most {MAX_WINDOW_DAYS}"
        )));
    }
    Ok(days)
}
