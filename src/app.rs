use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/workouts", post(handlers::submit_workout_form))
        .route("/goal", post(handlers::submit_goal_form))
        .route("/clear", post(handlers::submit_clear_form))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route(
            "/api/workouts",
            get(handlers::get_workouts).post(handlers::add_workout),
        )
        .route("/api/daily-totals", get(handlers::get_daily_totals))
        .route("/api/goal", post(handlers::set_goal))
        .route("/api/clear", post(handlers::clear))
        .with_state(state)
}
