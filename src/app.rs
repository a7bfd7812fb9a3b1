use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/login", post(handlers::login))
        .route("/api/members", get(handlers::list_members))
        .route("/api/members/:name/dashboard", get(handlers::get_dashboard))
        .route("/api/members/:name/scores", get(handlers::get_scores))
        .route("/api/members/:name/comparison", get(handlers::get_comparison))
        .route("/api/averages/yearly/:year", get(handlers::get_yearly_average))
        .route("/api/averages/cohort/:cohort", get(handlers::get_cohort_average))
        .route("/api/averages/handicap", get(handlers::get_handicap_average))
        .route("/api/groups", post(handlers::create_groups))
        .with_state(state)
}
