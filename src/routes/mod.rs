//! HTTP layer: route handlers and the application router.
//!
//! Handlers validate the request, call into `db`, and for habit reads feed
//! the completion dates through `services::streaks` to populate the derived
//! fields.
//!
//! - `categories`: category CRUD
//! - `habits`: habit CRUD plus per-habit streak and stats
//! - `completions`: completion log CRUD
//! - `stats`: cross-habit summary and weekly/monthly reports
//! - `health`: liveness probe

pub mod categories;
pub mod completions;
pub mod habits;
pub mod health;
pub mod stats;

use axum::{
    routing::{delete, get},
    Router,
};
use sqlx::SqlitePool;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
}

/// Builds the full application router; also used directly by the
/// integration tests.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/categories/{id}",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        .route("/habits", get(habits::list_habits).post(habits::create_habit))
        .route(
            "/habits/{id}",
            get(habits::get_habit)
                .put(habits::update_habit)
                .delete(habits::delete_habit),
        )
        .route("/habits/{id}/streak", get(habits::get_streak))
        .route("/habits/{id}/stats", get(habits::get_habit_stats))
        .route(
            "/habits/{id}/completions",
            get(completions::list_completions).post(completions::create_completion),
        )
        .route("/completions/{id}", delete(completions::delete_completion))
        .route("/stats/summary", get(stats::get_summary))
        .route("/stats/weekly", get(stats::get_weekly_stats))
        .route("/stats/monthly", get(stats::get_monthly_stats))
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .route("/health", get(health::health_check))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
