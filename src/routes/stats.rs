//! Cross-habit statistics handlers.
//!
//! | Method | Path               | Handler             |
//! |--------|--------------------|---------------------|
//! | GET    | /api/stats/summary | `get_summary`       |
//! | GET    | /api/stats/weekly  | `get_weekly_stats`  |
//! | GET    | /api/stats/monthly | `get_monthly_stats` |
//!
//! All three aggregate over active habits only. The summary window is the
//! Monday-anchored week containing today; `/weekly` uses the Jan-1-anchored
//! window from the engine.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Datelike, Local, NaiveDate};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{db, error::AppError, routes::AppState, services::streaks};

/// `GET /api/stats/summary` — streak plus current-week and current-month
/// totals for every active habit.
pub async fn get_summary(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let habits = db::list_active_habits(&state.pool).await?;
    let today = Local::now().date_naive();
    let (week_start, week_end) = streaks::current_week_bounds(today);

    let mut summary = Vec::with_capacity(habits.len());
    for habit in habits {
        let dates = db::list_completion_dates(&state.pool, habit.id).await?;
        summary.push(json!({
            "id": habit.id,
            "name": habit.name,
            "frequency": habit.frequency,
            "category_name": habit.category_name,
            "current_streak": streaks::calculate_streak(habit.frequency, &dates, today),
            "weekly_total": streaks::count_in_window(&dates, week_start, week_end),
            "monthly_total": streaks::monthly_total(&dates, today.year(), today.month()),
        }));
    }

    Ok(Json(json!({
        "date": today,
        "habits": summary,
    })))
}

#[derive(Debug, Default, Deserialize)]
pub struct WeeklyParams {
    pub year: Option<i32>,
    pub week: Option<u32>,
}

/// `GET /api/stats/weekly` — per-habit totals and completion dates for one
/// Jan-1-anchored week window.
pub async fn get_weekly_stats(
    State(state): State<AppState>,
    Query(params): Query<WeeklyParams>,
) -> Result<Json<Value>, AppError> {
    let today = Local::now().date_naive();
    let year = params.year.unwrap_or_else(|| today.year());
    let week = params.week.unwrap_or_else(|| today.iso_week().week());

    let (week_start, week_end) = streaks::week_bounds(year, week)
        .ok_or_else(|| AppError::BadRequest("Invalid year".to_string()))?;

    let habits = db::list_active_habits(&state.pool).await?;
    let mut results = Vec::with_capacity(habits.len());
    for habit in habits {
        let dates = db::list_completion_dates(&state.pool, habit.id).await?;
        let in_window: Vec<NaiveDate> = dates
            .into_iter()
            .filter(|&d| d >= week_start && d <= week_end)
            .collect();
        results.push(json!({
            "habit_id": habit.id,
            "habit_name": habit.name,
            "frequency": habit.frequency,
            "total_completions": in_window.len(),
            "completion_dates": in_window,
        }));
    }

    Ok(Json(json!({
        "year": year,
        "week": week,
        "week_start": week_start,
        "week_end": week_end,
        "habits": results,
    })))
}

#[derive(Debug, Default, Deserialize)]
pub struct MonthlyParams {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// `GET /api/stats/monthly` — per-habit totals and completion dates for one
/// calendar month.
pub async fn get_monthly_stats(
    State(state): State<AppState>,
    Query(params): Query<MonthlyParams>,
) -> Result<Json<Value>, AppError> {
    let today = Local::now().date_naive();
    let year = params.year.unwrap_or_else(|| today.year());
    let month = params.month.unwrap_or_else(|| today.month());

    let habits = db::list_active_habits(&state.pool).await?;
    let mut results = Vec::with_capacity(habits.len());
    for habit in habits {
        let dates = db::list_completion_dates(&state.pool, habit.id).await?;
        let in_month: Vec<NaiveDate> = dates
            .into_iter()
            .filter(|d| d.year() == year && d.month() == month)
            .collect();
        results.push(json!({
            "habit_id": habit.id,
            "habit_name": habit.name,
            "frequency": habit.frequency,
            "total_completions": in_month.len(),
            "completion_dates": in_month,
        }));
    }

    Ok(Json(json!({
        "year": year,
        "month": month,
        "habits": results,
    })))
}
