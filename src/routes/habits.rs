//! Habit API handlers.
//!
//! | Method | Path                    | Handler           |
//! |--------|-------------------------|-------------------|
//! | GET    | /api/habits             | `list_habits`     |
//! | POST   | /api/habits             | `create_habit`    |
//! | GET    | /api/habits/{id}        | `get_habit`       |
//! | PUT    | /api/habits/{id}        | `update_habit`    |
//! | DELETE | /api/habits/{id}        | `delete_habit`    |
//! | GET    | /api/habits/{id}/streak | `get_streak`      |
//! | GET    | /api/habits/{id}/stats  | `get_habit_stats` |
//!
//! Every habit read response carries `current_streak`, computed by the
//! streak engine from the habit's completion dates and today's date.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Datelike, Local};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    db,
    error::AppError,
    models::{
        CreateHabitRequest, Frequency, Habit, HabitFilters, HabitPatch, HabitResponse, NewHabit,
        UpdateHabitRequest,
    },
    routes::AppState,
    services::streaks,
};

const INVALID_FREQUENCY: &str = "Frequency must be \"daily\" or \"weekly\"";

/// Computes the derived streak field for one habit.
async fn with_streak(state: &AppState, habit: Habit) -> Result<HabitResponse, AppError> {
    let dates = db::list_completion_dates(&state.pool, habit.id).await?;
    let streak = streaks::calculate_streak(habit.frequency, &dates, Local::now().date_naive());
    Ok(habit.with_streak(streak))
}

pub async fn list_habits(
    State(state): State<AppState>,
    Query(filters): Query<HabitFilters>,
) -> Result<Json<Vec<HabitResponse>>, AppError> {
    let habits = db::list_habits(&state.pool, &filters).await?;

    let mut responses = Vec::with_capacity(habits.len());
    for habit in habits {
        responses.push(with_streak(&state, habit).await?);
    }
    Ok(Json(responses))
}

pub async fn get_habit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<HabitResponse>, AppError> {
    let habit = db::get_habit(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(with_streak(&state, habit).await?))
}

pub async fn create_habit(
    State(state): State<AppState>,
    Json(payload): Json<CreateHabitRequest>,
) -> Result<(StatusCode, Json<HabitResponse>), AppError> {
    let name = payload
        .name
        .ok_or_else(|| AppError::BadRequest("Name is required".to_string()))?;
    let frequency = payload
        .frequency
        .as_deref()
        .and_then(Frequency::parse)
        .ok_or_else(|| AppError::BadRequest(INVALID_FREQUENCY.to_string()))?;

    let habit = db::create_habit(
        &state.pool,
        &NewHabit {
            name,
            description: payload.description,
            frequency,
            category_id: payload.category_id,
        },
    )
    .await?;

    // A brand-new habit has no completions yet.
    Ok((StatusCode::CREATED, Json(habit.with_streak(0))))
}

pub async fn update_habit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateHabitRequest>,
) -> Result<Json<HabitResponse>, AppError> {
    db::get_habit(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;

    if payload.is_empty() {
        return Err(AppError::BadRequest("No data provided".to_string()));
    }

    let frequency = match payload.frequency.as_deref() {
        Some(value) => Some(
            Frequency::parse(value)
                .ok_or_else(|| AppError::BadRequest(INVALID_FREQUENCY.to_string()))?,
        ),
        None => None,
    };

    let patch = HabitPatch {
        name: payload.name,
        description: payload.description,
        frequency,
        category_id: payload.category_id,
        is_active: payload.is_active,
    };

    let habit = db::update_habit(&state.pool, id, &patch)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(with_streak(&state, habit).await?))
}

pub async fn delete_habit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let deleted = db::delete_habit(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::NotFound);
    }
    Ok(Json(json!({ "message": "Habit deleted successfully" })))
}

/// `GET /api/habits/{id}/streak` — just the streak, without the rest of the
/// habit body.
pub async fn get_streak(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let habit = db::get_habit(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;

    let dates = db::list_completion_dates(&state.pool, id).await?;
    let streak = streaks::calculate_streak(habit.frequency, &dates, Local::now().date_naive());

    Ok(Json(json!({
        "habit_id": id,
        "habit_name": habit.name,
        "current_streak": streak,
        "frequency": habit.frequency,
    })))
}

/// Query string of `GET /api/habits/{id}/stats`; absent parts default to
/// today's year/month/ISO week.
#[derive(Debug, Default, Deserialize)]
pub struct StatsParams {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub week: Option<u32>,
}

pub async fn get_habit_stats(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<StatsParams>,
) -> Result<Json<Value>, AppError> {
    let habit = db::get_habit(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;

    let today = Local::now().date_naive();
    let year = params.year.unwrap_or_else(|| today.year());
    let month = params.month.unwrap_or_else(|| today.month());
    let week = params.week.unwrap_or_else(|| today.iso_week().week());

    let dates = db::list_completion_dates(&state.pool, id).await?;
    let streak = streaks::calculate_streak(habit.frequency, &dates, today);
    let totals = streaks::period_totals(&dates, year, month, week);

    Ok(Json(json!({
        "habit_id": id,
        "habit_name": habit.name,
        "current_streak": streak,
        "weekly_total": totals.weekly_total,
        "monthly_total": totals.monthly_total,
        "week": week,
        "month": month,
        "year": year,
    })))
}
