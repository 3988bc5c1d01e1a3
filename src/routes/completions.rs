//! Completion API handlers.
//!
//! | Method | Path                         | Handler             |
//! |--------|------------------------------|---------------------|
//! | GET    | /api/habits/{id}/completions | `list_completions`  |
//! | POST   | /api/habits/{id}/completions | `create_completion` |
//! | DELETE | /api/completions/{id}        | `delete_completion` |

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::{
    db,
    error::AppError,
    models::{Completion, CompletionFilters, CreateCompletionRequest},
    routes::AppState,
};

/// Parses a `YYYY-MM-DD` query bound, naming the offending parameter in the
/// error.
fn parse_bound(value: &str, param: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("Invalid {param} format. Use YYYY-MM-DD")))
}

pub async fn list_completions(
    State(state): State<AppState>,
    Path(habit_id): Path<i64>,
    Query(filters): Query<CompletionFilters>,
) -> Result<Json<Value>, AppError> {
    let habit = db::get_habit(&state.pool, habit_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let start_date = filters
        .start_date
        .as_deref()
        .map(|v| parse_bound(v, "start_date"))
        .transpose()?;
    let end_date = filters
        .end_date
        .as_deref()
        .map(|v| parse_bound(v, "end_date"))
        .transpose()?;

    let completions = db::list_completions(&state.pool, habit_id, start_date, end_date).await?;

    Ok(Json(json!({
        "habit_id": habit_id,
        "habit_name": habit.name,
        "completions": completions,
    })))
}

pub async fn create_completion(
    State(state): State<AppState>,
    Path(habit_id): Path<i64>,
    Json(payload): Json<CreateCompletionRequest>,
) -> Result<(StatusCode, Json<Completion>), AppError> {
    db::get_habit(&state.pool, habit_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let raw_date = payload
        .completed_date
        .ok_or_else(|| AppError::BadRequest("completed_date is required".to_string()))?;
    let completed_date = NaiveDate::parse_from_str(&raw_date, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest("Invalid date format. Use YYYY-MM-DD".to_string()))?;

    if db::find_completion(&state.pool, habit_id, completed_date)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "Completion already exists for this date".to_string(),
        ));
    }

    let completion = db::create_completion(
        &state.pool,
        habit_id,
        completed_date,
        payload.notes.as_deref(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(completion)))
}

pub async fn delete_completion(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let deleted = db::delete_completion(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::NotFound);
    }
    Ok(Json(json!({ "message": "Completion deleted successfully" })))
}
