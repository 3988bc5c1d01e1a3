//! Category API handlers.
//!
//! | Method | Path                 | Handler           |
//! |--------|----------------------|-------------------|
//! | GET    | /api/categories      | `list_categories` |
//! | POST   | /api/categories      | `create_category` |
//! | GET    | /api/categories/{id} | `get_category`    |
//! | PUT    | /api/categories/{id} | `update_category` |
//! | DELETE | /api/categories/{id} | `delete_category` |

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    db,
    error::AppError,
    models::{Category, CategoryPayload},
    routes::AppState,
};

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, AppError> {
    let categories = db::list_categories(&state.pool).await?;
    Ok(Json(categories))
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Category>, AppError> {
    let category = db::get_category(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(category))
}

pub async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<CategoryPayload>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    let name = payload
        .name
        .ok_or_else(|| AppError::BadRequest("Name is required".to_string()))?;

    if db::find_category_by_name(&state.pool, &name).await?.is_some() {
        return Err(AppError::Conflict(
            "Category with this name already exists".to_string(),
        ));
    }

    let category = db::create_category(&state.pool, &name).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Full update; unlike habits, a category rename always requires `name`.
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryPayload>,
) -> Result<Json<Category>, AppError> {
    db::get_category(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;

    let name = payload
        .name
        .ok_or_else(|| AppError::BadRequest("Name is required".to_string()))?;

    // Renaming a category to its own name is allowed.
    if let Some(existing) = db::find_category_by_name(&state.pool, &name).await? {
        if existing.id != id {
            return Err(AppError::Conflict(
                "Category with this name already exists".to_string(),
            ));
        }
    }

    let category = db::update_category(&state.pool, id, &name)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(category))
}

/// Deletes a category. Habits referencing it are kept and detached, never
/// deleted.
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let deleted = db::delete_category(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::NotFound);
    }
    Ok(Json(json!({ "message": "Category deleted successfully" })))
}
