//! Completion queries.

use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::error::AppError;
use crate::models::Completion;

const COMPLETION_COLUMNS: &str = "id, habit_id, completed_date, notes, created_at";

/// Lists a habit's completions, newest first, optionally bounded by an
/// inclusive date range.
pub async fn list_completions(
    pool: &SqlitePool,
    habit_id: i64,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<Vec<Completion>, AppError> {
    let mut query = QueryBuilder::<Sqlite>::new(format!(
        "SELECT {COMPLETION_COLUMNS} FROM completions WHERE habit_id = "
    ));
    query.push_bind(habit_id);

    if let Some(start) = start_date {
        query.push(" AND completed_date >= ").push_bind(start);
    }
    if let Some(end) = end_date {
        query.push(" AND completed_date <= ").push_bind(end);
    }
    query.push(" ORDER BY completed_date DESC");

    let completions = query.build_query_as::<Completion>().fetch_all(pool).await?;

    Ok(completions)
}

/// Fetches just the dates, the engine's input shape.
pub async fn list_completion_dates(
    pool: &SqlitePool,
    habit_id: i64,
) -> Result<Vec<NaiveDate>, AppError> {
    let dates = sqlx::query_scalar::<_, NaiveDate>(
        "SELECT completed_date FROM completions WHERE habit_id = ? ORDER BY completed_date",
    )
    .bind(habit_id)
    .fetch_all(pool)
    .await?;

    Ok(dates)
}

/// Lookup used for the duplicate-date check before logging.
pub async fn find_completion(
    pool: &SqlitePool,
    habit_id: i64,
    completed_date: NaiveDate,
) -> Result<Option<Completion>, AppError> {
    let completion = sqlx::query_as::<_, Completion>(&format!(
        "SELECT {COMPLETION_COLUMNS} FROM completions \
         WHERE habit_id = ? AND completed_date = ?"
    ))
    .bind(habit_id)
    .bind(completed_date)
    .fetch_optional(pool)
    .await?;

    Ok(completion)
}

/// Logs one completion.
///
/// The handler checks for duplicates first; the UNIQUE(habit_id,
/// completed_date) constraint is still mapped to a conflict here so a
/// concurrent writer losing the race gets a 409, not a 500.
pub async fn create_completion(
    pool: &SqlitePool,
    habit_id: i64,
    completed_date: NaiveDate,
    notes: Option<&str>,
) -> Result<Completion, AppError> {
    let result =
        sqlx::query("INSERT INTO completions (habit_id, completed_date, notes) VALUES (?, ?, ?)")
            .bind(habit_id)
            .bind(completed_date)
            .bind(notes)
            .execute(pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    AppError::Conflict("Completion already exists for this date".to_string())
                }
                _ => AppError::from(e),
            })?;

    let completion = sqlx::query_as::<_, Completion>(&format!(
        "SELECT {COMPLETION_COLUMNS} FROM completions WHERE id = ?"
    ))
    .bind(result.last_insert_rowid())
    .fetch_one(pool)
    .await?;

    Ok(completion)
}

pub async fn delete_completion(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM completions WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
