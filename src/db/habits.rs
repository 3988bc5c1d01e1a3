//! Habit queries.
//!
//! Habit rows are always read through a LEFT JOIN on categories so responses
//! can carry `category_name` without a second round trip.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::error::AppError;
use crate::models::{Frequency, Habit, HabitFilters, HabitPatch, NewHabit};

const HABIT_COLUMNS: &str = "h.id, h.name, h.description, h.frequency, h.category_id, \
     c.name AS category_name, h.is_active, h.created_at";

/// Lists habits, applying whichever filters are present.
///
/// `is_active` matches the wire convention: the string "true"
/// (case-insensitive) means active, anything else means inactive. An
/// unrecognized `frequency` value is ignored rather than rejected.
pub async fn list_habits(
    pool: &SqlitePool,
    filters: &HabitFilters,
) -> Result<Vec<Habit>, AppError> {
    let mut query = QueryBuilder::<Sqlite>::new(format!(
        "SELECT {HABIT_COLUMNS} FROM habits h \
         LEFT JOIN categories c ON c.id = h.category_id WHERE 1 = 1"
    ));

    if let Some(category_id) = filters.category_id {
        query.push(" AND h.category_id = ").push_bind(category_id);
    }
    if let Some(is_active) = &filters.is_active {
        query
            .push(" AND h.is_active = ")
            .push_bind(is_active.eq_ignore_ascii_case("true"));
    }
    if let Some(frequency) = filters.frequency.as_deref().and_then(Frequency::parse) {
        query.push(" AND h.frequency = ").push_bind(frequency.as_str());
    }
    query.push(" ORDER BY h.id");

    let habits = query.build_query_as::<Habit>().fetch_all(pool).await?;

    Ok(habits)
}

/// Lists active habits only; the `/api/stats/*` endpoints aggregate over
/// these.
pub async fn list_active_habits(pool: &SqlitePool) -> Result<Vec<Habit>, AppError> {
    let filters = HabitFilters {
        is_active: Some("true".to_string()),
        ..HabitFilters::default()
    };
    list_habits(pool, &filters).await
}

pub async fn get_habit(pool: &SqlitePool, id: i64) -> Result<Option<Habit>, AppError> {
    let habit = sqlx::query_as::<_, Habit>(&format!(
        "SELECT {HABIT_COLUMNS} FROM habits h \
         LEFT JOIN categories c ON c.id = h.category_id WHERE h.id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(habit)
}

/// A `category_id` pointing at no category trips the FK constraint; that is
/// a bad request, not a storage failure.
fn map_category_fk_violation(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            AppError::BadRequest("Invalid category_id".to_string())
        }
        _ => AppError::from(e),
    }
}

pub async fn create_habit(pool: &SqlitePool, habit: &NewHabit) -> Result<Habit, AppError> {
    let result = sqlx::query(
        "INSERT INTO habits (name, description, frequency, category_id) VALUES (?, ?, ?, ?)",
    )
    .bind(&habit.name)
    .bind(&habit.description)
    .bind(habit.frequency.as_str())
    .bind(habit.category_id)
    .execute(pool)
    .await
    .map_err(map_category_fk_violation)?;

    let created = sqlx::query_as::<_, Habit>(&format!(
        "SELECT {HABIT_COLUMNS} FROM habits h \
         LEFT JOIN categories c ON c.id = h.category_id WHERE h.id = ?"
    ))
    .bind(result.last_insert_rowid())
    .fetch_one(pool)
    .await?;

    Ok(created)
}

/// Applies a partial update: only the fields carried by the patch change.
///
/// The per-field updates and the final read run in one transaction, so a
/// failure mid-patch leaves the row untouched rather than half-applied.
/// Returns `None` when the habit does not exist, leaving the 404 to the
/// handler.
pub async fn update_habit(
    pool: &SqlitePool,
    id: i64,
    patch: &HabitPatch,
) -> Result<Option<Habit>, AppError> {
    if get_habit(pool, id).await?.is_none() {
        return Ok(None);
    }

    let mut tx = pool.begin().await?;

    if let Some(name) = &patch.name {
        sqlx::query("UPDATE habits SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id)
            .execute(&mut *tx)
            .await?;
    }
    if let Some(description) = &patch.description {
        // Some(None) clears the column.
        sqlx::query("UPDATE habits SET description = ? WHERE id = ?")
            .bind(description.as_deref())
            .bind(id)
            .execute(&mut *tx)
            .await?;
    }
    if let Some(frequency) = patch.frequency {
        sqlx::query("UPDATE habits SET frequency = ? WHERE id = ?")
            .bind(frequency.as_str())
            .bind(id)
            .execute(&mut *tx)
            .await?;
    }
    if let Some(category_id) = patch.category_id {
        sqlx::query("UPDATE habits SET category_id = ? WHERE id = ?")
            .bind(category_id)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_category_fk_violation)?;
    }
    if let Some(is_active) = patch.is_active {
        sqlx::query("UPDATE habits SET is_active = ? WHERE id = ?")
            .bind(is_active)
            .bind(id)
            .execute(&mut *tx)
            .await?;
    }

    let habit = sqlx::query_as::<_, Habit>(&format!(
        "SELECT {HABIT_COLUMNS} FROM habits h \
         LEFT JOIN categories c ON c.id = h.category_id WHERE h.id = ?"
    ))
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(habit)
}

/// Deletes a habit together with its completion history.
///
/// The habit exclusively owns its completions, so both deletes run in one
/// transaction.
pub async fn delete_habit(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM completions WHERE habit_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM habits WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(result.rows_affected() > 0)
}
