//! Category queries.

use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::Category;

pub async fn list_categories(pool: &SqlitePool) -> Result<Vec<Category>, AppError> {
    let categories = sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(categories)
}

pub async fn get_category(pool: &SqlitePool, id: i64) -> Result<Option<Category>, AppError> {
    let category = sqlx::query_as::<_, Category>("SELECT id, name FROM categories WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(category)
}

/// Lookup used for the duplicate-name check on create and update.
pub async fn find_category_by_name(
    pool: &SqlitePool,
    name: &str,
) -> Result<Option<Category>, AppError> {
    let category = sqlx::query_as::<_, Category>("SELECT id, name FROM categories WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await?;

    Ok(category)
}

pub async fn create_category(pool: &SqlitePool, name: &str) -> Result<Category, AppError> {
    let result = sqlx::query("INSERT INTO categories (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await?;

    // Read the row back so the response carries exactly what was stored.
    let category =
        sqlx::query_as::<_, Category>("SELECT id, name FROM categories WHERE id = ?")
            .bind(result.last_insert_rowid())
            .fetch_one(pool)
            .await?;

    Ok(category)
}

pub async fn update_category(
    pool: &SqlitePool,
    id: i64,
    name: &str,
) -> Result<Option<Category>, AppError> {
    let result = sqlx::query("UPDATE categories SET name = ? WHERE id = ?")
        .bind(name)
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    get_category(pool, id).await
}

/// Deletes a category, first detaching its habits.
///
/// Dependent habits survive with `category_id` set to NULL; deleting a
/// category never cascades into habit deletion.
pub async fn delete_category(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
    let mut tx = pool.begin().await?;

    sqlx::query("UPDATE habits SET category_id = NULL WHERE category_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM categories WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(result.rows_affected() > 0)
}
