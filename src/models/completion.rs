//! Completion model and request payloads.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One row of the `completions` table.
///
/// The (habit_id, completed_date) pair is unique: at most one completion per
/// habit per calendar day.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Completion {
    pub id: i64,
    pub habit_id: i64,
    pub completed_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Body of `POST /api/habits/{id}/completions`.
///
/// `completed_date` stays a string here; the handler parses it so a bad
/// value yields the documented 400 message.
#[derive(Debug, Deserialize)]
pub struct CreateCompletionRequest {
    pub completed_date: Option<String>,
    pub notes: Option<String>,
}

/// Query string of `GET /api/habits/{id}/completions`.
#[derive(Debug, Default, Deserialize)]
pub struct CompletionFilters {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}
