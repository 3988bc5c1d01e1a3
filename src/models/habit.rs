//! Habit model, frequency, and request payloads.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// Cadence of a habit; decides which streak algorithm applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
}

impl Frequency {
    /// Parses the wire value; anything other than `daily`/`weekly` is None.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "daily" => Some(Frequency::Daily),
            "weekly" => Some(Frequency::Weekly),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
        }
    }
}

/// One row of the `habits` table, joined with its category name.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Habit {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub frequency: Frequency,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

impl Habit {
    /// Attaches the computed streak for read responses.
    pub fn with_streak(self, current_streak: u32) -> HabitResponse {
        HabitResponse {
            habit: self,
            current_streak,
        }
    }
}

/// Habit read response: the entity plus its derived `current_streak`.
#[derive(Debug, Serialize)]
pub struct HabitResponse {
    #[serde(flatten)]
    pub habit: Habit,
    pub current_streak: u32,
}

/// Body of `POST /api/habits`.
///
/// `name` and `frequency` are validated in the handler so the error messages
/// match the API contract (400, not an extractor rejection).
#[derive(Debug, Deserialize)]
pub struct CreateHabitRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub frequency: Option<String>,
    pub category_id: Option<i64>,
}

/// Body of `PUT /api/habits/{id}` — a partial patch.
///
/// `description` and `category_id` are nullable columns, so their slots
/// distinguish "field absent" (outer None, leave as-is) from "field present
/// and null" (Some(None), clear the column).
#[derive(Debug, Default, Deserialize)]
pub struct UpdateHabitRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "patch_field")]
    pub description: Option<Option<String>>,
    pub frequency: Option<String>,
    #[serde(default, deserialize_with = "patch_field")]
    pub category_id: Option<Option<i64>>,
    pub is_active: Option<bool>,
}

impl UpdateHabitRequest {
    /// True when the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.frequency.is_none()
            && self.category_id.is_none()
            && self.is_active.is_none()
    }
}

/// A validated habit ready for insertion.
#[derive(Debug, Clone)]
pub struct NewHabit {
    pub name: String,
    pub description: Option<String>,
    pub frequency: Frequency,
    pub category_id: Option<i64>,
}

/// A validated partial update, produced from [`UpdateHabitRequest`] once the
/// frequency string has been checked.
#[derive(Debug, Clone, Default)]
pub struct HabitPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub frequency: Option<Frequency>,
    pub category_id: Option<Option<i64>>,
    pub is_active: Option<bool>,
}

/// Treats an explicitly-present field (including `null`) as `Some(...)`,
/// leaving serde's default `None` to mean "absent".
fn patch_field<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Query string of `GET /api/habits`.
///
/// `is_active` arrives as a string compared case-insensitively against
/// "true"; an unrecognized `frequency` is ignored rather than rejected.
#[derive(Debug, Default, Deserialize)]
pub struct HabitFilters {
    pub category_id: Option<i64>,
    pub is_active: Option<String>,
    pub frequency: Option<String>,
}
