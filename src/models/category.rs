//! Category model and request payloads.

use serde::{Deserialize, Serialize};

/// One row of the `categories` table.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Body of `POST /api/categories` and `PUT /api/categories/{id}`.
///
/// `name` is optional at the serde level so a missing field reaches the
/// handler and comes back as a 400 with the expected message, rather than a
/// body-rejection from the extractor.
#[derive(Debug, Deserialize)]
pub struct CategoryPayload {
    pub name: Option<String>,
}
