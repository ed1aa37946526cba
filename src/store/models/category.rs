use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::id::RecordId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: RecordId,
    pub title: String,
    /// Owning user; every category belongs to exactly one user.
    pub user: RecordId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub title: String,
    pub user: RecordId,
}
