use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::id::RecordId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blog {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    /// Owning user.
    pub user: RecordId,
    /// Owning category; must itself belong to `user`. Enforced by the
    /// handler's owner-scoped category lookup, not by the store.
    pub category: RecordId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewBlog {
    pub title: String,
    pub description: String,
    pub user: RecordId,
    pub category: RecordId,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlogPatch {
    pub title: Option<String>,
    pub description: Option<String>,
}
