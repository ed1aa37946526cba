use chrono::{DateTime, NaiveDate, Utc};

use super::error::FilterError;
use crate::store::id::RecordId;
use crate::store::models::Blog;

/// Structured predicate for the blog listing operation.
///
/// The base scope is always an equality match on owner and category; keyword
/// and date clauses are added on top, ANDed with the scope. The builder never
/// re-validates the ids (the caller has already done so) and degrades to "no
/// constraint" when optional inputs are absent.
#[derive(Debug, Clone)]
pub struct BlogFilter {
    user: RecordId,
    category: RecordId,
    keywords: Option<String>,
    created_after: Option<DateTime<Utc>>,
    created_before: Option<DateTime<Utc>>,
}

impl BlogFilter {
    /// Base filter: `{user, category}` with no text or date clause.
    pub fn scoped(user: RecordId, category: RecordId) -> Self {
        Self {
            user,
            category,
            keywords: None,
            created_after: None,
            created_before: None,
        }
    }

    /// Add a keyword clause: title OR description must contain `keywords`
    /// case-insensitively. Empty or absent input adds nothing.
    pub fn with_keywords(mut self, keywords: Option<&str>) -> Self {
        match keywords {
            Some(k) if !k.trim().is_empty() => self.keywords = Some(k.to_string()),
            _ => {}
        }
        self
    }

    /// Add inclusive created-at bounds from raw date strings.
    ///
    /// Both bounds given: `[start, end]`. Only one: a single `>=` or `<=`
    /// bound. Neither: no date clause. Malformed input is rejected here
    /// rather than being passed through to the store.
    pub fn with_date_range(
        mut self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Self, FilterError> {
        if let Some(s) = start_date {
            self.created_after = Some(parse_bound("startDate", s)?);
        }
        if let Some(e) = end_date {
            self.created_before = Some(parse_bound("endDate", e)?);
        }
        Ok(self)
    }

    pub fn user(&self) -> &RecordId {
        &self.user
    }

    pub fn category(&self) -> &RecordId {
        &self.category
    }

    pub fn keywords(&self) -> Option<&str> {
        self.keywords.as_deref()
    }

    pub fn created_after(&self) -> Option<DateTime<Utc>> {
        self.created_after
    }

    pub fn created_before(&self) -> Option<DateTime<Utc>> {
        self.created_before
    }

    /// Evaluate the predicate against a single record.
    pub fn matches(&self, blog: &Blog) -> bool {
        if blog.user != self.user || blog.category != self.category {
            return false;
        }

        if let Some(keywords) = &self.keywords {
            let needle = keywords.to_lowercase();
            let in_title = blog.title.to_lowercase().contains(&needle);
            let in_description = blog.description.to_lowercase().contains(&needle);
            if !in_title && !in_description {
                return false;
            }
        }

        if let Some(after) = self.created_after {
            if blog.created_at < after {
                return false;
            }
        }
        if let Some(before) = self.created_before {
            if blog.created_at > before {
                return false;
            }
        }

        true
    }
}

/// Accepts a full RFC 3339 timestamp or a plain date (midnight UTC).
fn parse_bound(field: &'static str, value: &str) -> Result<DateTime<Utc>, FilterError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(dt.and_utc());
        }
    }
    Err(FilterError::InvalidDate { field, value: value.to_string() })
}
