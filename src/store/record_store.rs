use std::sync::Arc;

use async_trait::async_trait;

use crate::filter::{BlogFilter, Page};
use crate::store::error::StoreError;
use crate::store::id::RecordId;
use crate::store::models::{Blog, BlogPatch, Category, NewBlog, NewCategory, NewUser, User};

/// Store handle injected into handlers via router state.
pub type SharedStore = Arc<dyn RecordStore>;

/// Boundary to the document database holding Users, Categories and Blogs.
///
/// Ownership scoping is part of the contract: category and blog lookups
/// always filter by identifier AND owner in the same query, so a record
/// belonging to another user is indistinguishable from an absent one.
///
/// Targeted updates and deletes return `None` when no record matched, which
/// handlers report as not-found.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Idempotent lazy connect: a no-op when already connected or connecting.
    async fn connect(&self) -> Result<(), StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;

    // Users
    async fn insert_user(&self, new: NewUser) -> Result<User, StoreError>;
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;
    async fn find_user(&self, id: &RecordId) -> Result<Option<User>, StoreError>;
    async fn update_username(&self, id: &RecordId, username: &str) -> Result<Option<User>, StoreError>;
    async fn delete_user(&self, id: &RecordId) -> Result<Option<User>, StoreError>;

    // Categories
    async fn insert_category(&self, new: NewCategory) -> Result<Category, StoreError>;
    async fn list_categories(&self, owner: &RecordId) -> Result<Vec<Category>, StoreError>;
    async fn find_category(&self, id: &RecordId, owner: &RecordId) -> Result<Option<Category>, StoreError>;
    async fn update_category_title(
        &self,
        id: &RecordId,
        owner: &RecordId,
        title: &str,
    ) -> Result<Option<Category>, StoreError>;
    async fn delete_category(&self, id: &RecordId, owner: &RecordId) -> Result<Option<Category>, StoreError>;

    // Blogs
    async fn insert_blog(&self, new: NewBlog) -> Result<Blog, StoreError>;
    /// Filtered listing, sorted ascending by creation time, then skip/limit.
    async fn list_blogs(&self, filter: &BlogFilter, page: Page) -> Result<Vec<Blog>, StoreError>;
    /// Point lookup scoped to all three identifiers.
    async fn find_blog(
        &self,
        id: &RecordId,
        owner: &RecordId,
        category: &RecordId,
    ) -> Result<Option<Blog>, StoreError>;
    async fn update_blog(
        &self,
        id: &RecordId,
        owner: &RecordId,
        patch: BlogPatch,
    ) -> Result<Option<Blog>, StoreError>;
    async fn delete_blog(&self, id: &RecordId, owner: &RecordId) -> Result<Option<Blog>, StoreError>;
}
