use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::filter::{BlogFilter, Page};
use crate::store::error::StoreError;
use crate::store::id::RecordId;
use crate::store::models::{Blog, BlogPatch, Category, NewBlog, NewCategory, NewUser, User};
use crate::store::record_store::RecordStore;

/// Mirrors the driver readyState the connect call checks before doing work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

#[derive(Default)]
struct Collections {
    users: HashMap<RecordId, User>,
    categories: HashMap<RecordId, Category>,
    blogs: HashMap<RecordId, Blog>,
}

/// In-process document store.
///
/// Assigns identifiers and timestamps on write and enforces the one
/// store-level invariant: unique user email and username. Each operation
/// touches exactly one document; there are no cross-document transactions.
pub struct MemoryStore {
    state: Arc<RwLock<ConnectionState>>,
    inner: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(ConnectionState::Disconnected)),
            inner: Arc::new(RwLock::new(Collections::default())),
        }
    }

    async fn ensure_connected(&self) -> Result<(), StoreError> {
        if *self.state.read().await != ConnectionState::Connected {
            self.connect().await?;
        }
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn connect(&self) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        match *state {
            ConnectionState::Connected => {
                tracing::debug!("store already connected");
            }
            ConnectionState::Connecting => {
                tracing::debug!("store connection already in progress");
            }
            ConnectionState::Disconnected => {
                let config = crate::config::config();
                tracing::info!(database = %config.store.database_name, "store connected");
                *state = ConnectionState::Connected;
            }
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.ensure_connected().await
    }

    async fn insert_user(&self, new: NewUser) -> Result<User, StoreError> {
        self.ensure_connected().await?;
        let mut inner = self.inner.write().await;

        if inner.users.values().any(|u| u.email == new.email) {
            return Err(StoreError::DuplicateKey("email"));
        }
        if inner.users.values().any(|u| u.username == new.username) {
            return Err(StoreError::DuplicateKey("username"));
        }

        let now = Utc::now();
        let user = User {
            id: RecordId::generate(),
            email: new.email,
            username: new.username,
            password: new.password,
            created_at: now,
            updated_at: now,
        };
        inner.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        self.ensure_connected().await?;
        let inner = self.inner.read().await;
        let mut users: Vec<User> = inner.users.values().cloned().collect();
        users.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(users)
    }

    async fn find_user(&self, id: &RecordId) -> Result<Option<User>, StoreError> {
        self.ensure_connected().await?;
        Ok(self.inner.read().await.users.get(id).cloned())
    }

    async fn update_username(&self, id: &RecordId, username: &str) -> Result<Option<User>, StoreError> {
        self.ensure_connected().await?;
        let mut inner = self.inner.write().await;
        match inner.users.get_mut(id) {
            Some(user) => {
                user.username = username.to_string();
                user.updated_at = Utc::now();
                Ok(Some(user.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_user(&self, id: &RecordId) -> Result<Option<User>, StoreError> {
        self.ensure_connected().await?;
        Ok(self.inner.write().await.users.remove(id))
    }

    async fn insert_category(&self, new: NewCategory) -> Result<Category, StoreError> {
        self.ensure_connected().await?;
        let now = Utc::now();
        let category = Category {
            id: RecordId::generate(),
            title: new.title,
            user: new.user,
            created_at: now,
            updated_at: now,
        };
        self.inner.write().await.categories.insert(category.id.clone(), category.clone());
        Ok(category)
    }

    async fn list_categories(&self, owner: &RecordId) -> Result<Vec<Category>, StoreError> {
        self.ensure_connected().await?;
        let inner = self.inner.read().await;
        let mut categories: Vec<Category> =
            inner.categories.values().filter(|c| &c.user == owner).cloned().collect();
        categories.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(categories)
    }

    async fn find_category(&self, id: &RecordId, owner: &RecordId) -> Result<Option<Category>, StoreError> {
        self.ensure_connected().await?;
        let inner = self.inner.read().await;
        Ok(inner.categories.get(id).filter(|c| &c.user == owner).cloned())
    }

    async fn update_category_title(
        &self,
        id: &RecordId,
        owner: &RecordId,
        title: &str,
    ) -> Result<Option<Category>, StoreError> {
        self.ensure_connected().await?;
        let mut inner = self.inner.write().await;
        match inner.categories.get_mut(id).filter(|c| &c.user == owner) {
            Some(category) => {
                category.title = title.to_string();
                category.updated_at = Utc::now();
                Ok(Some(category.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_category(&self, id: &RecordId, owner: &RecordId) -> Result<Option<Category>, StoreError> {
        self.ensure_connected().await?;
        let mut inner = self.inner.write().await;
        let owned = inner.categories.get(id).map_or(false, |c| &c.user == owner);
        if !owned {
            return Ok(None);
        }
        Ok(inner.categories.remove(id))
    }

    async fn insert_blog(&self, new: NewBlog) -> Result<Blog, StoreError> {
        self.ensure_connected().await?;
        let now = Utc::now();
        let blog = Blog {
            id: RecordId::generate(),
            title: new.title,
            description: new.description,
            user: new.user,
            category: new.category,
            created_at: now,
            updated_at: now,
        };
        self.inner.write().await.blogs.insert(blog.id.clone(), blog.clone());
        Ok(blog)
    }

    async fn list_blogs(&self, filter: &BlogFilter, page: Page) -> Result<Vec<Blog>, StoreError> {
        self.ensure_connected().await?;
        let inner = self.inner.read().await;
        let mut blogs: Vec<Blog> = inner.blogs.values().filter(|b| filter.matches(b)).cloned().collect();
        // Ascending creation order; id breaks ties so paging is stable.
        blogs.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(blogs.into_iter().skip(page.skip).take(page.limit).collect())
    }

    async fn find_blog(
        &self,
        id: &RecordId,
        owner: &RecordId,
        category: &RecordId,
    ) -> Result<Option<Blog>, StoreError> {
        self.ensure_connected().await?;
        let inner = self.inner.read().await;
        Ok(inner
            .blogs
            .get(id)
            .filter(|b| &b.user == owner && &b.category == category)
            .cloned())
    }

    async fn update_blog(
        &self,
        id: &RecordId,
        owner: &RecordId,
        patch: BlogPatch,
    ) -> Result<Option<Blog>, StoreError> {
        self.ensure_connected().await?;
        let mut inner = self.inner.write().await;
        match inner.blogs.get_mut(id).filter(|b| &b.user == owner) {
            Some(blog) => {
                if let Some(title) = patch.title {
                    blog.title = title;
                }
                if let Some(description) = patch.description {
                    blog.description = description;
                }
                blog.updated_at = Utc::now();
                Ok(Some(blog.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_blog(&self, id: &RecordId, owner: &RecordId) -> Result<Option<Blog>, StoreError> {
        self.ensure_connected().await?;
        let mut inner = self.inner.write().await;
        let owned = inner.blogs.get(id).map_or(false, |b| &b.user == owner);
        if !owned {
            return Ok(None);
        }
        Ok(inner.blogs.remove(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    async fn seeded_user(store: &MemoryStore, tag: &str) -> User {
        store
            .insert_user(NewUser {
                email: format!("{}@example.com", tag),
                username: tag.to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn connect_is_idempotent() {
        let store = MemoryStore::new();
        store.connect().await.unwrap();
        store.connect().await.unwrap();
        store.health_check().await.unwrap();
    }

    #[tokio::test]
    async fn insert_assigns_id_and_timestamps() {
        let store = MemoryStore::new();
        let user = seeded_user(&store, "alice").await;
        assert!(RecordId::is_valid(user.id.as_str()));
        assert_eq!(user.created_at, user.updated_at);
    }

    #[tokio::test]
    async fn duplicate_email_and_username_are_rejected() {
        let store = MemoryStore::new();
        seeded_user(&store, "alice").await;

        let same_email = store
            .insert_user(NewUser {
                email: "alice@example.com".to_string(),
                username: "alice2".to_string(),
                password: "secret".to_string(),
            })
            .await;
        assert!(matches!(same_email, Err(StoreError::DuplicateKey("email"))));

        let same_username = store
            .insert_user(NewUser {
                email: "alice2@example.com".to_string(),
                username: "alice".to_string(),
                password: "secret".to_string(),
            })
            .await;
        assert!(matches!(same_username, Err(StoreError::DuplicateKey("username"))));
    }

    #[tokio::test]
    async fn category_lookups_are_owner_scoped() {
        let store = MemoryStore::new();
        let alice = seeded_user(&store, "alice").await;
        let bob = seeded_user(&store, "bob").await;

        let category = store
            .insert_category(NewCategory { title: "Cooking".to_string(), user: alice.id.clone() })
            .await
            .unwrap();

        assert!(store.find_category(&category.id, &alice.id).await.unwrap().is_some());
        assert!(store.find_category(&category.id, &bob.id).await.unwrap().is_none());
        assert!(store
            .update_category_title(&category.id, &bob.id, "Hacking")
            .await
            .unwrap()
            .is_none());
        assert!(store.delete_category(&category.id, &bob.id).await.unwrap().is_none());
        assert!(store.delete_category(&category.id, &alice.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn update_category_title_is_idempotent() {
        let store = MemoryStore::new();
        let alice = seeded_user(&store, "alice").await;
        let category = store
            .insert_category(NewCategory { title: "Drafts".to_string(), user: alice.id.clone() })
            .await
            .unwrap();

        let once = store
            .update_category_title(&category.id, &alice.id, "Published")
            .await
            .unwrap()
            .unwrap();
        let twice = store
            .update_category_title(&category.id, &alice.id, "Published")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(once.title, twice.title);
        assert_eq!(twice.title, "Published");
    }

    #[tokio::test]
    async fn blog_listing_sorts_ascending_and_pages() {
        let store = MemoryStore::new();
        let alice = seeded_user(&store, "alice").await;
        let category = store
            .insert_category(NewCategory { title: "Notes".to_string(), user: alice.id.clone() })
            .await
            .unwrap();

        let mut ids = vec![];
        for title in ["first", "second", "third"] {
            let blog = store
                .insert_blog(NewBlog {
                    title: title.to_string(),
                    description: String::new(),
                    user: alice.id.clone(),
                    category: category.id.clone(),
                })
                .await
                .unwrap();
            ids.push(blog.id);
        }

        // Spread creation times so the expected order is unambiguous.
        {
            let base = Utc::now();
            let mut inner = store.inner.write().await;
            for (i, id) in ids.iter().enumerate() {
                inner.blogs.get_mut(id).unwrap().created_at = base + Duration::seconds(i as i64);
            }
        }

        let filter = BlogFilter::scoped(alice.id.clone(), category.id.clone());
        let all = store.list_blogs(&filter, Page { skip: 0, limit: 10 }).await.unwrap();
        let titles: Vec<&str> = all.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, ["first", "second", "third"]);

        let second_page = store.list_blogs(&filter, Page { skip: 2, limit: 2 }).await.unwrap();
        assert_eq!(second_page.len(), 1);
        assert_eq!(second_page[0].title, "third");
    }

    #[tokio::test]
    async fn blog_patch_leaves_absent_fields_untouched() {
        let store = MemoryStore::new();
        let alice = seeded_user(&store, "alice").await;
        let category = store
            .insert_category(NewCategory { title: "Notes".to_string(), user: alice.id.clone() })
            .await
            .unwrap();
        let blog = store
            .insert_blog(NewBlog {
                title: "Original".to_string(),
                description: "Body".to_string(),
                user: alice.id.clone(),
                category: category.id.clone(),
            })
            .await
            .unwrap();

        let updated = store
            .update_blog(
                &blog.id,
                &alice.id,
                BlogPatch { title: Some("Renamed".to_string()), description: None },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.description, "Body");
        assert!(updated.updated_at >= updated.created_at);
    }
}
