use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{require_field, require_id};
use crate::error::ApiError;
use crate::filter::{BlogFilter, Page};
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::store::models::{BlogPatch, NewBlog};
use crate::store::{RecordId, SharedStore};

/// Query surface of the blog listing endpoint. Everything is optional at the
/// extractor level; presence and format of the ids are checked by hand so the
/// 400 can name the offending parameter.
#[derive(Debug, Deserialize)]
pub struct BlogListQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    #[serde(rename = "categoryId")]
    pub category_id: Option<String>,
    pub keywords: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
    pub page: Option<String>,
    #[serde(rename = "pageLimit")]
    pub page_limit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BlogScopeQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    #[serde(rename = "categoryId")]
    pub category_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateBlogBody {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// GET /blogs - filtered, paginated listing scoped to a user and category
pub async fn blog_list(
    State(store): State<SharedStore>,
    Query(query): Query<BlogListQuery>,
) -> ApiResult<Value> {
    let user_id = require_id(query.user_id.as_deref(), "userId")?;
    let category_id = require_id(query.category_id.as_deref(), "categoryId")?;

    resolve_user(&store, &user_id).await?;
    resolve_category(&store, &category_id, &user_id).await?;

    let filter = BlogFilter::scoped(user_id, category_id)
        .with_keywords(query.keywords.as_deref())
        .with_date_range(query.start_date.as_deref(), query.end_date.as_deref())?;
    let page = Page::from_raw(query.page.as_deref(), query.page_limit.as_deref());

    let blogs = store.list_blogs(&filter, page).await?;
    Ok(ApiResponse::success(json!({ "blogs": blogs })))
}

/// POST /blogs?userId=&categoryId= - create a blog under a user's category
pub async fn blog_create(
    State(store): State<SharedStore>,
    Query(query): Query<BlogScopeQuery>,
    Json(body): Json<CreateBlogBody>,
) -> ApiResult<Value> {
    let user_id = require_id(query.user_id.as_deref(), "userId")?;
    let category_id = require_id(query.category_id.as_deref(), "categoryId")?;
    let title = require_field(body.title, "title")?;
    let description = require_field(body.description, "description")?;

    resolve_user(&store, &user_id).await?;
    // The scoped lookup is what enforces "category belongs to this user"
    resolve_category(&store, &category_id, &user_id).await?;

    let blog = store
        .insert_blog(NewBlog { title, description, user: user_id, category: category_id })
        .await?;

    Ok(ApiResponse::success(json!({
        "message": "Blog is created",
        "blog": blog
    })))
}

/// GET /blogs/:id?userId=&categoryId= - fetch one blog scoped to all three ids
pub async fn blog_get(
    State(store): State<SharedStore>,
    Path(blog_id): Path<String>,
    Query(query): Query<BlogScopeQuery>,
) -> ApiResult<Value> {
    let user_id = require_id(query.user_id.as_deref(), "userId")?;
    let category_id = require_id(query.category_id.as_deref(), "categoryId")?;
    let blog_id = require_id(Some(&blog_id), "blogId")?;

    resolve_user(&store, &user_id).await?;
    resolve_category(&store, &category_id, &user_id).await?;

    let blog = store
        .find_blog(&blog_id, &user_id, &category_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Blog not found"))?;

    Ok(ApiResponse::success(json!({ "blog": blog })))
}

/// PATCH /blogs/:id?userId= - partial update, ownership re-checked
pub async fn blog_update(
    State(store): State<SharedStore>,
    Path(blog_id): Path<String>,
    Query(query): Query<OwnerQuery>,
    Json(patch): Json<BlogPatch>,
) -> ApiResult<Value> {
    let user_id = require_id(query.user_id.as_deref(), "userId")?;
    let blog_id = require_id(Some(&blog_id), "blogId")?;

    resolve_user(&store, &user_id).await?;

    let blog = store
        .update_blog(&blog_id, &user_id, patch)
        .await?
        .ok_or_else(|| ApiError::not_found("Blog not found"))?;

    Ok(ApiResponse::success(json!({
        "message": "Blog updated",
        "blog": blog
    })))
}

/// DELETE /blogs/:id?userId= - delete, ownership re-checked
pub async fn blog_delete(
    State(store): State<SharedStore>,
    Path(blog_id): Path<String>,
    Query(query): Query<OwnerQuery>,
) -> ApiResult<Value> {
    let user_id = require_id(query.user_id.as_deref(), "userId")?;
    let blog_id = require_id(Some(&blog_id), "blogId")?;

    resolve_user(&store, &user_id).await?;

    store
        .delete_blog(&blog_id, &user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Blog not found"))?;

    Ok(ApiResponse::success(json!({ "message": "Blog is deleted" })))
}

async fn resolve_user(store: &SharedStore, user_id: &RecordId) -> Result<(), ApiError> {
    store
        .find_user(user_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| ApiError::not_found("User not found"))
}

async fn resolve_category(
    store: &SharedStore,
    category_id: &RecordId,
    owner: &RecordId,
) -> Result<(), ApiError> {
    store
        .find_category(category_id, owner)
        .await?
        .map(|_| ())
        .ok_or_else(|| ApiError::not_found("Category not found"))
}
