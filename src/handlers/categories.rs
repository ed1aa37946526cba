use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{require_field, require_id};
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::store::models::NewCategory;
use crate::store::{RecordId, SharedStore};

#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryBody {
    pub title: Option<String>,
}

/// GET /categories?userId= - list the categories owned by a user
pub async fn category_list(
    State(store): State<SharedStore>,
    Query(query): Query<OwnerQuery>,
) -> ApiResult<Value> {
    let user_id = require_id(query.user_id.as_deref(), "userId")?;
    let owner = resolve_user(&store, &user_id).await?;

    let categories = store.list_categories(&owner).await?;
    Ok(ApiResponse::success(json!(categories)))
}

/// POST /categories?userId= - create a category for a user
pub async fn category_create(
    State(store): State<SharedStore>,
    Query(query): Query<OwnerQuery>,
    Json(body): Json<CategoryBody>,
) -> ApiResult<Value> {
    let user_id = require_id(query.user_id.as_deref(), "userId")?;
    let title = require_field(body.title, "title")?;
    let owner = resolve_user(&store, &user_id).await?;

    let category = store.insert_category(NewCategory { title, user: owner }).await?;
    Ok(ApiResponse::success(json!({
        "message": "Category is created",
        "category": category
    })))
}

/// PATCH /categories/:id?userId= - retitle a category, ownership re-checked
pub async fn category_update(
    State(store): State<SharedStore>,
    Path(category_id): Path<String>,
    Query(query): Query<OwnerQuery>,
    Json(body): Json<CategoryBody>,
) -> ApiResult<Value> {
    let user_id = require_id(query.user_id.as_deref(), "userId")?;
    let category_id = require_id(Some(&category_id), "categoryId")?;
    let title = require_field(body.title, "title")?;
    let owner = resolve_user(&store, &user_id).await?;

    // Single owner-scoped update: a category owned by someone else reads as absent
    let category = store
        .update_category_title(&category_id, &owner, &title)
        .await?
        .ok_or_else(|| ApiError::not_found("Category not found"))?;

    Ok(ApiResponse::success(json!({
        "message": "Category is updated",
        "category": category
    })))
}

/// DELETE /categories/:id?userId= - delete a category, ownership re-checked
pub async fn category_delete(
    State(store): State<SharedStore>,
    Path(category_id): Path<String>,
    Query(query): Query<OwnerQuery>,
) -> ApiResult<Value> {
    let user_id = require_id(query.user_id.as_deref(), "userId")?;
    let category_id = require_id(Some(&category_id), "categoryId")?;
    let owner = resolve_user(&store, &user_id).await?;

    let category = store
        .delete_category(&category_id, &owner)
        .await?
        .ok_or_else(|| ApiError::not_found("Category not found"))?;

    Ok(ApiResponse::success(json!({
        "message": "Category is deleted",
        "category": category
    })))
}

async fn resolve_user(store: &SharedStore, user_id: &RecordId) -> Result<RecordId, ApiError> {
    store
        .find_user(user_id)
        .await?
        .map(|user| user.id)
        .ok_or_else(|| ApiError::not_found("User not found"))
}
