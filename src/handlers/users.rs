use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{require_field, require_id};
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::store::models::NewUser;
use crate::store::SharedStore;

#[derive(Debug, Deserialize)]
pub struct CreateUserBody {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RenameUserBody {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    #[serde(rename = "newUsername")]
    pub new_username: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// GET /users - list all users
pub async fn user_list(State(store): State<SharedStore>) -> ApiResult<Value> {
    let users = store.list_users().await?;
    Ok(ApiResponse::success(json!(users)))
}

/// POST /users - create a user from body fields
pub async fn user_create(
    State(store): State<SharedStore>,
    Json(body): Json<CreateUserBody>,
) -> ApiResult<Value> {
    let email = require_field(body.email, "email")?;
    let username = require_field(body.username, "username")?;
    let password = require_field(body.password, "password")?;

    let user = store.insert_user(NewUser { email, username, password }).await?;
    Ok(ApiResponse::success(json!({
        "message": "User is created",
        "user": user
    })))
}

/// PATCH /users - rename a user; id and new name travel in the body
pub async fn user_rename(
    State(store): State<SharedStore>,
    Json(body): Json<RenameUserBody>,
) -> ApiResult<Value> {
    let new_username = require_field(body.new_username, "newUsername")?;
    let user_id = require_id(body.user_id.as_deref(), "userId")?;

    let user = store
        .update_username(&user_id, &new_username)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(ApiResponse::success(json!({
        "message": "User updated",
        "user": user
    })))
}

/// DELETE /users?userId= - delete a user
pub async fn user_delete(
    State(store): State<SharedStore>,
    Query(query): Query<UserIdQuery>,
) -> ApiResult<Value> {
    let user_id = require_id(query.user_id.as_deref(), "userId")?;

    let user = store
        .delete_user(&user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(ApiResponse::success(json!({
        "message": "User deleted",
        "user": user
    })))
}
