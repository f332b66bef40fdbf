use axum::{
    Extension,
    extract::{Query, State},
    response::Html,
};
use serde_json::json;
use workos_http_client::apis::directory_sync_api::{self, ListDirectoryUsersParams};

use super::{DirectoryQuery, USER_LIMIT};
use crate::auth::CurrentUser;
use crate::context::Ctx;
use crate::error::AppError;

/// List users for a specific directory
pub async fn list_users(
    State(ctx): State<Ctx>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<DirectoryQuery>,
) -> Result<Html<String>, AppError> {
    let directory_id = query.require_id()?;

    let users = directory_sync_api::list_directory_users(
        &ctx.workos,
        ListDirectoryUsersParams {
            directory: Some(directory_id.clone()),
            limit: Some(USER_LIMIT),
            ..Default::default()
        },
    )
    .await
    .map_err(|e| {
        tracing::error!("Error fetching users for directory {}: {}", directory_id, e);
        AppError::InternalError("Failed to fetch users".to_string())
    })?;

    // The template shows one address per user
    let users: Vec<_> = users
        .data
        .iter()
        .map(|u| {
            json!({
                "id": u.id,
                "first_name": u.first_name,
                "last_name": u.last_name,
                "email": u.primary_email(),
                "username": u.username,
                "state": u.state,
            })
        })
        .collect();

    ctx.templates.render(
        "users",
        &json!({
            "title": "Directory Users",
            "users": users,
            "directory_id": directory_id,
            "first_name": user.first_name,
            "last_name": user.last_name,
        }),
    )
}
