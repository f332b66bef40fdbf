use axum::{
    Extension,
    extract::{Query, State},
    response::Html,
};
use serde_json::json;
use workos_http_client::apis::directory_sync_api::{self, ListDirectoryGroupsParams};

use super::{DirectoryQuery, GROUP_LIMIT};
use crate::auth::CurrentUser;
use crate::context::Ctx;
use crate::error::AppError;

/// List groups for a specific directory
pub async fn list_groups(
    State(ctx): State<Ctx>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<DirectoryQuery>,
) -> Result<Html<String>, AppError> {
    let directory_id = query.require_id()?;

    let groups = directory_sync_api::list_directory_groups(
        &ctx.workos,
        ListDirectoryGroupsParams {
            directory: Some(directory_id.clone()),
            limit: Some(GROUP_LIMIT),
            ..Default::default()
        },
    )
    .await
    .map_err(|e| {
        tracing::error!("Error fetching groups for directory {}: {}", directory_id, e);
        AppError::InternalError("Failed to fetch groups".to_string())
    })?;

    ctx.templates.render(
        "groups",
        &json!({
            "title": "Directory Groups",
            "groups": groups.data,
            "directory_id": directory_id,
            "first_name": user.first_name,
            "last_name": user.last_name,
        }),
    )
}
