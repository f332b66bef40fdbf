use axum::{
    Extension, Json,
    extract::{Path, State},
    response::Html,
};
use serde::Serialize;
use serde_json::json;
use workos_http_client::apis::directory_sync_api::{
    self, ListDirectoriesParams, ListDirectoryGroupsParams,
};
use workos_http_client::models::{Directory, DirectoryGroup};

use super::{DIRECTORY_LIMIT, GROUP_LIMIT};
use crate::auth::CurrentUser;
use crate::context::Ctx;
use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct DirectoryInfoResponse {
    pub success: bool,
    pub directories: Vec<Directory>,
    pub groups: Vec<DirectoryGroup>,
}

/// List the organization's directories together with all of their groups.
/// A directory whose groups cannot be fetched is logged and skipped.
pub async fn directory_info(State(ctx): State<Ctx>) -> Result<Json<DirectoryInfoResponse>, AppError> {
    let directories = directory_sync_api::list_directories(
        &ctx.workos,
        ListDirectoriesParams {
            limit: Some(DIRECTORY_LIMIT),
            ..Default::default()
        },
    )
    .await
    .map_err(|e| {
        tracing::error!("Error fetching directory info: {}", e);
        AppError::InternalError("Failed to fetch directory information".to_string())
    })?
    .data;

    let mut groups = Vec::new();
    for directory in &directories {
        match directory_sync_api::list_directory_groups(
            &ctx.workos,
            ListDirectoryGroupsParams {
                directory: Some(directory.id.clone()),
                limit: Some(GROUP_LIMIT),
                ..Default::default()
            },
        )
        .await
        {
            Ok(page) => groups.extend(page.data),
            Err(e) => {
                tracing::error!("Error fetching groups for directory {}: {}", directory.id, e);
            }
        }
    }

    Ok(Json(DirectoryInfoResponse {
        success: true,
        directories,
        groups,
    }))
}

/// Show one directory's details
pub async fn directory_details(
    State(ctx): State<Ctx>,
    Extension(user): Extension<CurrentUser>,
    Path(directory_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let directory = directory_sync_api::get_directory(&ctx.workos, &directory_id)
        .await
        .map_err(|e| {
            if e.is_not_found() {
                tracing::info!("Directory {} not found", directory_id);
                AppError::NotFound("Directory not found".to_string())
            } else {
                tracing::error!("Error fetching directory details: {}", e);
                AppError::InternalError("Failed to fetch directory details".to_string())
            }
        })?;

    ctx.templates.render(
        "directory_details",
        &json!({
            "title": "Directory Details",
            "directory": directory,
            "first_name": user.first_name,
            "last_name": user.last_name,
        }),
    )
}
