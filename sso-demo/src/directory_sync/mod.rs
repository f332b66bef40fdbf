//! Read-only Directory Sync views. All routes here sit behind
//! [`crate::auth::require_login`].

pub mod directories;
pub mod groups;
pub mod users;

use serde::Deserialize;

use crate::error::AppError;

/// Directories fetched for `/directory-info`
pub const DIRECTORY_LIMIT: u32 = 10;
/// Groups fetched per directory
pub const GROUP_LIMIT: u32 = 100;
pub const USER_LIMIT: u32 = 100;

#[derive(Debug, Deserialize)]
pub struct DirectoryQuery {
    pub id: Option<String>,
}

impl DirectoryQuery {
    /// The directory id, or 400 when it is missing or blank
    pub fn require_id(self) -> Result<String, AppError> {
        self.id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::BadRequest("Directory ID is required".to_string()))
    }
}
