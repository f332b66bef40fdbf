use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::configuration::Configuration;
use super::{Error, execute};
use crate::models;

#[derive(Clone, Debug, Default)]
pub struct ListDirectoriesParams {
    pub limit: Option<u32>,
    pub before: Option<String>,
    pub after: Option<String>,
    pub organization_id: Option<String>,
    pub search: Option<String>,
}

/// Exactly one of `directory` or `user` should be given.
#[derive(Clone, Debug, Default)]
pub struct ListDirectoryGroupsParams {
    pub directory: Option<String>,
    pub user: Option<String>,
    pub limit: Option<u32>,
    pub before: Option<String>,
    pub after: Option<String>,
}

/// Exactly one of `directory` or `group` should be given.
#[derive(Clone, Debug, Default)]
pub struct ListDirectoryUsersParams {
    pub directory: Option<String>,
    pub group: Option<String>,
    pub limit: Option<u32>,
    pub before: Option<String>,
    pub after: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListDirectoriesError {
    Status4XX(models::ApiErrorBody),
    UnknownValue(serde_json::Value),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GetDirectoryError {
    Status404(models::ApiErrorBody),
    UnknownValue(serde_json::Value),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListDirectoryGroupsError {
    Status4XX(models::ApiErrorBody),
    UnknownValue(serde_json::Value),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListDirectoryUsersError {
    Status4XX(models::ApiErrorBody),
    UnknownValue(serde_json::Value),
}

fn pagination(
    limit: Option<u32>,
    before: &Option<String>,
    after: &Option<String>,
) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if let Some(limit) = limit {
        query.push(("limit", limit.to_string()));
    }
    if let Some(before) = before {
        query.push(("before", before.clone()));
    }
    if let Some(after) = after {
        query.push(("after", after.clone()));
    }
    query
}

pub async fn list_directories(
    configuration: &Configuration,
    params: ListDirectoriesParams,
) -> Result<models::List<models::Directory>, Error<ListDirectoriesError>> {
    let mut query = pagination(params.limit, &params.before, &params.after);
    if let Some(organization_id) = params.organization_id {
        query.push(("organization_id", organization_id));
    }
    if let Some(search) = params.search {
        query.push(("search", search));
    }

    let req_builder = configuration
        .request(Method::GET, "directories")
        .query(&query);
    execute(req_builder).await
}

/// Fetches a single directory. An unknown id is reported by the API as 404,
/// see [`Error::is_not_found`].
pub async fn get_directory(
    configuration: &Configuration,
    id: &str,
) -> Result<models::Directory, Error<GetDirectoryError>> {
    let url = configuration.endpoint_with_segment("directories", id)?;
    execute(configuration.request_url(Method::GET, url)).await
}

pub async fn list_directory_groups(
    configuration: &Configuration,
    params: ListDirectoryGroupsParams,
) -> Result<models::List<models::DirectoryGroup>, Error<ListDirectoryGroupsError>> {
    let mut query = pagination(params.limit, &params.before, &params.after);
    match (params.directory, params.user) {
        (Some(directory), _) => query.push(("directory", directory)),
        (None, Some(user)) => query.push(("user", user)),
        (None, None) => {
            return Err(Error::Incomplete(
                "need to specify either a 'directory' or 'user'".to_string(),
            ));
        }
    }

    let req_builder = configuration
        .request(Method::GET, "directory_groups")
        .query(&query);
    execute(req_builder).await
}

pub async fn list_directory_users(
    configuration: &Configuration,
    params: ListDirectoryUsersParams,
) -> Result<models::List<models::DirectoryUser>, Error<ListDirectoryUsersError>> {
    let mut query = pagination(params.limit, &params.before, &params.after);
    match (params.directory, params.group) {
        (Some(directory), _) => query.push(("directory", directory)),
        (None, Some(group)) => query.push(("group", group)),
        (None, None) => {
            return Err(Error::Incomplete(
                "need to specify either a 'directory' or 'group'".to_string(),
            ));
        }
    }

    let req_builder = configuration
        .request(Method::GET, "directory_users")
        .query(&query);
    execute(req_builder).await
}
