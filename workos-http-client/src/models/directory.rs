use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Directory {
    pub id: String,
    #[serde(default)]
    pub domain: Option<String>,
    pub name: String,
    #[serde(default)]
    pub organization_id: Option<String>,
    pub state: DirectoryState,
    /// Provider kind, e.g. `okta scim v2.0` or `gsuite directory`
    #[serde(rename = "type")]
    pub directory_type: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectoryState {
    Active,
    Linked,
    Unlinked,
    Inactive,
    Validating,
    InvalidCredentials,
    Deleting,
    #[serde(other)]
    Unknown,
}
