use serde::{Deserialize, Serialize};

use super::DirectoryGroup;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectoryUser {
    pub id: String,
    #[serde(default)]
    pub idp_id: Option<String>,
    pub directory_id: String,
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub emails: Vec<DirectoryUserEmail>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub groups: Vec<DirectoryGroup>,
    pub state: DirectoryUserState,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub custom_attributes: serde_json::Value,
}

impl DirectoryUser {
    /// The explicit `email` field, falling back to the primary entry of `emails`.
    pub fn primary_email(&self) -> Option<&str> {
        self.email.as_deref().or_else(|| {
            self.emails
                .iter()
                .find(|e| e.primary)
                .and_then(|e| e.value.as_deref())
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectoryUserEmail {
    #[serde(default)]
    pub primary: bool,
    #[serde(rename = "type", default)]
    pub email_type: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectoryUserState {
    Active,
    Inactive,
    Suspended,
    #[serde(other)]
    Unknown,
}
