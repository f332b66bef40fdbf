use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectoryGroup {
    pub id: String,
    #[serde(default)]
    pub idp_id: Option<String>,
    pub directory_id: String,
    #[serde(default)]
    pub organization_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub raw_attributes: serde_json::Value,
}
