use serde::{Deserialize, Serialize};

/// The user profile returned by the SSO code exchange.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub idp_id: Option<String>,
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub connection_id: Option<String>,
    /// e.g. `OktaSAML`, `GoogleOAuth`
    #[serde(default)]
    pub connection_type: Option<String>,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub raw_attributes: serde_json::Value,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfileAndToken {
    pub access_token: String,
    pub profile: Profile,
}
