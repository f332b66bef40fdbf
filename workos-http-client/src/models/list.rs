use serde::{Deserialize, Serialize};

/// A page of results from a list endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct List<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub list_metadata: ListMetadata,
}

/// Pagination cursors; pass `after` back to fetch the next page.
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListMetadata {
    #[serde(default)]
    pub before: Option<String>,
    #[serde(default)]
    pub after: Option<String>,
}
