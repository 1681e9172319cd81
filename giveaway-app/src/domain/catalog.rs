use super::{Platform, Post};
use serde::{Deserialize, Serialize};

/// A connected platform page and the credential that authorizes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub access_token: String,
}

/// Error payload of the draw service: `{"error": "..."}` or `{"error": {"message": "..."}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServiceError {
    Message(String),
    Detailed { message: String },
}

impl ServiceError {
    pub fn message(&self) -> &str {
        match self {
            Self::Message(message) | Self::Detailed { message } => message,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PagesResponse {
    #[serde(default)]
    pub data: Vec<Page>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ServiceError>,
}

impl PagesResponse {
    pub fn ok(data: Vec<Page>) -> Self {
        Self { data, error: None }
    }

    pub fn failed(error: ServiceError) -> Self {
        Self {
            data: Vec::new(),
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursors: Option<Cursors>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostsResponse {
    #[serde(default)]
    pub data: Vec<Post>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging: Option<Paging>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ServiceError>,
}

impl PostsResponse {
    pub fn ok(data: Vec<Post>, after: Option<String>) -> Self {
        Self {
            data,
            paging: after.map(|after| Paging {
                cursors: Some(Cursors { after: Some(after) }),
            }),
            error: None,
        }
    }

    pub fn failed(error: ServiceError) -> Self {
        Self {
            data: Vec::new(),
            paging: None,
            error: Some(error),
        }
    }

    pub fn next_cursor(&self) -> Option<&str> {
        self.paging
            .as_ref()
            .and_then(|paging| paging.cursors.as_ref())
            .and_then(|cursors| cursors.after.as_deref())
            .filter(|after| !after.is_empty())
    }
}

/// Parameters of one live post listing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostsQuery {
    pub page_id: String,
    pub platform: Platform,
    pub page_token: Option<String>,
    pub after: Option<String>,
}

impl PostsQuery {
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![("platform", self.platform.as_str())];
        if let Some(token) = self.page_token.as_deref() {
            pairs.push(("page_token", token));
        }
        if let Some(after) = self.after.as_deref() {
            pairs.push(("after", after));
        }
        pairs
    }
}
