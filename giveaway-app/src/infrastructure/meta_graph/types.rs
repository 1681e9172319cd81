use crate::domain::{Comment, Cursors, Page, Paging, Post, PostsResponse, ServiceError};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashSet;

#[derive(Debug, Deserialize)]
pub struct GraphList<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub paging: Option<GraphPaging>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GraphPaging {
    #[serde(default)]
    pub cursors: Option<Cursors>,
    #[serde(default)]
    pub next: Option<String>,
}

impl<T> GraphList<T> {
    /// Absolute URL of the next page, when Graph reports one.
    pub fn next_url(&self) -> Option<&str> {
        self.paging
            .as_ref()
            .and_then(|paging| paging.next.as_deref())
            .filter(|next| !next.is_empty())
    }

    /// `after` cursor, forwarded only when a next page actually exists.
    pub fn next_cursor(&self) -> Option<String> {
        self.next_url()?;
        self.paging
            .as_ref()
            .and_then(|paging| paging.cursors.as_ref())
            .and_then(|cursors| cursors.after.clone())
    }
}

impl GraphList<Post> {
    pub fn into_posts_response(self) -> PostsResponse {
        let after = self.next_cursor();
        PostsResponse {
            data: self.data,
            paging: after.map(|after| Paging {
                cursors: Some(Cursors { after: Some(after) }),
            }),
            error: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GraphErrorEnvelope {
    pub error: ServiceError,
}

#[derive(Debug, Deserialize)]
pub struct GraphAccount {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub instagram_business_account: Option<GraphInstagramAccount>,
}

#[derive(Debug, Deserialize)]
pub struct GraphInstagramAccount {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
}

impl GraphAccount {
    pub fn into_facebook_page(self) -> Page {
        Page {
            id: self.id,
            name: self.name,
            access_token: self.access_token,
        }
    }

    /// The linked Instagram business account, reachable with the page token.
    pub fn into_instagram_page(self) -> Option<Page> {
        let account = self.instagram_business_account?;
        Some(Page {
            name: account.username.unwrap_or(self.name),
            id: account.id,
            access_token: self.access_token,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct GraphId {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct GraphUser {
    pub id: String,
    #[serde(default, alias = "username")]
    pub name: String,
    #[serde(default)]
    pub picture: Option<GraphPicture>,
}

#[derive(Debug, Deserialize)]
pub struct GraphPicture {
    pub data: GraphPictureData,
}

#[derive(Debug, Deserialize)]
pub struct GraphPictureData {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct GraphComment {
    pub id: String,
    #[serde(default, alias = "text")]
    pub message: String,
    #[serde(default, alias = "timestamp")]
    pub created_time: String,
    #[serde(default)]
    pub from: Option<GraphUser>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub parent: Option<GraphId>,
    #[serde(default)]
    pub attachment: Option<serde_json::Value>,
}

const GRAPH_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

fn parse_graph_time(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_str(raw, GRAPH_TIME_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
        .map(|time| time.with_timezone(&Utc))
}

impl GraphComment {
    pub fn into_comment(self, likers: &HashSet<String>) -> Comment {
        let timestamp = parse_graph_time(&self.created_time).unwrap_or_else(|| {
            tracing::debug!("Unparseable comment time '{}'", self.created_time);
            Utc::now()
        });

        let (user_id, user_name, picture) = match self.from {
            Some(user) => {
                let name = if user.name.is_empty() {
                    self.username.clone().unwrap_or_default()
                } else {
                    user.name
                };
                (user.id, name, user.picture.map(|p| p.data.url))
            }
            // Graph hides the author without page-level permissions
            None => (
                self.id.clone(),
                self.username.clone().unwrap_or_else(|| "Participant".to_string()),
                None,
            ),
        };

        let profile_pic_url = picture.unwrap_or_else(|| {
            let first = user_name.split(' ').next().unwrap_or_default();
            format!("https://ui-avatars.com/api/?name={first}&background=random&color=fff")
        });

        Comment {
            liked_post: likers.contains(&user_id),
            id: self.id,
            user_id,
            user_name,
            profile_pic_url,
            text: self.message,
            timestamp,
            is_reply: self.parent.is_some(),
            has_photo: self.attachment.is_some(),
        }
    }
}
