use super::Winner;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A participant comment collected from one of the selected posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub profile_pic_url: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub is_reply: bool,
    pub has_photo: bool,
    pub liked_post: bool,
}

impl From<Comment> for Winner {
    fn from(comment: Comment) -> Self {
        Self {
            user_name: comment.user_name,
            profile_pic_url: comment.profile_pic_url,
            text: comment.text,
        }
    }
}
