use super::Platform;
use serde::{Deserialize, Serialize};

/// A selectable giveaway post, from the demo catalog or a live page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    #[serde(default, alias = "message", alias = "caption")]
    pub text: String,
    #[serde(default, alias = "created_time", alias = "timestamp")]
    pub date: String,
    #[serde(
        default,
        alias = "full_picture",
        alias = "media_url",
        skip_serializing_if = "Option::is_none"
    )]
    pub picture: Option<String>,
    #[serde(default)]
    pub platform: Platform,
}

impl Post {
    pub fn new(id: impl Into<String>, text: impl Into<String>, platform: Platform) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            date: String::new(),
            picture: None,
            platform,
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn with_picture(mut self, picture: Option<String>) -> Self {
        self.picture = picture;
        self
    }

    /// Date part of the timestamp, for card display.
    pub fn display_date(&self) -> &str {
        self.date.split('T').next().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_field_names_are_accepted() {
        let post: Post = serde_json::from_str(
            r#"{"id":"123_456","message":"Gagnez un bracelet","created_time":"2026-02-01T10:00:00+0000","full_picture":"https://cdn/x.jpg"}"#,
        )
        .unwrap();

        assert_eq!(post.text, "Gagnez un bracelet");
        assert_eq!(post.display_date(), "2026-02-01");
        assert_eq!(post.picture.as_deref(), Some("https://cdn/x.jpg"));
        assert_eq!(post.platform, Platform::Facebook);
    }

    #[test]
    fn test_demo_field_names_are_accepted() {
        let post: Post = serde_json::from_str(
            r#"{"id":"post_2","text":"Diamond Ring Giveaway","date":"2026-02-10","platform":"instagram"}"#,
        )
        .unwrap();

        assert_eq!(post.platform, Platform::Instagram);
        assert_eq!(post.picture, None);
        assert_eq!(post.display_date(), "2026-02-10");
    }
}
