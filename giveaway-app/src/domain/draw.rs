use super::{FilterConfig, Platform, ServiceError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveCredential {
    pub page_id: String,
    pub page_token: String,
}

/// Snapshot of what the catalog has selected when a draw is triggered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawTarget {
    pub post_ids: Vec<String>,
    pub platform: Platform,
    pub live: Option<LiveCredential>,
}

impl DrawTarget {
    pub fn has_valid_selection(&self) -> bool {
        !self.post_ids.is_empty() && self.post_ids.iter().all(|id| !id.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRequest {
    pub post_ids: Vec<String>,
    pub platform: Platform,
    pub num_winners: u32,
    pub filters: FilterConfig,
    pub is_live: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

impl DrawRequest {
    pub fn new(target: &DrawTarget, num_winners: u32, filters: FilterConfig) -> Self {
        Self {
            post_ids: target.post_ids.clone(),
            platform: target.platform,
            num_winners,
            filters,
            is_live: target.live.is_some(),
            page_token: target.live.as_ref().map(|live| live.page_token.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    pub user_name: String,
    #[serde(default)]
    pub profile_pic_url: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draw_id: Option<String>,
    #[serde(default)]
    pub winners: Option<Vec<Winner>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ServiceError>,
}

impl DrawResponse {
    pub fn success(draw_id: String, winners: Vec<Winner>) -> Self {
        Self {
            status: Some("success".to_string()),
            draw_id: Some(draw_id),
            winners: Some(winners),
            error: None,
        }
    }

    /// Winners in presentation order; absent and empty lists both mean no match.
    pub fn into_winners(self) -> Vec<Winner> {
        self.winners.unwrap_or_default()
    }
}
