use crate::application::GiveawayBackend;
use crate::domain::{
    DrawRequest, DrawResponse, PagesResponse, Platform, Post, PostsQuery, PostsResponse,
    ServiceError,
};
use giveaway_errors::AppError;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

#[cfg(not(target_arch = "wasm32"))]
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ServiceError,
}

/// HTTP client for the `/giveaways/api` endpoints.
#[derive(Clone)]
pub struct GiveawayApiClient {
    http_client: reqwest::Client,
    base_url: Url,
}

impl GiveawayApiClient {
    /// `base_url` points at the API root, e.g. `https://host/giveaways/api`.
    pub fn new(base_url: Url) -> Result<Self, AppError> {
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS));
        let http_client = builder
            .build()
            .map_err(|e| AppError::Internal(format!("HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Client for the API mounted on the given site origin.
    pub fn for_origin(origin: &str) -> Result<Self, AppError> {
        let mut base_url = Url::parse(origin)
            .map_err(|e| AppError::Internal(format!("Invalid origin '{}': {}", origin, e)))?;
        base_url.set_path("/giveaways/api");
        Self::new(base_url)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, AppError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Internal(format!("Invalid API base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn read_payload<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, AppError> {
        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message().to_string())
                .unwrap_or_else(|_| format!("Erreur HTTP {}", status.as_u16()));
            tracing::warn!("Giveaway API answered {}: {}", status, message);
            return Err(if status == StatusCode::TOO_MANY_REQUESTS {
                AppError::RateLimited(message)
            } else {
                AppError::Service(message)
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Unreadable giveaway API payload: {}", e);
            AppError::Service("Réponse invalide du serveur".to_string())
        })
    }
}

impl GiveawayBackend for GiveawayApiClient {
    async fn demo_posts(&self) -> Result<Vec<Post>, AppError> {
        let url = self.endpoint(&["demo", "posts"])?;
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(map_transport_error)?;
        Self::read_payload(response).await
    }

    async fn live_pages(&self, platform: Platform) -> Result<PagesResponse, AppError> {
        let mut url = self.endpoint(&["live", "pages"])?;
        url.query_pairs_mut()
            .append_pair("platform", platform.as_str());
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(map_transport_error)?;
        Self::read_payload(response).await
    }

    async fn live_posts(&self, query: &PostsQuery) -> Result<PostsResponse, AppError> {
        let mut url = self.endpoint(&["live", "posts", query.page_id.as_str()])?;
        url.query_pairs_mut().extend_pairs(query.query_pairs());
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(map_transport_error)?;
        Self::read_payload(response).await
    }

    async fn draw(&self, request: &DrawRequest) -> Result<DrawResponse, AppError> {
        let url = self.endpoint(&["draw"])?;
        let response = self
            .http_client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(map_transport_error)?;
        Self::read_payload(response).await
    }
}

fn map_transport_error(e: reqwest::Error) -> AppError {
    #[cfg(not(target_arch = "wasm32"))]
    if e.is_timeout() {
        return AppError::Timeout;
    }
    tracing::error!("Giveaway API request failed: {}", e);
    AppError::Network(e.to_string())
}
