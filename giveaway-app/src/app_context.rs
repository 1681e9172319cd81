use crate::application::DrawWinners;
use crate::infrastructure::demo::DemoComments;
use crate::infrastructure::meta_graph::GraphClient;
use crate::infrastructure::security::RateLimiter;
use giveaway_errors::AppError;
use std::sync::Arc;
use url::Url;

const DEFAULT_GRAPH_API_BASE: &str = "https://graph.facebook.com/v19.0";
const DEFAULT_DEMO_COMMENT_COUNT: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiveawayConfig {
    pub fb_access_token: Option<String>,
    pub graph_api_base: String,
    pub demo_comment_count: usize,
}

impl Default for GiveawayConfig {
    fn default() -> Self {
        Self {
            fb_access_token: None,
            graph_api_base: DEFAULT_GRAPH_API_BASE.to_string(),
            demo_comment_count: DEFAULT_DEMO_COMMENT_COUNT,
        }
    }
}

impl GiveawayConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let demo_comment_count = match non_empty("DEMO_COMMENT_COUNT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!("Ignoring invalid DEMO_COMMENT_COUNT '{}'", raw);
                defaults.demo_comment_count
            }),
            None => defaults.demo_comment_count,
        };

        Self {
            fb_access_token: non_empty("FB_ACCESS_TOKEN"),
            graph_api_base: non_empty("GRAPH_API_BASE").unwrap_or(defaults.graph_api_base),
            demo_comment_count,
        }
    }

    pub fn live_enabled(&self) -> bool {
        self.fb_access_token.is_some()
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub draw_winners: Arc<DrawWinners>,
    pub graph: GraphClient,
    pub rate_limiter: RateLimiter,
    pub config: Arc<GiveawayConfig>,
}

impl AppContext {
    pub fn new(config: GiveawayConfig) -> Result<Self, AppError> {
        let base = Url::parse(&config.graph_api_base).map_err(|e| {
            AppError::NotConfigured(format!("GRAPH_API_BASE '{}': {}", config.graph_api_base, e))
        })?;
        let graph = GraphClient::new(base)?;

        Ok(Self {
            draw_winners: Arc::new(DrawWinners::new(
                DemoComments::new(config.demo_comment_count),
                Some(graph.clone()),
                config.fb_access_token.clone(),
            )),
            graph,
            rate_limiter: RateLimiter::new(),
            config: Arc::new(config),
        })
    }

    pub fn from_env() -> Result<Self, AppError> {
        let config = GiveawayConfig::from_env();
        if config.live_enabled() {
            tracing::info!("Live mode enabled against {}", config.graph_api_base);
        } else {
            tracing::info!("FB_ACCESS_TOKEN not set, live pages listing disabled");
        }
        Self::new(config)
    }

    /// User-level token for listing pages, if configured.
    pub fn user_token(&self) -> Result<&str, AppError> {
        self.config
            .fb_access_token
            .as_deref()
            .ok_or_else(|| AppError::NotConfigured("FB_ACCESS_TOKEN".to_string()))
    }
}
