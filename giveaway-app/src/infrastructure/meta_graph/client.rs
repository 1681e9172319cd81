use super::types::{GraphAccount, GraphComment, GraphErrorEnvelope, GraphId, GraphList};
use crate::domain::{Comment, Page, Platform, Post, PostsQuery, PostsResponse};
use giveaway_errors::AppError;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

const REQUEST_TIMEOUT_SECS: u64 = 30;
const PAGE_SIZE: &str = "100";
const POSTS_PAGE_SIZE: &str = "25";
const MAX_FOLLOWED_PAGES: usize = 50;

const ACCOUNT_FIELDS: &str = "id,name,access_token,instagram_business_account{id,username}";
const FACEBOOK_POST_FIELDS: &str = "id,message,created_time,full_picture";
const INSTAGRAM_POST_FIELDS: &str = "id,caption,timestamp,media_url";
const FACEBOOK_COMMENT_FIELDS: &str = "id,message,created_time,from{id,name,picture},parent{id},attachment";
const INSTAGRAM_COMMENT_FIELDS: &str = "id,text,timestamp,username,from{id,username}";

/// Read-only client for the Meta Graph API.
#[derive(Clone)]
pub struct GraphClient {
    http_client: reqwest::Client,
    base_url: Url,
}

impl GraphClient {
    pub fn new(base_url: Url) -> Result<Self, AppError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Internal(format!("HTTP client: {}", e)))?;
        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Pages managed by the user token; on Instagram, their linked business accounts.
    pub async fn pages(&self, platform: Platform, user_token: &str) -> Result<Vec<Page>, AppError> {
        let mut url = self.endpoint(&["me", "accounts"])?;
        url.query_pairs_mut()
            .append_pair("fields", ACCOUNT_FIELDS)
            .append_pair("access_token", user_token);

        let accounts: Vec<GraphAccount> = self.collect_all(url).await?;
        let pages: Vec<Page> = match platform {
            Platform::Facebook => accounts
                .into_iter()
                .map(GraphAccount::into_facebook_page)
                .collect(),
            Platform::Instagram => accounts
                .into_iter()
                .filter_map(GraphAccount::into_instagram_page)
                .collect(),
        };
        tracing::info!("Graph returned {} {} pages", pages.len(), platform);
        Ok(pages)
    }

    pub async fn posts(&self, query: &PostsQuery, token: &str) -> Result<PostsResponse, AppError> {
        let (edge, fields) = match query.platform {
            Platform::Facebook => ("posts", FACEBOOK_POST_FIELDS),
            Platform::Instagram => ("media", INSTAGRAM_POST_FIELDS),
        };
        let mut url = self.endpoint(&[query.page_id.as_str(), edge])?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("fields", fields)
                .append_pair("limit", POSTS_PAGE_SIZE)
                .append_pair("access_token", token);
            if let Some(after) = query.after.as_deref() {
                pairs.append_pair("after", after);
            }
        }

        let list: GraphList<Post> = self.get_json(url).await?;
        let mut response = list.into_posts_response();
        for post in &mut response.data {
            post.platform = query.platform;
        }
        Ok(response)
    }

    /// Every comment of a post, following `paging.next` to the end.
    pub async fn comments(
        &self,
        post_id: &str,
        platform: Platform,
        token: &str,
        with_likes: bool,
    ) -> Result<Vec<Comment>, AppError> {
        let likers = if with_likes {
            self.likers(post_id, token).await?
        } else {
            HashSet::new()
        };

        let fields = match platform {
            Platform::Facebook => FACEBOOK_COMMENT_FIELDS,
            Platform::Instagram => INSTAGRAM_COMMENT_FIELDS,
        };
        let mut url = self.endpoint(&[post_id, "comments"])?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("fields", fields)
                .append_pair("limit", PAGE_SIZE)
                .append_pair("access_token", token);
            if platform == Platform::Facebook {
                pairs.append_pair("filter", "stream");
            }
        }

        let raw: Vec<GraphComment> = self.collect_all(url).await?;
        tracing::info!("Fetched {} comments for post {}", raw.len(), post_id);
        Ok(raw
            .into_iter()
            .map(|comment| comment.into_comment(&likers))
            .collect())
    }

    /// User ids that reacted to a Facebook post.
    pub async fn likers(&self, post_id: &str, token: &str) -> Result<HashSet<String>, AppError> {
        let mut url = self.endpoint(&[post_id, "reactions"])?;
        url.query_pairs_mut()
            .append_pair("fields", "id")
            .append_pair("limit", PAGE_SIZE)
            .append_pair("access_token", token);

        let reactions: Vec<GraphId> = self.collect_all(url).await?;
        Ok(reactions.into_iter().map(|r| r.id).collect())
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, AppError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Internal(format!("Invalid Graph base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn collect_all<T: DeserializeOwned>(&self, first: Url) -> Result<Vec<T>, AppError> {
        let mut items = Vec::new();
        let mut next = Some(first);
        let mut followed = 0;

        while let Some(url) = next.take() {
            let page: GraphList<T> = self.get_json(url).await?;
            next = page.next_url().and_then(|raw| Url::parse(raw).ok());
            items.extend(page.data);

            followed += 1;
            if followed >= MAX_FOLLOWED_PAGES && next.is_some() {
                tracing::warn!("Stopping Graph pagination after {} pages", followed);
                break;
            }
        }
        Ok(items)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, AppError> {
        let path = url.path().to_string();
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;

        if !status.is_success() {
            let message = serde_json::from_str::<GraphErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message().to_string())
                .unwrap_or_else(|_| format!("Graph API error: {}", status));
            tracing::error!("Graph API error on {}: {} - {}", path, status, message);
            return Err(AppError::Upstream(message));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Unexpected Graph payload on {}: {}", path, e);
            AppError::Upstream(format!("Réponse inattendue de la plateforme: {}", e))
        })
    }
}

fn map_transport_error(e: reqwest::Error) -> AppError {
    if e.is_timeout() {
        AppError::Timeout
    } else {
        AppError::Network(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    async fn spawn_graph(router: Router) -> GraphClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        GraphClient::new(Url::parse(&format!("http://{addr}/v19.0")).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_comments_collects_every_page() {
        let router = Router::new().route(
            "/v19.0/{post}/comments",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                let port = q.get("port").cloned().unwrap_or_default();
                if q.contains_key("after") {
                    Json(json!({"data":[{"id":"c3","message":"third","from":{"id":"u3","name":"Ali"}}]}))
                } else {
                    Json(json!({
                        "data":[{"id":"c1","message":"first","from":{"id":"u1","name":"Rim"}}],
                        "paging":{"cursors":{"after":"X"},"next":format!("http://127.0.0.1:{port}/v19.0/p/comments?after=X")}
                    }))
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        let client =
            GraphClient::new(Url::parse(&format!("http://127.0.0.1:{port}/v19.0")).unwrap())
                .unwrap();

        let mut first = client.endpoint(&["p", "comments"]).unwrap();
        first.query_pairs_mut().append_pair("port", &port.to_string());
        let raw: Vec<GraphComment> = client.collect_all(first).await.unwrap();

        let ids: Vec<_> = raw.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c3"]);
    }

    #[tokio::test]
    async fn test_instagram_pages_keep_linked_accounts_only() {
        let client = spawn_graph(Router::new().route(
            "/v19.0/me/accounts",
            get(|| async {
                Json(json!({"data":[
                    {"id":"p1","name":"Shop","access_token":"T1","instagram_business_account":{"id":"ig1"}},
                    {"id":"p2","name":"Blog","access_token":"T2"}
                ]}))
            }),
        ))
        .await;

        let ig = client.pages(Platform::Instagram, "USER").await.unwrap();
        let fb = client.pages(Platform::Facebook, "USER").await.unwrap();

        assert_eq!(ig.len(), 1);
        assert_eq!(ig[0].id, "ig1");
        assert_eq!(ig[0].name, "Shop");
        assert_eq!(fb.len(), 2);
    }

    #[tokio::test]
    async fn test_posts_use_media_edge_for_instagram() {
        let client = spawn_graph(Router::new().route(
            "/v19.0/{account}/media",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                assert_eq!(q.get("after").map(String::as_str), Some("CUR"));
                Json(json!({"data":[{"id":"m1","caption":"Bague","timestamp":"2026-02-10T10:00:00+0000","media_url":"https://cdn/m1.jpg"}]}))
            }),
        ))
        .await;

        let query = PostsQuery {
            page_id: "ig1".into(),
            platform: Platform::Instagram,
            page_token: Some("PT".into()),
            after: Some("CUR".into()),
        };
        let response = client.posts(&query, "PT").await.unwrap();

        assert_eq!(response.data[0].text, "Bague");
        assert_eq!(response.data[0].platform, Platform::Instagram);
        assert_eq!(response.data[0].picture.as_deref(), Some("https://cdn/m1.jpg"));
        assert_eq!(response.next_cursor(), None);
    }

    #[tokio::test]
    async fn test_graph_error_message_is_surfaced() {
        let client = spawn_graph(Router::new().route(
            "/v19.0/me/accounts",
            get(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json::<Value>(json!({"error":{"message":"Invalid OAuth access token.","code":190}})),
                )
            }),
        ))
        .await;

        let err = client.pages(Platform::Facebook, "BAD").await.unwrap_err();
        assert_eq!(err, AppError::Upstream("Invalid OAuth access token.".into()));
    }
}
