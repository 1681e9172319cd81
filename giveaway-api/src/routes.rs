use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use giveaway_app::domain::{
    DrawRequest, DrawResponse, FilterConfig, PagesResponse, Platform, Post, PostsQuery,
    PostsResponse, ServiceError,
};
use giveaway_app::infrastructure::demo::demo_posts;
use giveaway_app::infrastructure::security::DrawValidator;
use giveaway_app::AppContext;
use giveaway_errors::AppError;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};

/// REST endpoints mounted under `/giveaways/api`.
pub fn api_router<S>(ctx: AppContext) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/demo/posts", get(list_demo_posts))
        .route("/live/pages", get(list_live_pages))
        .route("/live/posts/{page_id}", get(list_live_posts))
        .route("/draw", post(draw))
        .with_state(ctx)
}

#[derive(Deserialize)]
struct PagesParams {
    #[serde(default)]
    platform: Platform,
}

#[derive(Deserialize)]
struct PostsParams {
    #[serde(default)]
    platform: Platform,
    page_token: Option<String>,
    after: Option<String>,
}

/// Accepted body of `POST /draw`, including the legacy single-post shape.
#[derive(Deserialize)]
struct DrawPayload {
    #[serde(default)]
    post_ids: Vec<String>,
    post_id: Option<String>,
    #[serde(default)]
    platform: Platform,
    #[serde(default = "default_winner_count")]
    num_winners: u32,
    #[serde(default)]
    filters: FilterConfig,
    #[serde(default)]
    is_live: bool,
    #[serde(alias = "platform_token")]
    page_token: Option<String>,
}

fn default_winner_count() -> u32 {
    1
}

impl DrawPayload {
    fn into_request(self) -> DrawRequest {
        let mut post_ids = self.post_ids;
        if post_ids.is_empty() {
            post_ids.extend(self.post_id);
        }
        DrawRequest {
            post_ids,
            platform: self.platform,
            num_winners: self.num_winners,
            filters: self.filters,
            is_live: self.is_live,
            page_token: self.page_token,
        }
    }
}

fn client_ip(headers: &HeaderMap) -> IpAddr {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .and_then(|hop| hop.trim().parse().ok())
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
}

fn service_error(e: &AppError) -> ServiceError {
    ServiceError::Message(e.user_message().to_string())
}

async fn list_demo_posts() -> Json<Vec<Post>> {
    Json(demo_posts())
}

async fn list_live_pages(
    State(ctx): State<AppContext>,
    Query(params): Query<PagesParams>,
) -> Json<PagesResponse> {
    let result = match ctx.user_token() {
        Ok(token) => ctx.graph.pages(params.platform, token).await,
        Err(e) => Err(e),
    };
    Json(match result {
        Ok(pages) => PagesResponse::ok(pages),
        Err(e) => {
            tracing::warn!("Listing {} pages failed: {}", params.platform, e);
            PagesResponse::failed(service_error(&e))
        }
    })
}

async fn list_live_posts(
    State(ctx): State<AppContext>,
    Path(page_id): Path<String>,
    Query(params): Query<PostsParams>,
) -> Json<PostsResponse> {
    let page_token = params.page_token.filter(|token| !token.trim().is_empty());
    let query = PostsQuery {
        page_id,
        platform: params.platform,
        page_token,
        after: params.after.filter(|after| !after.is_empty()),
    };

    let token = match query.page_token.as_deref() {
        Some(token) => Ok(token),
        None => ctx.user_token(),
    };
    let result = match token {
        Ok(token) => ctx.graph.posts(&query, token).await,
        Err(e) => Err(e),
    };

    Json(match result {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("Listing posts of page {} failed: {}", query.page_id, e);
            PostsResponse::failed(service_error(&e))
        }
    })
}

async fn draw(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
    payload: Result<Json<DrawPayload>, JsonRejection>,
) -> Result<Json<DrawResponse>, AppError> {
    let ip = client_ip(&headers);
    ctx.rate_limiter.check_rate_limit(ip).map_err(|e| {
        tracing::warn!("Draw rate limited for {}: {}", ip, e);
        AppError::from(e)
    })?;

    let Json(payload) = payload.map_err(|e| AppError::InvalidRequest(e.body_text()))?;
    let request = DrawValidator::validate(payload.into_request())?;

    tracing::info!(
        "Draw requested: {} post(s) on {}, {} winner(s), live={}",
        request.post_ids.len(),
        request.platform,
        request.num_winners,
        request.is_live
    );

    let response = ctx.draw_winners.execute(&request).await.map_err(|e| {
        if e.is_validation() {
            tracing::warn!("Draw refused: {}", e);
        } else {
            tracing::error!("Draw failed: {}", e);
        }
        e
    })?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use giveaway_app::infrastructure::security::RateLimiter;
    use giveaway_app::GiveawayConfig;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn router() -> Router {
        api_router(AppContext::new(GiveawayConfig::default()).unwrap())
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn draw_request(body: Value) -> Request<Body> {
        Request::post("/draw")
            .header("content-type", "application/json")
            .header("x-forwarded-for", "198.51.100.4, 10.0.0.1")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_demo_posts() {
        let request = Request::get("/demo/posts").body(Body::empty()).unwrap();
        let (status, body) = send(router(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["id"], "post_1");
        assert_eq!(body[1]["platform"], "instagram");
    }

    #[tokio::test]
    async fn test_demo_draw() {
        let (status, body) = send(
            router(),
            draw_request(json!({
                "post_ids": ["post_1", "post_2"],
                "platform": "facebook",
                "num_winners": 3,
                "filters": {"include_replies": true},
                "is_live": false
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert!(!body["draw_id"].as_str().unwrap().is_empty());
        assert_eq!(body["winners"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_legacy_single_post_shape() {
        let (status, body) = send(
            router(),
            draw_request(json!({"post_id": "post_2", "platform": "instagram", "filters": {"include_replies": true}})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["winners"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_draw_is_bad_request() {
        let (status, body) = send(
            router(),
            draw_request(json!({"post_ids": ["post_1"], "num_winners": 0})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let (status, _) = send(router(), draw_request(json!({"post_ids": []}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_instagram_like_filter_refused_with_reason() {
        let (status, body) = send(
            router(),
            draw_request(json!({
                "post_ids": ["17890_123"],
                "platform": "instagram",
                "filters": {"require_like": true},
                "is_live": true,
                "page_token": "PAGE"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "Instagram ne permet pas de vérifier les mentions J'aime"
        );
    }

    #[tokio::test]
    async fn test_unreadable_body_is_bad_request() {
        let request = Request::post("/draw")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(router(), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_draws_are_rate_limited_per_client() {
        let mut ctx = AppContext::new(GiveawayConfig::default()).unwrap();
        ctx.rate_limiter = RateLimiter::with_limits(1, 10);
        let router: Router = api_router(ctx);
        let body = json!({"post_ids": ["post_1"], "filters": {"include_replies": true}});

        let (status, _) = send(router.clone(), draw_request(body.clone())).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(router, draw_request(body)).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert!(body["error"].as_str().unwrap().starts_with("Trop de tirages"));
    }

    #[tokio::test]
    async fn test_live_pages_without_token_reports_error_payload() {
        let request = Request::get("/live/pages?platform=instagram")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(router(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!([]));
        assert_eq!(
            body["error"],
            "Le mode live n'est pas configuré sur ce serveur."
        );
    }

    #[test]
    fn test_client_ip_uses_first_forwarded_hop() {
        let mut headers = HeaderMap::new();
        assert_eq!(client_ip(&headers), IpAddr::V4(Ipv4Addr::LOCALHOST));

        headers.insert("x-forwarded-for", " 203.0.113.9 , 10.0.0.2".parse().unwrap());
        assert_eq!(client_ip(&headers), "203.0.113.9".parse::<IpAddr>().unwrap());

        headers.insert("x-forwarded-for", "garbage".parse().unwrap());
        assert_eq!(client_ip(&headers), IpAddr::V4(Ipv4Addr::LOCALHOST));
    }

    #[test]
    fn test_platform_token_alias() {
        let payload: DrawPayload = serde_json::from_value(json!({
            "post_ids": ["123_456"],
            "is_live": true,
            "platform_token": "PAGE"
        }))
        .unwrap();
        let request = payload.into_request();

        assert_eq!(request.page_token.as_deref(), Some("PAGE"));
        assert_eq!(request.num_winners, 1);
        assert_eq!(request.platform, Platform::Facebook);
    }
}
