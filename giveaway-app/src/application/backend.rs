use crate::domain::{DrawRequest, DrawResponse, PagesResponse, Platform, Post, PostsQuery, PostsResponse};
use giveaway_errors::AppError;

/// The remote draw service as seen from the browser.
///
/// `Err` is reserved for transport failures and non-JSON answers; a
/// service-reported `error` field comes back inside the `Ok` payload.
#[allow(async_fn_in_trait)]
pub trait GiveawayBackend {
    async fn demo_posts(&self) -> Result<Vec<Post>, AppError>;

    async fn live_pages(&self, platform: Platform) -> Result<PagesResponse, AppError>;

    async fn live_posts(&self, query: &PostsQuery) -> Result<PostsResponse, AppError>;

    async fn draw(&self, request: &DrawRequest) -> Result<DrawResponse, AppError>;
}
