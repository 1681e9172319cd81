use super::GiveawayBackend;
use crate::domain::{
    DrawTarget, LiveCredential, Page, PagesResponse, Platform, Post, PostsQuery, PostsResponse,
    Selection,
};
use giveaway_errors::AppError;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogMode {
    Demo,
    Live,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

impl ListStatus {
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// View-model of the post catalog: what can be picked and what is picked.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogState {
    mode: CatalogMode,
    platform: Platform,
    demo_posts: Option<Vec<Post>>,
    posts: Vec<Post>,
    posts_status: ListStatus,
    pages: Vec<Page>,
    pages_status: ListStatus,
    active_page: Option<Page>,
    next_cursor: Option<String>,
    selection: Selection,
}

impl CatalogState {
    pub fn new(mode: CatalogMode, platform: Platform) -> Self {
        Self {
            mode,
            platform,
            demo_posts: None,
            posts: Vec::new(),
            posts_status: ListStatus::Idle,
            pages: Vec::new(),
            pages_status: ListStatus::Idle,
            active_page: None,
            next_cursor: None,
            selection: Selection::new(),
        }
    }

    pub fn mode(&self) -> CatalogMode {
        self.mode
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn visible_posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn posts_status(&self) -> &ListStatus {
        &self.posts_status
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn pages_status(&self) -> &ListStatus {
        &self.pages_status
    }

    pub fn active_page(&self) -> Option<&Page> {
        self.active_page.as_ref()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_summary(&self) -> String {
        self.selection.summary()
    }

    pub fn can_load_more(&self) -> bool {
        self.mode == CatalogMode::Live && self.next_cursor.is_some()
    }

    /// Whether the demo list still has to be fetched and no fetch is in flight.
    pub fn needs_demo_fetch(&self) -> bool {
        self.mode == CatalogMode::Demo
            && self.demo_posts.is_none()
            && !self.posts_status.is_loading()
    }

    // -- demo mode --

    pub fn begin_demo_load(&mut self) {
        self.posts_status = ListStatus::Loading;
    }

    pub fn apply_demo_posts(&mut self, result: Result<Vec<Post>, AppError>) {
        match result {
            Ok(posts) => {
                tracing::info!("Loaded {} demo posts", posts.len());
                self.demo_posts = Some(posts);
                self.posts_status = ListStatus::Ready;
                self.refilter_demo();
            }
            Err(e) => {
                tracing::error!("Demo posts fetch failed: {}", e);
                self.posts.clear();
                self.posts_status = ListStatus::Failed(e.user_message().to_string());
            }
        }
    }

    /// Fetches the demo list on first use, otherwise only re-filters it.
    pub async fn load_demo_posts<B: GiveawayBackend>(&mut self, backend: &B) {
        if !self.needs_demo_fetch() {
            self.refilter_demo();
            return;
        }
        self.begin_demo_load();
        let result = backend.demo_posts().await;
        self.apply_demo_posts(result);
    }

    fn refilter_demo(&mut self) {
        let platform = self.platform;
        self.posts = self
            .demo_posts
            .iter()
            .flatten()
            .filter(|post| post.platform == platform)
            .cloned()
            .collect();
        self.selection
            .retain_visible(self.posts.iter().map(|post| post.id.as_str()));
    }

    // -- platform --

    /// Switches platform and clears the selection. In live mode the caller reloads pages.
    pub fn switch_platform(&mut self, platform: Platform) {
        if platform == self.platform {
            return;
        }
        tracing::debug!("Switching catalog platform to {}", platform);
        self.platform = platform;
        self.selection.clear();

        match self.mode {
            CatalogMode::Demo => self.refilter_demo(),
            CatalogMode::Live => {
                self.pages.clear();
                self.pages_status = ListStatus::Idle;
                self.reset_page_posts();
                self.active_page = None;
            }
        }
    }

    // -- live pages --

    pub fn begin_pages_load(&mut self) -> Platform {
        self.pages_status = ListStatus::Loading;
        self.platform
    }

    pub fn apply_pages(&mut self, platform: Platform, result: Result<PagesResponse, AppError>) {
        if platform != self.platform {
            tracing::debug!("Dropping stale {} pages response", platform);
            return;
        }

        self.pages.clear();
        self.active_page = None;
        self.reset_page_posts();
        self.selection.clear();

        match result {
            Ok(PagesResponse { error: Some(err), .. }) => {
                tracing::warn!("Pages listing reported an error: {}", err.message());
                self.pages_status = ListStatus::Failed(err.message().to_string());
            }
            Ok(PagesResponse { data, error: None }) => {
                tracing::info!("Loaded {} {} pages", data.len(), platform);
                self.pages = data;
                self.pages_status = ListStatus::Ready;
            }
            Err(e) => {
                tracing::error!("Pages listing failed: {}", e);
                self.pages_status = ListStatus::Failed(e.user_message().to_string());
            }
        }
    }

    pub async fn load_pages<B: GiveawayBackend>(&mut self, backend: &B) {
        let platform = self.begin_pages_load();
        let result = backend.live_pages(platform).await;
        self.apply_pages(platform, result);
    }

    // -- live posts --

    /// Makes `page_id` the active page and returns the query for its first posts.
    pub fn select_page(&mut self, page_id: &str) -> Option<PostsQuery> {
        let page = self.pages.iter().find(|page| page.id == page_id)?.clone();
        self.selection.clear();
        self.reset_page_posts();
        self.posts_status = ListStatus::Loading;

        let query = PostsQuery {
            page_id: page.id.clone(),
            platform: self.platform,
            page_token: Some(page.access_token.clone()).filter(|token| !token.is_empty()),
            after: None,
        };
        self.active_page = Some(page);
        Some(query)
    }

    /// Query for the next page of posts, reusing the active page credential.
    pub fn next_posts_query(&mut self) -> Option<PostsQuery> {
        let page = self.active_page.as_ref()?;
        let after = self.next_cursor.clone()?;
        let query = PostsQuery {
            page_id: page.id.clone(),
            platform: self.platform,
            page_token: Some(page.access_token.clone()).filter(|token| !token.is_empty()),
            after: Some(after),
        };
        self.posts_status = ListStatus::Loading;
        Some(query)
    }

    pub fn apply_posts(&mut self, query: &PostsQuery, result: Result<PostsResponse, AppError>) {
        let still_active = self
            .active_page
            .as_ref()
            .is_some_and(|page| page.id == query.page_id)
            && query.platform == self.platform;
        if !still_active {
            tracing::debug!("Dropping posts response for inactive page {}", query.page_id);
            return;
        }

        let response = match result {
            Ok(PostsResponse { error: Some(err), .. }) => {
                tracing::warn!("Posts listing reported an error: {}", err.message());
                self.fail_posts(query, err.message().to_string());
                return;
            }
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Posts listing failed for page {}: {}", query.page_id, e);
                self.fail_posts(query, e.user_message().to_string());
                return;
            }
        };

        let next_cursor = response.next_cursor().map(str::to_string);
        if query.after.is_none() {
            self.posts.clear();
        }

        let mut known: HashSet<String> = self.posts.iter().map(|post| post.id.clone()).collect();
        let before = self.posts.len();
        for mut post in response.data {
            if known.insert(post.id.clone()) {
                post.platform = query.platform;
                self.posts.push(post);
            }
        }

        tracing::info!(
            "Rendered {} new posts for page {} ({} total)",
            self.posts.len() - before,
            query.page_id,
            self.posts.len()
        );
        self.next_cursor = next_cursor;
        self.posts_status = ListStatus::Ready;
    }

    fn fail_posts(&mut self, query: &PostsQuery, message: String) {
        // a failed "load more" keeps what is rendered and the cursor for a retry
        if query.after.is_none() {
            self.posts.clear();
            self.next_cursor = None;
        }
        self.posts_status = ListStatus::Failed(message);
    }

    fn reset_page_posts(&mut self) {
        self.posts.clear();
        self.posts_status = ListStatus::Idle;
        self.next_cursor = None;
    }

    pub async fn open_page<B: GiveawayBackend>(&mut self, backend: &B, page_id: &str) {
        let Some(query) = self.select_page(page_id) else {
            tracing::warn!("Unknown page selected: {}", page_id);
            return;
        };
        let result = backend.live_posts(&query).await;
        self.apply_posts(&query, result);
    }

    pub async fn load_more<B: GiveawayBackend>(&mut self, backend: &B) {
        let Some(query) = self.next_posts_query() else {
            return;
        };
        let result = backend.live_posts(&query).await;
        self.apply_posts(&query, result);
    }

    // -- selection --

    pub fn toggle_post(&mut self, id: &str) -> bool {
        if !self.posts.iter().any(|post| post.id == id) {
            return false;
        }
        self.selection.toggle(id)
    }

    pub fn toggle_select_all(&mut self) {
        let ids: Vec<&str> = self.posts.iter().map(|post| post.id.as_str()).collect();
        self.selection.toggle_all(ids.iter().copied());
    }

    pub fn draw_target(&self) -> DrawTarget {
        let live = match self.mode {
            CatalogMode::Demo => None,
            CatalogMode::Live => self.active_page.as_ref().map(|page| LiveCredential {
                page_id: page.id.clone(),
                page_token: page.access_token.clone(),
            }),
        };
        DrawTarget {
            post_ids: self.selection.ids(),
            platform: self.platform,
            live,
        }
    }
}
