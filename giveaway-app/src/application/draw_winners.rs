use super::eligibility::apply_filters;
use crate::domain::{Comment, DrawRequest, DrawResponse, Platform, Winner};
use crate::infrastructure::demo::{demo_posts, DemoComments};
use crate::infrastructure::meta_graph::GraphClient;
use giveaway_errors::AppError;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

/// Where the participants of one draw come from.
pub enum CommentSource<'a> {
    Demo(&'a DemoComments),
    Graph { client: &'a GraphClient, token: String },
}

impl CommentSource<'_> {
    async fn comments<R: Rng + Send>(
        &self,
        post_id: &str,
        platform: Platform,
        with_likes: bool,
        rng: &mut R,
    ) -> Result<Vec<Comment>, AppError> {
        match self {
            Self::Demo(demo) => Ok(demo.generate(post_id, rng)),
            Self::Graph { client, token } => {
                client.comments(post_id, platform, token, with_likes).await
            }
        }
    }
}

/// Fetch, filter, draw.
pub struct DrawWinners {
    demo: DemoComments,
    graph: Option<GraphClient>,
    user_token: Option<String>,
}

impl DrawWinners {
    pub fn new(demo: DemoComments, graph: Option<GraphClient>, user_token: Option<String>) -> Self {
        Self {
            demo,
            graph,
            user_token,
        }
    }

    pub async fn execute(&self, request: &DrawRequest) -> Result<DrawResponse, AppError> {
        let mut rng = StdRng::from_entropy();
        self.execute_with_rng(request, &mut rng).await
    }

    pub async fn execute_with_rng<R: Rng + Send>(
        &self,
        request: &DrawRequest,
        rng: &mut R,
    ) -> Result<DrawResponse, AppError> {
        let source = self.source(request)?;

        let mut comments = Vec::new();
        for post_id in &request.post_ids {
            let batch = source
                .comments(post_id, request.platform, request.filters.require_like, rng)
                .await?;
            comments.extend(batch);
        }

        let collected = comments.len();
        let eligible = apply_filters(comments, &request.filters)?;
        let winners = pick_winners(eligible, request.num_winners, rng);

        let draw_id = Uuid::new_v4().to_string();
        tracing::info!(
            "Draw {} on {} post(s): {} comments, {} winner(s)",
            draw_id,
            request.post_ids.len(),
            collected,
            winners.len()
        );
        Ok(DrawResponse::success(draw_id, winners))
    }

    fn source(&self, request: &DrawRequest) -> Result<CommentSource<'_>, AppError> {
        if !request.is_live {
            let known = demo_posts();
            if let Some(unknown) = request
                .post_ids
                .iter()
                .find(|id| !known.iter().any(|post| &post.id == *id))
            {
                return Err(AppError::InvalidRequest(format!(
                    "Publication de démonstration inconnue: {}",
                    unknown
                )));
            }
            return Ok(CommentSource::Demo(&self.demo));
        }

        if request.platform == Platform::Instagram && request.filters.require_like {
            return Err(AppError::InvalidFilter(
                "Instagram ne permet pas de vérifier les mentions J'aime".to_string(),
            ));
        }

        let client = self
            .graph
            .as_ref()
            .ok_or_else(|| AppError::NotConfigured("Graph API".to_string()))?;
        let token = request
            .page_token
            .clone()
            .or_else(|| self.user_token.clone())
            .ok_or_else(|| AppError::NotConfigured("FB_ACCESS_TOKEN".to_string()))?;

        Ok(CommentSource::Graph { client, token })
    }
}

/// Uniform draw without replacement of `min(count, eligible)` participants.
pub fn pick_winners<R: Rng + ?Sized>(mut eligible: Vec<Comment>, count: u32, rng: &mut R) -> Vec<Winner> {
    eligible.shuffle(rng);
    eligible.truncate(count as usize);
    eligible.into_iter().map(Winner::from).collect()
}
