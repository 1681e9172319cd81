use crate::application::FILLER_NAMES;
use crate::domain::Comment;
use chrono::{Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

pub const DEMO_COMMENT_TEXTS: &[&str] = &[
    "Participate! @friend1 @friend2",
    "I love this Bijoux! 😍",
    "Moi svp!",
    "Top! @someone",
    "J'espère gagner! 🙏",
    "Magnifique collection",
    "Tagging my bestie @bff",
    "C'est pour moi ça!",
    "Très beau",
    "InchaAllah je gagne @brother @sister",
];

const DEMO_USER_POOL: u32 = 40;

/// Simulated participants for demo posts.
#[derive(Debug, Clone, Copy)]
pub struct DemoComments {
    count: usize,
}

impl DemoComments {
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    pub fn generate<R: Rng + ?Sized>(&self, post_id: &str, rng: &mut R) -> Vec<Comment> {
        let now = Utc::now();
        (0..self.count)
            .map(|i| {
                let first = FILLER_NAMES.choose(rng).copied().unwrap_or("Participant");
                let user_name = format!("{} {}", first, rng.gen_range(10..100));
                let mut text = DEMO_COMMENT_TEXTS
                    .choose(rng)
                    .copied()
                    .unwrap_or_default()
                    .to_string();
                if rng.gen_bool(0.1) {
                    text.push_str(" @random_friend");
                }

                Comment {
                    id: format!("{post_id}_comment_{i}"),
                    user_id: format!("user_{}", rng.gen_range(1..=DEMO_USER_POOL)),
                    profile_pic_url: format!(
                        "https://ui-avatars.com/api/?name={first}&background=random&color=fff"
                    ),
                    user_name,
                    text,
                    timestamp: now - Duration::minutes(rng.gen_range(0..60 * 24 * 7)),
                    is_reply: rng.gen_bool(0.15),
                    has_photo: rng.gen_bool(0.2),
                    liked_post: rng.gen_bool(0.7),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_generates_requested_count_from_user_pool() {
        let mut rng = StdRng::seed_from_u64(42);
        let comments = DemoComments::new(50).generate("post_1", &mut rng);

        assert_eq!(comments.len(), 50);
        let users: HashSet<_> = comments.iter().map(|c| c.user_id.as_str()).collect();
        assert!(users.len() <= DEMO_USER_POOL as usize);
        assert!(comments.iter().all(|c| c.id.starts_with("post_1_comment_")));
    }

    #[test]
    fn test_avatar_uses_first_name() {
        let mut rng = StdRng::seed_from_u64(1);
        for comment in DemoComments::new(10).generate("post_2", &mut rng) {
            let first = comment.user_name.split(' ').next().unwrap();
            assert!(comment.profile_pic_url.contains(&format!("name={first}&")));
        }
    }
}
