use crate::domain::{Platform, Post};

pub fn demo_posts() -> Vec<Post> {
    vec![
        Post::new(
            "post_1",
            "Win a 24k Gold Necklace! Tag 2 friends.",
            Platform::Facebook,
        )
        .with_date("2026-02-15"),
        Post::new(
            "post_2",
            "Diamond Ring Giveaway 💍 Comment your favorite emoji!",
            Platform::Instagram,
        )
        .with_date("2026-02-10"),
    ]
}
