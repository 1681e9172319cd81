mod comments;
mod posts;

pub use comments::{DemoComments, DEMO_COMMENT_TEXTS};
pub use posts::demo_posts;
