mod draw_validator;
mod rate_limiter;

pub use draw_validator::DrawValidator;
pub use rate_limiter::{RateLimitError, RateLimiter};
