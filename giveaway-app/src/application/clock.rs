use futures::future::LocalBoxFuture;
use std::time::Duration;

/// Timer used by the draw animation; swapped for an immediate clock in tests.
pub trait Clock {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}
