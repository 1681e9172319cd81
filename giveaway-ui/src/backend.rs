use futures::channel::oneshot;
use futures::future::LocalBoxFuture;
use giveaway_app::application::Clock;
use giveaway_app::infrastructure::giveaway_api::GiveawayApiClient;
use giveaway_errors::AppError;
use leptos::prelude::*;
use std::time::Duration;

#[cfg(not(feature = "hydrate"))]
const FALLBACK_ORIGIN: &str = "http://127.0.0.1:3000";

/// Client for the draw service on the origin that served the page.
pub fn api_client() -> Result<GiveawayApiClient, AppError> {
    #[cfg(feature = "hydrate")]
    let origin = location()
        .origin()
        .map_err(|_| AppError::Internal("window.location.origin unavailable".to_string()))?;

    #[cfg(not(feature = "hydrate"))]
    let origin = FALLBACK_ORIGIN.to_string();

    GiveawayApiClient::for_origin(&origin)
}

/// `setTimeout`-backed clock for the reel animation.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        let (tx, rx) = oneshot::channel::<()>();
        set_timeout(
            move || {
                let _ = tx.send(());
            },
            duration,
        );
        Box::pin(async move {
            let _ = rx.await;
        })
    }
}
