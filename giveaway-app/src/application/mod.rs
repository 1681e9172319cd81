mod backend;
mod catalog_loader;
mod clock;
mod draw_orchestrator;
mod presentation;

pub use backend::GiveawayBackend;
pub use catalog_loader::{CatalogMode, CatalogState, ListStatus};
pub use clock::Clock;
pub use draw_orchestrator::{DrawOrchestrator, DrawOutcome, DrawPhase, DrawTiming};
pub use presentation::{
    Celebration, DrawPresenter, Notice, NoticeLevel, SlotReel, WinnerCard, FILLER_NAMES,
};

#[cfg(feature = "ssr")]
mod draw_winners;
#[cfg(feature = "ssr")]
mod eligibility;

#[cfg(feature = "ssr")]
pub use draw_winners::{pick_winners, CommentSource, DrawWinners};
#[cfg(feature = "ssr")]
pub use eligibility::{apply_filters, count_mentions, parse_date_limit};
