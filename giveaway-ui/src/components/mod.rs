mod draw_overlay;
mod filter_form;
mod loading_spinner;
mod notice_banner;
mod page_selector;
mod platform_tabs;
mod post_grid;
mod winner_cards;

pub use draw_overlay::DrawOverlay;
pub use filter_form::FilterPanel;
pub use loading_spinner::LoadingSpinner;
pub use notice_banner::{ErrorDisplay, NoticeBanner};
pub use page_selector::PageSelector;
pub use platform_tabs::PlatformTabs;
pub use post_grid::PostGrid;
pub use winner_cards::WinnerCards;
