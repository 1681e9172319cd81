use giveaway_app::application::{Celebration, DrawPresenter, Notice, SlotReel, WinnerCard};
use leptos::prelude::*;

pub const REEL_ITEM_HEIGHT_PX: u32 = 80;

/// Reactive state behind the draw overlay, result cards and notices.
#[derive(Debug, Clone, Copy)]
pub struct DrawView {
    pub overlay_open: RwSignal<bool>,
    pub reel: RwSignal<Vec<String>>,
    pub reel_offset: RwSignal<u32>,
    pub spin_ms: RwSignal<u64>,
    pub cards: RwSignal<Vec<WinnerCard>>,
    pub celebrations: RwSignal<Vec<Celebration>>,
    pub notice: RwSignal<Option<Notice>>,
}

impl DrawView {
    pub fn new() -> Self {
        Self {
            overlay_open: RwSignal::new(false),
            reel: RwSignal::new(Vec::new()),
            reel_offset: RwSignal::new(0),
            spin_ms: RwSignal::new(0),
            cards: RwSignal::new(Vec::new()),
            celebrations: RwSignal::new(Vec::new()),
            notice: RwSignal::new(None),
        }
    }

    pub fn dismiss_notice(&self) {
        self.notice.set(None);
    }
}

impl Default for DrawView {
    fn default() -> Self {
        Self::new()
    }
}

pub fn reel_style(offset_px: u32, spin_ms: u64) -> String {
    if spin_ms == 0 {
        format!("transform: translateY(-{offset_px}px); transition: none;")
    } else {
        format!(
            "transform: translateY(-{offset_px}px); transition: transform {spin_ms}ms cubic-bezier(0.15, 0.85, 0.25, 1);"
        )
    }
}

impl DrawPresenter for DrawView {
    fn clear_results(&self) {
        self.cards.set(Vec::new());
        self.celebrations.set(Vec::new());
        self.notice.set(None);
    }

    fn show_overlay(&self, placeholder: Vec<String>) {
        self.spin_ms.set(0);
        self.reel_offset.set(0);
        self.reel.set(placeholder);
        self.overlay_open.set(true);
    }

    fn spin(&self, reel: &SlotReel) {
        self.spin_ms.set(0);
        self.reel_offset.set(0);
        self.reel.set(reel.items.clone());
        self.spin_ms.set(reel.spin.as_millis() as u64);
        self.reel_offset.set(reel.scroll_offset(REEL_ITEM_HEIGHT_PX));
    }

    fn hide_overlay(&self) {
        self.overlay_open.set(false);
    }

    fn reveal(&self, card: WinnerCard) {
        self.cards.update(|cards| cards.push(card));
    }

    fn celebrate(&self, celebration: Celebration) {
        self.celebrations.update(|all| all.push(celebration));
    }

    fn notify(&self, notice: Notice) {
        self.notice.set(Some(notice));
    }
}
