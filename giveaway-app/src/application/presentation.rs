use crate::domain::Winner;
use rand::seq::SliceRandom;
use rand::Rng;
use std::time::Duration;

pub const FILLER_NAMES: &[&str] = &[
    "Aymen", "Sarra", "Walid", "Rim", "Mehdi", "Fatma", "Khaled", "Amira", "Youssef", "Ines",
    "Zied", "Safa", "Marwen", "Nour", "Seif", "Hiba", "Oussama", "Yasmine", "Ali", "Zeineb",
];

/// Randomized decoy names, e.g. `"Hiba 42"`.
pub fn filler_names<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Vec<String> {
    (0..len)
        .map(|_| {
            let name = FILLER_NAMES.choose(rng).copied().unwrap_or("Participant");
            format!("{} {}", name, rng.gen_range(10..100))
        })
        .collect()
}

/// The slot-machine strip: decoys followed by one terminal entry for the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotReel {
    pub items: Vec<String>,
    pub spin: Duration,
}

impl SlotReel {
    pub fn build<R: Rng + ?Sized>(
        rng: &mut R,
        winners: &[Winner],
        filler_len: usize,
        spin: Duration,
    ) -> Self {
        let mut items = filler_names(rng, filler_len);
        items.push(Self::terminal_label(winners));
        Self { items, spin }
    }

    pub fn terminal_label(winners: &[Winner]) -> String {
        match winners {
            [single] => single.user_name.clone(),
            many => format!("{} gagnants trouvés !", many.len()),
        }
    }

    pub fn terminal_index(&self) -> usize {
        self.items.len().saturating_sub(1)
    }

    pub fn terminal(&self) -> &str {
        self.items.last().map(String::as_str).unwrap_or_default()
    }

    /// Scroll distance that brings the terminal entry into the viewport.
    pub fn scroll_offset(&self, item_height_px: u32) -> u32 {
        self.terminal_index() as u32 * item_height_px
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinnerCard {
    pub rank: usize,
    pub winner: Winner,
    pub reveal_delay: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Celebration {
    Full,
    Supplementary { rank: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// What the draw workflow asks the view to show.
pub trait DrawPresenter {
    fn clear_results(&self);
    fn show_overlay(&self, placeholder: Vec<String>);
    fn spin(&self, reel: &SlotReel);
    fn hide_overlay(&self);
    fn reveal(&self, card: WinnerCard);
    fn celebrate(&self, celebration: Celebration);
    fn notify(&self, notice: Notice);
}
