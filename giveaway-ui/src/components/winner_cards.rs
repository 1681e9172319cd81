use giveaway_app::application::{Celebration, WinnerCard};
use leptos::prelude::*;

use crate::presenter::DrawView;

const CONFETTI: &[&str] = &["🎉", "✨", "🎊", "💍", "⭐"];

#[component]
fn Card(card: WinnerCard) -> impl IntoView {
    let delay = format!("animation-delay: {}ms;", card.reveal_delay.as_millis());
    let winner = card.winner;

    view! {
        <article class="winner-card" style=delay>
            <span class="winner-card__rank">"#" {card.rank}</span>
            <img class="winner-card__avatar" src=winner.profile_pic_url alt=""/>
            <h3 class="winner-card__name">{winner.user_name}</h3>
            <p class="winner-card__text">{winner.text}</p>
        </article>
    }
}

fn burst(celebration: Celebration) -> impl IntoView {
    let (class, pieces) = match celebration {
        Celebration::Full => ("confetti confetti--full", 24),
        Celebration::Supplementary { .. } => ("confetti confetti--small", 8),
    };
    view! {
        <div class=class aria-hidden="true">
            {(0..pieces)
                .map(|i| {
                    let style = format!(
                        "left: {}%; animation-delay: {}ms;",
                        (i * 37) % 100,
                        (i * 53) % 600
                    );
                    view! { <span class="confetti__piece" style=style>{CONFETTI[i % CONFETTI.len()]}</span> }
                })
                .collect::<Vec<_>>()}
        </div>
    }
}

#[component]
pub fn WinnerCards(draw: DrawView) -> impl IntoView {
    view! {
        <section class="winners">
            <div class="winners__grid">
                {move || {
                    draw.cards
                        .get()
                        .into_iter()
                        .map(|card| view! { <Card card=card/> })
                        .collect::<Vec<_>>()
                }}
            </div>
            {move || draw.celebrations.get().into_iter().map(burst).collect::<Vec<_>>()}
        </section>
    }
}
