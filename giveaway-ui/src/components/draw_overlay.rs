use leptos::prelude::*;

use crate::presenter::{reel_style, DrawView, REEL_ITEM_HEIGHT_PX};

/// Full-screen slot machine shown while a draw is in flight.
#[component]
pub fn DrawOverlay(draw: DrawView) -> impl IntoView {
    let style = move || reel_style(draw.reel_offset.get(), draw.spin_ms.get());

    view! {
        <Show when=move || draw.overlay_open.get()>
            <div class="overlay" role="dialog" aria-live="polite">
                <div class="overlay__machine">
                    <p class="overlay__title">"Tirage en cours..."</p>
                    <div class="reel" style=format!("height: {REEL_ITEM_HEIGHT_PX}px;")>
                        <ul class="reel__strip" style=style>
                            {move || {
                                draw.reel
                                    .get()
                                    .into_iter()
                                    .map(|name| view! { <li class="reel__item">{name}</li> })
                                    .collect::<Vec<_>>()
                            }}
                        </ul>
                    </div>
                </div>
            </div>
        </Show>
    }
}
