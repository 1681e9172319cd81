use giveaway_app::application::NoticeLevel;
use leptos::prelude::*;

use crate::presenter::DrawView;

#[component]
pub fn ErrorDisplay(
    #[prop(into)] message: String,
    #[prop(optional)] on_retry: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <div class="error">
            <p class="error__title">"Oups, un problème est survenu"</p>
            <p class="error__message">{message}</p>
            {move || on_retry.map(|retry| view! {
                <button
                    class="error__retry"
                    on:click=move |_| retry.run(())
                >
                    "Réessayer"
                </button>
            })}
        </div>
    }
}

/// Dismissible warning or error raised by the draw workflow.
#[component]
pub fn NoticeBanner(draw: DrawView) -> impl IntoView {
    move || {
        draw.notice.get().map(|notice| {
            let class = match notice.level {
                NoticeLevel::Warning => "notice notice--warning",
                NoticeLevel::Error => "notice notice--error",
            };
            view! {
                <div class=class role="alert">
                    <span class="notice__message">{notice.message}</span>
                    <button class="notice__close" on:click=move |_| draw.dismiss_notice()>
                        "×"
                    </button>
                </div>
            }
        })
    }
}
