use giveaway_app::application::CatalogState;
use giveaway_app::domain::Post;
use leptos::prelude::*;

use super::{ErrorDisplay, LoadingSpinner};

#[component]
fn PostCard(post: Post, catalog: RwSignal<CatalogState>) -> impl IntoView {
    let id = post.id.clone();
    let selected = {
        let id = id.clone();
        Memo::new(move |_| catalog.with(|state| state.selection().is_selected(&id)))
    };
    let date = post.display_date().to_string();

    view! {
        <button
            class=move || if selected.get() { "post-card post-card--selected" } else { "post-card" }
            aria-pressed=move || selected.get().to_string()
            on:click=move |_| {
                catalog.update(|state| {
                    state.toggle_post(&id);
                });
            }
        >
            {post.picture.map(|src| view! { <img class="post-card__picture" src=src alt=""/> })}
            <p class="post-card__text">{post.text}</p>
            <span class="post-card__meta">{post.platform.label()} " · " {date}</span>
            <span class="post-card__check">"✓"</span>
        </button>
    }
}

#[component]
pub fn PostGrid(
    catalog: RwSignal<CatalogState>,
    #[prop(into)] on_load_more: Callback<()>,
    #[prop(into)] on_retry: Callback<()>,
) -> impl IntoView {
    let posts = move || catalog.with(|state| state.visible_posts().to_vec());
    let summary = move || catalog.with(|state| state.selection_summary());
    let can_load_more = move || catalog.with(|state| state.can_load_more());
    let status = move || catalog.with(|state| state.posts_status().clone());

    view! {
        <section class="post-grid">
            <header class="post-grid__header">
                <span class="post-grid__summary">{summary}</span>
                <button
                    class="post-grid__select-all"
                    prop:disabled=move || posts().is_empty()
                    on:click=move |_| catalog.update(|state| state.toggle_select_all())
                >
                    "Tout sélectionner"
                </button>
            </header>

            <div class="post-grid__items">
                <For
                    each=posts
                    key=|post| post.id.clone()
                    children=move |post| view! { <PostCard post=post catalog=catalog/> }
                />
            </div>

            {move || {
                let status = status();
                if status.is_loading() {
                    view! { <LoadingSpinner label="Chargement des publications..."/> }.into_any()
                } else if let Some(message) = status.error() {
                    view! { <ErrorDisplay message=message.to_string() on_retry=on_retry/> }
                        .into_any()
                } else if posts().is_empty() {
                    view! { <p class="post-grid__empty">"Aucune publication à afficher."</p> }
                        .into_any()
                } else {
                    ().into_any()
                }
            }}

            <Show when=can_load_more>
                <button
                    class="post-grid__more"
                    prop:disabled=move || status().is_loading()
                    on:click=move |_| on_load_more.run(())
                >
                    "Charger plus"
                </button>
            </Show>
        </section>
    }
}
