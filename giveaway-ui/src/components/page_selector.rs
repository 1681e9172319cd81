use giveaway_app::application::CatalogState;
use leptos::prelude::*;

use super::{ErrorDisplay, LoadingSpinner};

#[component]
pub fn PageSelector(
    catalog: RwSignal<CatalogState>,
    #[prop(into)] on_select: Callback<String>,
    #[prop(into)] on_retry: Callback<()>,
) -> impl IntoView {
    let status = move || catalog.with(|state| state.pages_status().clone());
    let active_id = move || {
        catalog.with(|state| state.active_page().map(|page| page.id.clone()).unwrap_or_default())
    };

    move || {
        let status = status();
        if status.is_loading() {
            return view! { <LoadingSpinner label="Chargement des pages..."/> }.into_any();
        }
        if let Some(message) = status.error() {
            return view! { <ErrorDisplay message=message.to_string() on_retry=on_retry/> }.into_any();
        }

        let pages = catalog.with(|state| state.pages().to_vec());
        if pages.is_empty() {
            return view! {
                <p class="page-selector__empty">"Aucune page connectée pour cette plateforme."</p>
            }
            .into_any();
        }

        view! {
            <label class="page-selector">
                <span class="page-selector__label">"Page"</span>
                <select
                    class="page-selector__select"
                    on:change=move |ev| {
                        let id = event_target_value(&ev);
                        if !id.is_empty() {
                            on_select.run(id);
                        }
                    }
                >
                    <option value="" selected=move || active_id().is_empty()>
                        "Choisissez une page"
                    </option>
                    {pages
                        .into_iter()
                        .map(|page| {
                            let id = page.id.clone();
                            view! {
                                <option value=page.id selected=move || active_id() == id>
                                    {page.name}
                                </option>
                            }
                        })
                        .collect::<Vec<_>>()}
                </select>
            </label>
        }
        .into_any()
    }
}
