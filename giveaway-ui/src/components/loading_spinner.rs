use leptos::prelude::*;

#[component]
pub fn LoadingSpinner(#[prop(into)] label: String) -> impl IntoView {
    view! {
        <div class="loading">
            <div class="loading__spinner"></div>
            <p class="loading__text">{label}</p>
        </div>
    }
}
