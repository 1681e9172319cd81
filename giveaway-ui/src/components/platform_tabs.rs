use giveaway_app::application::CatalogState;
use giveaway_app::domain::Platform;
use leptos::prelude::*;

#[component]
pub fn PlatformTabs(
    catalog: RwSignal<CatalogState>,
    #[prop(into)] on_switch: Callback<Platform>,
    #[prop(into)] disabled: Signal<bool>,
) -> impl IntoView {
    let current = move || catalog.with(|state| state.platform());

    view! {
        <div class="platform-tabs" role="tablist">
            {Platform::ALL
                .into_iter()
                .map(|platform| {
                    view! {
                        <button
                            role="tab"
                            class=move || {
                                if current() == platform {
                                    "platform-tabs__tab platform-tabs__tab--active"
                                } else {
                                    "platform-tabs__tab"
                                }
                            }
                            prop:disabled=move || disabled.get()
                            on:click=move |_| on_switch.run(platform)
                        >
                            {platform.label()}
                        </button>
                    }
                })
                .collect::<Vec<_>>()}
        </div>
    }
}
