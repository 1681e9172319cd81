use giveaway_app::application::{
    CatalogMode, CatalogState, DrawOrchestrator, DrawOutcome, GiveawayBackend,
};
use giveaway_app::domain::{DrawForm, Platform, PostsQuery};
use giveaway_app::infrastructure::giveaway_api::GiveawayApiClient;
use leptos::prelude::*;
use leptos::task::spawn_local;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::rc::Rc;

use crate::backend::{api_client, BrowserClock};
use crate::components::{
    DrawOverlay, FilterPanel, NoticeBanner, PageSelector, PlatformTabs, PostGrid, WinnerCards,
};
use crate::presenter::DrawView;

type Orchestrator = DrawOrchestrator<GiveawayApiClient, BrowserClock, DrawView, StdRng>;

fn load_demo(catalog: RwSignal<CatalogState>) {
    if !catalog.with_untracked(|state| state.needs_demo_fetch()) {
        return;
    }
    catalog.update(|state| state.begin_demo_load());
    spawn_local(async move {
        let result = match api_client() {
            Ok(client) => client.demo_posts().await,
            Err(e) => Err(e),
        };
        catalog.update(|state| state.apply_demo_posts(result));
    });
}

fn load_pages(catalog: RwSignal<CatalogState>) {
    let Some(platform) = catalog.try_update(|state| state.begin_pages_load()) else {
        return;
    };
    spawn_local(async move {
        let result = match api_client() {
            Ok(client) => client.live_pages(platform).await,
            Err(e) => Err(e),
        };
        catalog.update(|state| state.apply_pages(platform, result));
    });
}

fn fetch_posts(catalog: RwSignal<CatalogState>, query: PostsQuery) {
    spawn_local(async move {
        let result = match api_client() {
            Ok(client) => client.live_posts(&query).await,
            Err(e) => Err(e),
        };
        catalog.update(|state| state.apply_posts(&query, result));
    });
}

fn open_page(catalog: RwSignal<CatalogState>, page_id: String) {
    let query = catalog
        .try_update(|state| state.select_page(&page_id))
        .flatten();
    match query {
        Some(query) => fetch_posts(catalog, query),
        None => tracing::warn!("Unknown page selected: {}", page_id),
    }
}

fn load_more(catalog: RwSignal<CatalogState>) {
    if let Some(query) = catalog.try_update(|state| state.next_posts_query()).flatten() {
        fetch_posts(catalog, query);
    }
}

fn retry_posts(catalog: RwSignal<CatalogState>) {
    match catalog.with_untracked(|state| state.mode()) {
        CatalogMode::Demo => load_demo(catalog),
        CatalogMode::Live => {
            let page = catalog.with_untracked(|state| state.active_page().map(|p| p.id.clone()));
            match page {
                Some(id) => open_page(catalog, id),
                None => load_pages(catalog),
            }
        }
    }
}

#[component]
fn GiveawayWorkspace(mode: CatalogMode) -> impl IntoView {
    let catalog = RwSignal::new(CatalogState::new(mode, Platform::Facebook));
    let form = RwSignal::new(DrawForm::default());
    let draw = DrawView::new();
    let drawing = RwSignal::new(false);

    let orchestrator: StoredValue<Option<Rc<Orchestrator>>, LocalStorage> =
        StoredValue::new_local(match api_client() {
            Ok(client) => Some(Rc::new(DrawOrchestrator::new(
                client,
                BrowserClock,
                draw,
                StdRng::from_entropy(),
            ))),
            Err(e) => {
                tracing::error!("Draw service unavailable: {}", e);
                None
            }
        });

    Effect::new(move |_| match mode {
        CatalogMode::Demo => load_demo(catalog),
        CatalogMode::Live => load_pages(catalog),
    });

    let on_switch = move |platform: Platform| {
        if drawing.get_untracked() {
            return;
        }
        catalog.update(|state| state.switch_platform(platform));
        match mode {
            CatalogMode::Demo => load_demo(catalog),
            CatalogMode::Live => load_pages(catalog),
        }
    };

    let on_draw = move |_: ()| {
        let Some(orchestrator) = orchestrator.get_value() else {
            return;
        };
        if !orchestrator.phase().accepts_trigger() {
            return;
        }
        let target = catalog.with_untracked(|state| state.draw_target());
        drawing.set(true);
        spawn_local(async move {
            let outcome = orchestrator.run(target, move || form.get_untracked()).await;
            match &outcome {
                DrawOutcome::Failed(e) => tracing::error!("Draw failed: {}", e),
                other => tracing::info!("Draw finished: {:?}", other),
            }
            drawing.set(false);
        });
    };

    view! {
        <div class="workspace">
            <PlatformTabs catalog=catalog on_switch=on_switch disabled=drawing/>

            <NoticeBanner draw=draw/>

            <Show when=move || mode == CatalogMode::Live>
                <PageSelector
                    catalog=catalog
                    on_select=move |id: String| open_page(catalog, id)
                    on_retry=move |_| load_pages(catalog)
                />
            </Show>

            <div class="workspace__body">
                <PostGrid
                    catalog=catalog
                    on_load_more=move |_| load_more(catalog)
                    on_retry=move |_| retry_posts(catalog)
                />
                <FilterPanel form=form drawing=drawing on_draw=on_draw/>
            </div>

            <WinnerCards draw=draw/>
            <DrawOverlay draw=draw/>
        </div>
    }
}

#[component]
pub fn DemoGiveawayPage() -> impl IntoView {
    view! {
        <div class="hero">
            <h1 class="hero__title">"Tirage au sort"</h1>
            <p class="hero__subtitle">
                "Mode démo : sélectionnez une ou plusieurs publications, réglez les filtres et lancez le tirage."
            </p>
            <a class="hero__link" href="/giveaways/live">"Passer en mode live →"</a>
        </div>
        <GiveawayWorkspace mode=CatalogMode::Demo/>
    }
}

#[component]
pub fn LiveGiveawayPage() -> impl IntoView {
    view! {
        <div class="hero">
            <h1 class="hero__title">"Tirage au sort en direct"</h1>
            <p class="hero__subtitle">
                "Choisissez une page, puis les publications dont les commentaires participent au tirage."
            </p>
            <a class="hero__link" href="/giveaways">"← Revenir à la démo"</a>
        </div>
        <GiveawayWorkspace mode=CatalogMode::Live/>
    }
}
