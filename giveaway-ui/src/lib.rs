pub mod backend;
pub mod components;
pub mod pages;
pub mod presenter;

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use pages::{DemoGiveawayPage, LiveGiveawayPage};

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Tirage au sort | Bijouterie Zaher"/>
        <Meta name="description" content="Tirage au sort des gagnants de vos concours Facebook et Instagram"/>

        <Router>
            <main class="container">
                <Routes fallback=|| "Page introuvable">
                    <Route path=path!("/") view=DemoGiveawayPage/>
                    <Route path=path!("/giveaways") view=DemoGiveawayPage/>
                    <Route path=path!("/giveaways/live") view=LiveGiveawayPage/>
                </Routes>
            </main>
        </Router>
    }
}

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
