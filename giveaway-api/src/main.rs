#![recursion_limit = "256"]

mod routes;

use axum::Router;
use giveaway_app::AppContext;
use giveaway_ui::App;
use leptos::prelude::*;
use leptos_axum::{generate_route_list, LeptosRoutes};
use tower_http::compression::CompressionLayer;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let conf = get_configuration(Some("Cargo.toml")).expect("Failed to load Leptos config");
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;

    let app_context = match AppContext::from_env() {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::error!("Failed to initialize giveaway service: {}", e);
            std::process::exit(1);
        }
    };

    let routes = generate_route_list(App);

    let app = Router::new()
        .nest("/giveaways/api", routes::api_router(app_context))
        .leptos_routes(&leptos_options, routes, {
            let leptos_options = leptos_options.clone();
            move || shell(leptos_options.clone())
        })
        .fallback(leptos_axum::file_and_error_handler(shell))
        .layer(CompressionLayer::new())
        .with_state(leptos_options);

    tracing::info!("Listening on http://{}", addr);
    tracing::info!("Security: draw rate limit 10/min, 100/hour per client");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}

fn shell(options: LeptosOptions) -> impl IntoView {
    use leptos_meta::*;

    let css = r#"
        :root {
            --base: #faf4ed;
            --surface: #fffaf3;
            --overlay: #f2e9e1;
            --muted: #9893a5;
            --subtle: #797593;
            --text: #575279;
            --love: #b4637a;
            --gold: #ea9d34;
            --pine: #286983;
            --foam: #56949f;
        }
        * { box-sizing: border-box; margin: 0; padding: 0; }
        body {
            font-family: 'Inter', -apple-system, sans-serif;
            background: var(--base);
            color: var(--text);
            min-height: 100vh;
        }
        button { font: inherit; }
        .container { max-width: 1100px; margin: 0 auto; padding: 1.5rem; }
        .hero { text-align: center; padding: 2.5rem 0 1.5rem; }
        .hero__title { font-size: clamp(2rem, 5vw, 3rem); color: var(--gold); font-weight: 800; margin-bottom: 0.75rem; }
        .hero__subtitle { color: var(--subtle); font-size: 1.05rem; max-width: 560px; margin: 0 auto 1rem; }
        .hero__link { color: var(--pine); font-weight: 600; text-decoration: none; }

        .platform-tabs { display: flex; gap: 0.5rem; justify-content: center; margin: 1rem 0; }
        .platform-tabs__tab {
            padding: 0.6rem 1.4rem; border: 2px solid var(--overlay); border-radius: 999px;
            background: var(--surface); color: var(--text); cursor: pointer; font-weight: 600;
        }
        .platform-tabs__tab--active { background: var(--pine); border-color: var(--pine); color: var(--base); }
        .platform-tabs__tab:disabled { opacity: 0.6; cursor: not-allowed; }

        .notice { display: flex; justify-content: space-between; align-items: center; gap: 1rem; padding: 0.9rem 1.1rem; border-radius: 8px; margin: 1rem 0; }
        .notice--warning { background: #fdf1dc; border: 2px solid var(--gold); }
        .notice--error { background: #fce8ec; border: 2px solid var(--love); }
        .notice__close { background: none; border: none; font-size: 1.3rem; cursor: pointer; color: var(--subtle); }

        .page-selector { display: flex; flex-direction: column; gap: 0.4rem; margin: 1rem 0; }
        .page-selector__label { font-weight: 600; }
        .page-selector__select { padding: 0.7rem; border: 2px solid var(--overlay); border-radius: 8px; background: var(--surface); color: var(--text); }
        .page-selector__empty { color: var(--muted); font-style: italic; }

        .workspace__body { display: grid; gap: 1.5rem; grid-template-columns: 1fr; }
        @media (min-width: 900px) { .workspace__body { grid-template-columns: 2fr 1fr; } }

        .post-grid__header { display: flex; justify-content: space-between; align-items: center; margin-bottom: 0.75rem; }
        .post-grid__summary { color: var(--subtle); }
        .post-grid__select-all, .post-grid__more {
            padding: 0.5rem 1rem; background: var(--overlay); border: none; border-radius: 6px; cursor: pointer; color: var(--text);
        }
        .post-grid__items { display: grid; gap: 0.75rem; grid-template-columns: repeat(auto-fill, minmax(220px, 1fr)); }
        .post-grid__more { display: block; margin: 1rem auto 0; }
        .post-grid__empty { color: var(--muted); font-style: italic; padding: 1rem 0; }
        .post-card {
            position: relative; background: var(--surface); border: 2px solid var(--overlay);
            border-radius: 10px; padding: 0.9rem; cursor: pointer; transition: border-color 0.2s;
        }
        .post-card--selected { border-color: var(--pine); box-shadow: 0 0 0 2px rgba(40, 105, 131, 0.15); }
        .post-card__check { position: absolute; top: 0.6rem; right: 0.6rem; }
        .post-card__picture { width: 100%; height: 140px; object-fit: cover; border-radius: 6px; margin-bottom: 0.5rem; }
        .post-card__text { line-height: 1.4; }
        .post-card__meta { color: var(--muted); font-size: 0.85rem; margin-top: 0.4rem; }

        .filters { background: var(--surface); border: 2px solid var(--overlay); border-radius: 10px; padding: 1.1rem; display: flex; flex-direction: column; gap: 0.8rem; }
        .filters__field { display: flex; flex-direction: column; gap: 0.3rem; font-weight: 600; }
        .filters__input { padding: 0.55rem 0.7rem; border: 2px solid var(--overlay); border-radius: 6px; background: var(--base); color: var(--text); }
        .filters__toggle { display: flex; align-items: center; gap: 0.5rem; }
        .filters__draw {
            margin-top: 0.5rem; padding: 0.9rem 1.5rem; background: var(--love); color: var(--base);
            border: none; border-radius: 8px; font-size: 1.05rem; font-weight: 700; cursor: pointer;
        }
        .filters__draw:disabled { background: var(--muted); cursor: wait; }

        .overlay { position: fixed; inset: 0; background: rgba(25, 23, 36, 0.7); display: flex; align-items: center; justify-content: center; z-index: 10; }
        .overlay__machine { background: var(--surface); border: 4px solid var(--gold); border-radius: 16px; padding: 2rem 2.5rem; min-width: 320px; text-align: center; }
        .overlay__title { color: var(--gold); font-weight: 700; margin-bottom: 1rem; }
        .reel { overflow: hidden; border: 2px solid var(--overlay); border-radius: 8px; background: var(--base); }
        .reel__strip { list-style: none; }
        .reel__item { height: 80px; line-height: 80px; font-size: 1.4rem; font-weight: 700; white-space: nowrap; overflow: hidden; text-overflow: ellipsis; }

        .winners { margin: 2rem 0; }
        .winners__grid { display: grid; gap: 1rem; grid-template-columns: repeat(auto-fill, minmax(220px, 1fr)); }
        .winner-card {
            position: relative; overflow: hidden; text-align: center; background: var(--surface);
            border: 2px solid var(--gold); border-radius: 12px; padding: 1.2rem;
            opacity: 0; animation: reveal 0.5s ease-out forwards;
        }
        @keyframes reveal { from { opacity: 0; transform: translateY(12px); } to { opacity: 1; transform: none; } }
        .winner-card__rank { position: absolute; top: 0.6rem; left: 0.8rem; color: var(--gold); font-weight: 800; }
        .winner-card__avatar { width: 72px; height: 72px; border-radius: 50%; margin-bottom: 0.6rem; }
        .winner-card__name { color: var(--love); margin-bottom: 0.3rem; }
        .winner-card__text { color: var(--subtle); font-style: italic; }
        .confetti { position: fixed; inset: 0; pointer-events: none; z-index: 20; }
        .confetti__piece { position: absolute; top: -2rem; font-size: 1.5rem; animation: fall 2.5s linear forwards; }
        .confetti--small .confetti__piece { font-size: 1rem; }
        @keyframes fall { to { transform: translateY(110vh) rotate(540deg); opacity: 0; } }

        .loading { display: flex; flex-direction: column; align-items: center; padding: 2rem; }
        .loading__spinner {
            width: 44px; height: 44px; border: 4px solid var(--overlay);
            border-top-color: var(--gold); border-radius: 50%; animation: spin 1s linear infinite;
        }
        @keyframes spin { to { transform: rotate(360deg); } }
        .loading__text { margin-top: 1rem; color: var(--subtle); font-style: italic; }
        .error { background: #fce8ec; border: 2px solid var(--love); border-radius: 8px; padding: 1.25rem; margin: 1rem 0; }
        .error__title { color: var(--love); font-weight: 700; margin-bottom: 0.5rem; }
        .error__message { color: #8b3d4d; }
        .error__retry { margin-top: 1rem; padding: 0.5rem 1rem; background: var(--love); color: var(--base); border: none; border-radius: 4px; cursor: pointer; }
    "#;

    view! {
        <!DOCTYPE html>
        <html lang="fr">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <link rel="icon" href="data:image/svg+xml,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'><text y='.9em' font-size='90'>🎁</text></svg>"/>
                <style>{css}</style>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}
