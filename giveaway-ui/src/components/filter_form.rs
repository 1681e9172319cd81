use giveaway_app::domain::DrawForm;
use leptos::prelude::*;

#[component]
fn Toggle(
    form: RwSignal<DrawForm>,
    #[prop(into)] label: String,
    read: fn(&DrawForm) -> bool,
    write: fn(&mut DrawForm, bool),
) -> impl IntoView {
    view! {
        <label class="filters__toggle">
            <input
                type="checkbox"
                prop:checked=move || form.with(read)
                on:change=move |ev| {
                    let checked = event_target_checked(&ev);
                    form.update(|f| write(f, checked));
                }
            />
            <span>{label}</span>
        </label>
    }
}

/// Winner count and participant rules; the orchestrator reads them when the draw starts.
#[component]
pub fn FilterPanel(
    form: RwSignal<DrawForm>,
    #[prop(into)] drawing: Signal<bool>,
    #[prop(into)] on_draw: Callback<()>,
) -> impl IntoView {
    let limit_by_date = move || form.with(|f| f.filters.limit_by_date);

    view! {
        <form
            class="filters"
            on:submit=move |ev: leptos::ev::SubmitEvent| {
                ev.prevent_default();
                on_draw.run(());
            }
        >
            <label class="filters__field">
                <span>"Nombre de gagnants"</span>
                <input
                    type="number"
                    min="1"
                    class="filters__input"
                    prop:value=move || form.with(|f| f.winner_count.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| f.winner_count = value);
                    }
                />
            </label>

            <Toggle
                form=form
                label="Exclure les doublons"
                read=|f| f.filters.filter_duplicates
                write=|f, v| f.filters.filter_duplicates = v
            />

            <label class="filters__field">
                <span>"Mentions minimum (@)"</span>
                <input
                    type="number"
                    min="0"
                    class="filters__input"
                    prop:value=move || form.with(|f| f.filters.min_mentions.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| f.filters.min_mentions = value);
                    }
                />
            </label>

            <label class="filters__field">
                <span>"Mot ou hashtag obligatoire"</span>
                <input
                    type="text"
                    class="filters__input"
                    placeholder="#bijouterie"
                    prop:value=move || form.with(|f| f.filters.required_word.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| f.filters.required_word = value);
                    }
                />
            </label>

            <Toggle
                form=form
                label="Inclure les réponses"
                read=|f| f.filters.include_replies
                write=|f, v| f.filters.include_replies = v
            />
            <Toggle
                form=form
                label="Photo obligatoire"
                read=|f| f.filters.require_photo
                write=|f, v| f.filters.require_photo = v
            />
            <Toggle
                form=form
                label="A aimé la publication"
                read=|f| f.filters.require_like
                write=|f, v| f.filters.require_like = v
            />
            <Toggle
                form=form
                label="Limiter par date"
                read=|f| f.filters.limit_by_date
                write=|f, v| f.filters.limit_by_date = v
            />

            <Show when=limit_by_date>
                <input
                    type="date"
                    class="filters__input"
                    prop:value=move || form.with(|f| f.filters.date_limit.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| f.filters.date_limit = value);
                    }
                />
            </Show>

            <button type="submit" class="filters__draw" prop:disabled=move || drawing.get()>
                {move || if drawing.get() { "Tirage en cours..." } else { "Lancer le tirage" }}
            </button>
        </form>
    }
}
