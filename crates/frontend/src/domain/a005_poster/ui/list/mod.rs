use contracts::domain::a005_poster::aggregate::Poster;
use leptos::prelude::*;
use thaw::*;

use crate::domain::a005_poster::api;
use crate::domain::a005_poster::record::{newest_first, poster_schema, POSTERS_PER_PAGE};
use crate::domain::a005_poster::ui::details::PosterUpload;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::PaginationControls;
use crate::shared::date_utils::format_datetime_opt;
use crate::shared::icons::icon;
use crate::shared::list_view::{use_list_view, DisplayState, ListOptions, ListView, MutationLabels};

#[component]
#[allow(non_snake_case)]
pub fn PosterList() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();
    let options = ListOptions::new("posters", "Failed to load posters")
        .page_size(POSTERS_PER_PAGE)
        .sort_by(newest_first);
    let model = ListView::new(
        poster_schema(),
        options,
        api::loader(ctx.client().get_value()),
        ctx.notifier(),
    );
    let list = use_list_view(model);

    let summary = Signal::derive(move || list.view().summary());
    let display = Memo::new(move |_| list.view().display_state());
    let banner = Memo::new(move |_| list.view().error_banner());
    let has_posters = Signal::derive(move || summary.get().total_items > 0);
    let cards = Memo::new(move |_| {
        let model = list.view();
        model
            .window()
            .items
            .into_iter()
            .map(|poster| {
                let key = model.row_key(&poster.id);
                (poster, key)
            })
            .collect::<Vec<_>>()
    });

    let uploading = RwSignal::new(false);

    let delete = move |poster: Poster| {
        list.spawn(move |model| async move {
            let client = ctx.client().get_value();
            let labels = MutationLabels::new("Delete failed", "Unable to remove poster.");
            model
                .delete(poster.id.clone(), &labels, move |removed| async move {
                    api::delete_poster(&client, &removed.id).await
                })
                .await;
        });
    };

    view! {
        <div class="page posters-page">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Posters"</h1>
                </div>
                <div class="page__header-right">
                    <Show when=move || has_posters.get()>
                        <Button appearance=ButtonAppearance::Primary on_click=move |_| uploading.set(true)>
                            "+ Add New Poster"
                        </Button>
                    </Show>
                </div>
            </div>

            <div class="page__content">
                {move || banner.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                {move || match display.get() {
                    DisplayState::Loading => view! {
                        <div class="list-state">
                            <Spinner />
                            <span>"Loading posters..."</span>
                        </div>
                    }.into_any(),
                    DisplayState::Failed { message } => view! {
                        <div class="alert alert--error">
                            <span>{message}</span>
                            <Button appearance=ButtonAppearance::Secondary on_click=move |_| list.refresh()>
                                "Retry"
                            </Button>
                        </div>
                    }.into_any(),
                    DisplayState::Empty { .. } => view! {
                        <div class="empty-state">
                            <p class="empty-state__title">"No Posters Found"</p>
                            <p class="empty-state__subtitle">"Start adding a poster image."</p>
                            <Button appearance=ButtonAppearance::Primary on_click=move |_| uploading.set(true)>
                                "+ Add Poster"
                            </Button>
                        </div>
                    }.into_any(),
                    DisplayState::Rows => view! {
                        <div class="poster-grid">
                            <For
                                each=move || cards.get()
                                key=|(poster, key)| (poster.id.clone(), *key)
                                children=move |(poster, _)| {
                                    let id = poster.id.clone();
                                    let busy = Signal::derive(move || list.view().is_busy(&id));
                                    let alt = format!("Poster-{}", poster.id);
                                    let created = format_datetime_opt(poster.created_at.as_deref());
                                    let src = poster.image_url.clone().unwrap_or_default();
                                    view! {
                                        <div class="poster-card">
                                            <div class="poster-card__image">
                                                <img src=src alt=alt />
                                            </div>
                                            <div class="poster-card__footer">
                                                <span class="poster-card__date">{created}</span>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| delete(poster.clone())
                                                    disabled=busy
                                                    attr:title="Delete"
                                                    attr:aria-label="Delete poster"
                                                >
                                                    {icon("trash")}
                                                </Button>
                                            </div>
                                        </div>
                                    }
                                }
                            />
                        </div>
                    }.into_any(),
                }}

                <PaginationControls
                    summary=summary
                    on_page_change=Callback::new(move |page: usize| {
                        list.spawn(move |model| async move {
                            model.go_to_page(page).await;
                        })
                    })
                    noun="posters"
                />

                <Show when=move || uploading.get()>
                    <PosterUpload list=list on_close=move || uploading.set(false) />
                </Show>
            </div>
        </div>
    }
}
