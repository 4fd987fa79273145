use contracts::domain::a001_store::aggregate::{Store, StorePayload};
use leptos::prelude::*;
use thaw::*;

use crate::domain::a001_store::api;
use crate::domain::a001_store::record::{by_id, store_schema, IS_ACTIVE, STATUS};
use crate::domain::a001_store::ui::details::StoreDetails;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::PaginationControls;
use crate::shared::date_utils::{format_date_opt, NO_VALUE};
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, SearchInput};
use crate::shared::list_view::{
    use_list_view, DisplayState, FieldValue, ListHandle, ListOptions, ListView, MutationLabels,
    ALL,
};

fn text_or_dash(value: &Option<String>) -> String {
    value
        .clone()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| NO_VALUE.to_string())
}

#[component]
#[allow(non_snake_case)]
pub fn StoreList() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();
    let lists = ctx.config().with_value(|c| c.lists.clone());
    let options = ListOptions::new("stores", "Failed to load stores")
        .page_size(lists.page_size)
        .max_visible_pages(lists.max_visible_pages)
        .sort_by(by_id);
    let model = ListView::new(
        store_schema(),
        options,
        api::loader(ctx.client().get_value()),
        ctx.notifier(),
    );
    let list = use_list_view(model);

    let query = Signal::derive(move || list.view().filter_state().query);
    let status = Signal::derive(move || list.view().filter_state().facet(STATUS).to_string());
    let summary = Signal::derive(move || list.view().summary());
    let display = Memo::new(move |_| list.view().display_state());
    let banner = Memo::new(move |_| list.view().error_banner());
    let loading = Signal::derive(move || list.view().is_loading());

    // None = модалка закрыта, Some(None) = новая точка
    let editing: RwSignal<Option<Option<Store>>> = RwSignal::new(None);

    view! {
        <div class="page stores-page">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Stores"</h1>
                    <Badge>{move || summary.get().total_items.to_string()}</Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| editing.set(Some(None))
                    >
                        "+ Add New Store"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| list.refresh()
                        disabled=loading
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Loading..." } else { " Refresh" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || banner.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                <div class="filter-panel">
                    <div class="filter-panel-content">
                        <Flex gap=FlexGap::Small>
                            <div style="flex: 1; max-width: 360px;">
                                <SearchInput
                                    value=query
                                    on_change=Callback::new(move |q: String| list.untracked().set_query(q))
                                    placeholder="Search by store name or location..."
                                    debounce_ms=lists.search_debounce_ms
                                />
                            </div>
                            <select
                                class="filter-select"
                                aria-label="Filter by status"
                                prop:value=move || status.get()
                                on:change=move |ev| list.untracked().set_facet(STATUS, event_target_value(&ev))
                            >
                                <option value=ALL>"All Statuses"</option>
                                <option value="active">"Active"</option>
                                <option value="inactive">"Inactive"</option>
                            </select>
                        </Flex>
                    </div>
                </div>

                {move || match display.get() {
                    DisplayState::Loading => view! {
                        <div class="list-state">
                            <Spinner />
                            <span>"Loading stores..."</span>
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
                    DisplayState::Empty { filtered } => view! {
                        <div class="list-state">
                            {if filtered { "No stores match your search" } else { "No stores found" }}
                        </div>
                    }.into_any(),
                    DisplayState::Rows => view! {
                        <StoreTable list=list on_edit=Callback::new(move |store: Store| editing.set(Some(Some(store)))) />
                    }.into_any(),
                }}

                <PaginationControls
                    summary=summary
                    on_page_change=Callback::new(move |page: usize| {
                        list.spawn(move |model| async move {
                            model.go_to_page(page).await;
                        })
                    })
                    noun="stores"
                />

                {move || editing.get().map(|store| view! {
                    <StoreDetails store=store list=list on_close=move || editing.set(None) />
                })}
            </div>
        </div>
    }
}

#[component]
fn StoreTable(list: ListHandle<Store>, on_edit: Callback<Store>) -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();
    let query = Signal::derive(move || list.view().filter_state().query);
    let rows = Memo::new(move |_| {
        let model = list.view();
        model
            .window()
            .items
            .into_iter()
            .map(|store| {
                let key = model.row_key(&store.id);
                (store, key)
            })
            .collect::<Vec<_>>()
    });

    let toggle_active = move |store: Store| {
        let next = !store.is_active;
        list.spawn(move |model| async move {
            let client = ctx.client().get_value();
            let labels = MutationLabels::new("Update failed", "Unable to update store status.");
            model
                .toggle(store.id.clone(), IS_ACTIVE, FieldValue::Bool(next), &labels, move |patched| async move {
                    api::update_store(&client, &patched.id, &StorePayload::from_store(&patched)).await
                })
                .await;
        });
    };

    let delete = move |store: Store| {
        list.spawn(move |model| async move {
            let client = ctx.client().get_value();
            let labels = MutationLabels::new("Delete failed", "Unable to remove store.")
                .confirm(format!("Delete {}?", store.name), "This action cannot be undone.")
                .on_success("Store deleted", format!("{} has been removed.", store.name));
            model
                .delete(store.id.clone(), &labels, move |removed| async move {
                    api::delete_store(&client, &removed.id).await
                })
                .await;
        });
    };

    view! {
        <div class="table-wrapper">
            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell resizable=false min_width=160.0>"Store Name"</TableHeaderCell>
                        <TableHeaderCell resizable=false min_width=160.0>"Email"</TableHeaderCell>
                        <TableHeaderCell resizable=false min_width=110.0>"Phone"</TableHeaderCell>
                        <TableHeaderCell resizable=false min_width=180.0>"Address"</TableHeaderCell>
                        <TableHeaderCell resizable=false min_width=100.0>"Added On"</TableHeaderCell>
                        <TableHeaderCell resizable=false min_width=90.0>"Status"</TableHeaderCell>
                        <TableHeaderCell resizable=false min_width=90.0>"Actions"</TableHeaderCell>
                    </TableRow>
                </TableHeader>

                <TableBody>
                    <For
                        each=move || rows.get()
                        key=|(store, key)| (store.id.clone(), *key)
                        children=move |(store, _)| {
                            let id = store.id.clone();
                            let busy = Signal::derive(move || list.view().is_busy(&id));
                            let for_edit = store.clone();
                            let for_toggle = store.clone();
                            let for_delete = store.clone();
                            let name = store.name.clone();
                            view! {
                                <TableRow>
                                    <TableCell>
                                        <TableCellLayout truncate=true>
                                            <span style="font-weight: 500;">
                                                {move || highlight_matches(&name, &query.get())}
                                            </span>
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout truncate=true>{text_or_dash(&store.email)}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout truncate=true>{text_or_dash(&store.phone)}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout truncate=true>{text_or_dash(&store.address)}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>{format_date_opt(store.created_at.as_deref())}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <button
                                            class={if store.is_active { "status-pill status-pill--active" } else { "status-pill status-pill--inactive" }}
                                            title="Toggle status"
                                            disabled=move || busy.get()
                                            on:click=move |_| toggle_active(for_toggle.clone())
                                        >
                                            {if store.is_active { "Active" } else { "Inactive" }}
                                        </button>
                                    </TableCell>
                                    <TableCell>
                                        <Flex gap=FlexGap::Small>
                                            <Button
                                                appearance=ButtonAppearance::Subtle
                                                on_click=move |_| on_edit.run(for_edit.clone())
                                                disabled=busy
                                                attr:title="Edit store"
                                            >
                                                {icon("edit")}
                                            </Button>
                                            <Button
                                                appearance=ButtonAppearance::Subtle
                                                on_click=move |_| delete(for_delete.clone())
                                                disabled=busy
                                                attr:title="Delete store"
                                            >
                                                {icon("trash")}
                                            </Button>
                                        </Flex>
                                    </TableCell>
                                </TableRow>
                            }
                        }
                    />
                </TableBody>
            </Table>
        </div>
    }
}
