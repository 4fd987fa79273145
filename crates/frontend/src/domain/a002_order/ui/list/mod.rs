use contracts::domain::a002_order::aggregate::Order;
use leptos::prelude::*;
use thaw::*;

use crate::domain::a002_order::api;
use crate::domain::a002_order::record::{
    order_schema, status_meta, OrderRow, STATUS, STATUS_CODES, STORE, UNKNOWN_STORE,
};
use crate::domain::a002_order::ui::details::OrderDetails;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::PaginationControls;
use crate::shared::date_utils::format_slot;
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, SearchInput};
use crate::shared::list_view::{use_list_view, DisplayState, ListHandle, ListOptions, ListView, ALL};

#[component]
#[allow(non_snake_case)]
pub fn OrderList() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();
    let lists = ctx.config().with_value(|c| c.lists.clone());
    let options = ListOptions::new("orders", "Failed to fetch orders")
        .page_size(lists.page_size)
        .max_visible_pages(2);
    let model = ListView::new(
        order_schema(),
        options,
        api::loader(ctx.client().get_value()),
        ctx.notifier(),
    );
    let list = use_list_view(model);

    let query = Signal::derive(move || list.view().filter_state().query);
    let status = Signal::derive(move || list.view().filter_state().facet(STATUS).to_string());
    let store = Signal::derive(move || list.view().filter_state().facet(STORE).to_string());
    let stores = Memo::new(move |_| list.view().facet_options(STORE, &[UNKNOWN_STORE]));
    let has_filters = Signal::derive(move || list.view().filter_state().is_active());
    let summary = Signal::derive(move || list.view().summary());
    let display = Memo::new(move |_| list.view().display_state());
    let banner = Memo::new(move |_| list.view().error_banner());
    let loading = Signal::derive(move || list.view().is_loading());

    let selected: RwSignal<Option<Order>> = RwSignal::new(None);

    view! {
        <div class="page orders-page">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Orders"</h1>
                    <Badge>{move || summary.get().total_items.to_string()}</Badge>
                </div>
                <div class="page__header-right">
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
                                    placeholder="Search by Order ID, Service or Store..."
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
                                {STATUS_CODES
                                    .iter()
                                    .map(|code| view! { <option value=*code>{status_meta(code).0}</option> })
                                    .collect_view()}
                            </select>
                            <select
                                class="filter-select"
                                aria-label="Filter by store"
                                prop:value=move || store.get()
                                on:change=move |ev| list.untracked().set_facet(STORE, event_target_value(&ev))
                            >
                                <option value=ALL>"All Stores"</option>
                                {move || stores
                                    .get()
                                    .into_iter()
                                    .map(|name| {
                                        let value = name.clone();
                                        view! { <option value=value>{name}</option> }
                                    })
                                    .collect_view()}
                            </select>
                            <Button
                                appearance=ButtonAppearance::Subtle
                                on_click=move |_| list.untracked().reset_filters()
                                disabled=Signal::derive(move || !has_filters.get())
                            >
                                "Reset"
                            </Button>
                        </Flex>
                    </div>
                </div>

                {move || match display.get() {
                    DisplayState::Loading => view! {
                        <div class="list-state">
                            <Spinner />
                            <span>"Loading orders..."</span>
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
                    DisplayState::Empty { filtered: true } => view! {
                        <div class="list-state">"No orders match the selected filters"</div>
                    }.into_any(),
                    DisplayState::Empty { filtered: false } => view! {
                        <div class="list-state">
                            <h3>"No Orders Yet"</h3>
                            <p>"New orders will appear here."</p>
                        </div>
                    }.into_any(),
                    DisplayState::Rows => view! {
                        <OrderTable list=list on_view=Callback::new(move |order: Order| selected.set(Some(order))) />
                    }.into_any(),
                }}

                <PaginationControls
                    summary=summary
                    on_page_change=Callback::new(move |page: usize| {
                        list.spawn(move |model| async move {
                            model.go_to_page(page).await;
                        })
                    })
                    noun="orders"
                />

                {move || selected.get().map(|order| view! {
                    <OrderDetails order=order on_close=move || selected.set(None) />
                })}
            </div>
        </div>
    }
}

#[component]
fn OrderTable(list: ListHandle<OrderRow>, on_view: Callback<Order>) -> impl IntoView {
    let query = Signal::derive(move || list.view().filter_state().query);
    let rows = Memo::new(move |_| {
        let model = list.view();
        let window = model.window();
        let start = window.start_index;
        window
            .items
            .into_iter()
            .enumerate()
            .map(|(idx, order)| {
                let key = model.row_key(&order.id);
                (start + idx + 1, order, key)
            })
            .collect::<Vec<_>>()
    });

    view! {
        <div class="table-wrapper">
            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell resizable=false min_width=50.0>"S.No"</TableHeaderCell>
                        <TableHeaderCell resizable=false min_width=90.0>"Order ID"</TableHeaderCell>
                        <TableHeaderCell resizable=false min_width=160.0>"Service"</TableHeaderCell>
                        <TableHeaderCell resizable=false min_width=160.0>"Store"</TableHeaderCell>
                        <TableHeaderCell resizable=false min_width=200.0>"Pickup Slot"</TableHeaderCell>
                        <TableHeaderCell resizable=false min_width=120.0>"Status"</TableHeaderCell>
                        <TableHeaderCell resizable=false min_width=60.0>"View"</TableHeaderCell>
                    </TableRow>
                </TableHeader>

                <TableBody>
                    <For
                        each=move || rows.get()
                        key=|(serial, order, key)| (*serial, order.id.clone(), *key)
                        children=move |(serial, order, _)| {
                            let (status_label, tone) = status_meta(&order.status);
                            let slot = format_slot(order.pickup_start.as_deref(), order.pickup_end.as_deref());
                            let order_id = order.order_id.clone();
                            let service = order.service_name.clone();
                            let store = order.store_name.clone();
                            let raw = order.raw.clone();
                            view! {
                                <TableRow>
                                    <TableCell>
                                        <TableCellLayout>{serial}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>
                                            {move || highlight_matches(&format!("#{}", order_id), &query.get())}
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout truncate=true>
                                            {move || highlight_matches(&service, &query.get())}
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout truncate=true>
                                            {move || highlight_matches(&store, &query.get())}
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout truncate=true>{slot}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <span class=format!("status-badge {}", tone)>{status_label}</span>
                                    </TableCell>
                                    <TableCell>
                                        <Button
                                            appearance=ButtonAppearance::Subtle
                                            on_click=move |_| on_view.run(raw.clone())
                                            attr:title="View order"
                                        >
                                            {icon("eye")}
                                        </Button>
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
