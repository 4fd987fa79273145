use leptos::prelude::*;
use thaw::*;

use crate::domain::a004_user::api;
use crate::domain::a004_user::record::{customer_schema, text_or_dash};
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::PaginationControls;
use crate::shared::date_utils::NO_VALUE;
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, SearchInput};
use crate::shared::list_view::{use_list_view, DisplayState, ListOptions, ListView, PagingMode};

/// Клиенты сервиса. Страницы режет сервер, поиск работает по текущей странице.
#[component]
#[allow(non_snake_case)]
pub fn CustomerList() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();
    let lists = ctx.config().with_value(|c| c.lists.clone());
    let options = ListOptions::new("users", "Failed to load users.")
        .page_size(lists.page_size)
        .max_visible_pages(lists.max_visible_pages)
        .paging(PagingMode::Server);
    let model = ListView::new(
        customer_schema(),
        options,
        api::loader(ctx.client().get_value()),
        ctx.notifier(),
    );
    let list = use_list_view(model);

    let query = Signal::derive(move || list.view().filter_state().query);
    let summary = Signal::derive(move || list.view().summary());
    let display = Memo::new(move |_| list.view().display_state());
    let banner = Memo::new(move |_| list.view().error_banner());
    let loading = Signal::derive(move || list.view().is_loading());
    let page_size = Signal::derive(move || list.view().page_state().page_size);
    let rows = Memo::new(move |_| {
        let model = list.view();
        model
            .window()
            .items
            .into_iter()
            .map(|customer| {
                let key = model.row_key(&customer.id);
                (customer, key)
            })
            .collect::<Vec<_>>()
    });

    view! {
        <div class="page users-page">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Customers"</h1>
                    <span class="text-muted">"Track customer contacts and recent order activity."</span>
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
                        <div style="max-width: 360px;">
                            <SearchInput
                                value=query
                                on_change=Callback::new(move |q: String| list.untracked().set_query(q))
                                placeholder="Search customers..."
                                debounce_ms=lists.search_debounce_ms
                            />
                        </div>
                    </div>
                </div>

                {move || match display.get() {
                    DisplayState::Loading => view! {
                        <div class="list-state">
                            <Spinner />
                            <span>"Loading customers..."</span>
                        </div>
                    }.into_any(),
                    DisplayState::Failed { message } => view! {
                        <div class="list-state">
                            <p class="error-text">{message}</p>
                            <Button appearance=ButtonAppearance::Secondary on_click=move |_| list.refresh()>
                                "Retry"
                            </Button>
                        </div>
                    }.into_any(),
                    DisplayState::Empty { .. } => view! {
                        <div class="list-state">"No customers found"</div>
                    }.into_any(),
                    DisplayState::Rows => view! {
                        <div class="table-wrapper">
                            <Table attr:style="width: 100%;">
                                <TableHeader>
                                    <TableRow>
                                        <TableHeaderCell resizable=false min_width=180.0>"Customer Name"</TableHeaderCell>
                                        <TableHeaderCell resizable=false min_width=130.0>"Phone Number"</TableHeaderCell>
                                        <TableHeaderCell resizable=false min_width=200.0>"Email Address"</TableHeaderCell>
                                        <TableHeaderCell resizable=false min_width=100.0>"Total Orders"</TableHeaderCell>
                                    </TableRow>
                                </TableHeader>
                                <TableBody>
                                    <For
                                        each=move || rows.get()
                                        key=|(customer, key)| (customer.id.clone(), *key)
                                        children=move |(customer, _)| {
                                            let name = text_or_dash(&customer.name);
                                            let phone = text_or_dash(&customer.phone_number);
                                            let email = text_or_dash(&customer.email);
                                            let mailto = (email != NO_VALUE).then(|| format!("mailto:{}", email));
                                            view! {
                                                <TableRow>
                                                    <TableCell>
                                                        <TableCellLayout truncate=true>
                                                            {move || highlight_matches(&name, &query.get())}
                                                        </TableCellLayout>
                                                    </TableCell>
                                                    <TableCell>
                                                        <TableCellLayout>
                                                            {move || highlight_matches(&phone, &query.get())}
                                                        </TableCellLayout>
                                                    </TableCell>
                                                    <TableCell>
                                                        <TableCellLayout truncate=true>
                                                            {match mailto {
                                                                Some(href) => view! {
                                                                    <a href=href class="users-page__email">{email}</a>
                                                                }.into_any(),
                                                                None => email.into_any(),
                                                            }}
                                                        </TableCellLayout>
                                                    </TableCell>
                                                    <TableCell>
                                                        <TableCellLayout>
                                                            <strong>{customer.order_count()}</strong>
                                                        </TableCellLayout>
                                                    </TableCell>
                                                </TableRow>
                                            }
                                        }
                                    />
                                </TableBody>
                            </Table>
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
                    noun="customers"
                    on_page_size_change=Callback::new(move |size: usize| {
                        list.spawn(move |model| async move {
                            model.set_page_size(size).await;
                        })
                    })
                    page_size=page_size
                />
            </div>
        </div>
    }
}
