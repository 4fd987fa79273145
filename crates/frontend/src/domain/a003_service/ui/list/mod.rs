use contracts::domain::a003_service::aggregate::Service;
use leptos::prelude::*;
use thaw::*;

use crate::domain::a003_service::catalog;
use crate::domain::a003_service::record::{format_price, service_schema};
use crate::domain::a003_service::ui::details::ServiceDetails;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::PaginationControls;
use crate::shared::date_utils::format_date_opt;
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, SearchInput};
use crate::shared::list_view::{use_list_view, DisplayState, ListOptions, ListView};

#[component]
#[allow(non_snake_case)]
pub fn ServiceList() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();
    let lists = ctx.config().with_value(|c| c.lists.clone());
    let options = ListOptions::new("services", "Failed to load services")
        .page_size(lists.page_size)
        .max_visible_pages(lists.max_visible_pages);
    let model = ListView::<Service>::new(
        service_schema(),
        options,
        catalog::loader(),
        ctx.notifier(),
    );
    let list = use_list_view(model);

    let query = Signal::derive(move || list.view().filter_state().query);
    let summary = Signal::derive(move || list.view().summary());
    let display = Memo::new(move |_| list.view().display_state());
    let rows = Memo::new(move |_| {
        let model = list.view();
        model
            .window()
            .items
            .into_iter()
            .map(|service| {
                let key = model.row_key(&service.id);
                (service, key)
            })
            .collect::<Vec<_>>()
    });

    let adding = RwSignal::new(false);

    view! {
        <div class="page services-page">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Services"</h1>
                    <span class="text-muted">"Latest prices & updates"</span>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| adding.set(true)>
                        "+ Add New Service"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <div class="filter-panel">
                    <div class="filter-panel-content">
                        <div style="max-width: 360px;">
                            <SearchInput
                                value=query
                                on_change=Callback::new(move |q: String| list.untracked().set_query(q))
                                placeholder="Search services..."
                                debounce_ms=lists.search_debounce_ms
                            />
                        </div>
                    </div>
                </div>

                {move || match display.get() {
                    DisplayState::Loading => view! { <div class="list-state"><Spinner /></div> }.into_any(),
                    DisplayState::Failed { message } => view! {
                        <div class="alert alert--error">{message}</div>
                    }.into_any(),
                    DisplayState::Empty { .. } => view! {
                        <div class="list-state">"No services found"</div>
                    }.into_any(),
                    DisplayState::Rows => view! {
                        <div class="table-wrapper">
                            <Table attr:style="width: 100%;">
                                <TableHeader>
                                    <TableRow>
                                        <TableHeaderCell resizable=false min_width=220.0>"Service Name"</TableHeaderCell>
                                        <TableHeaderCell resizable=false min_width=90.0>"Price"</TableHeaderCell>
                                        <TableHeaderCell resizable=false min_width=110.0>"Last Updated"</TableHeaderCell>
                                        <TableHeaderCell resizable=false min_width=70.0>"Actions"</TableHeaderCell>
                                    </TableRow>
                                </TableHeader>
                                <TableBody>
                                    <For
                                        each=move || rows.get()
                                        key=|(service, key)| (service.id.clone(), *key)
                                        children=move |(service, _)| {
                                            let name = service.name.clone();
                                            view! {
                                                <TableRow>
                                                    <TableCell>
                                                        <TableCellLayout truncate=true>
                                                            {move || highlight_matches(&name, &query.get())}
                                                        </TableCellLayout>
                                                    </TableCell>
                                                    <TableCell>
                                                        <TableCellLayout>{format_price(service.price)}</TableCellLayout>
                                                    </TableCell>
                                                    <TableCell>
                                                        <TableCellLayout>
                                                            {format_date_opt(service.last_updated.as_deref())}
                                                        </TableCellLayout>
                                                    </TableCell>
                                                    <TableCell>
                                                        // редактирование цен появится вместе с API услуг
                                                        <Button appearance=ButtonAppearance::Subtle disabled=true attr:title="Edit">
                                                            {icon("edit")}
                                                        </Button>
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
                    noun="services"
                />

                <Show when=move || adding.get()>
                    <ServiceDetails list=list on_close=move || adding.set(false) />
                </Show>
            </div>
        </div>
    }
}
