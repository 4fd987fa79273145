//! Sidebar: плоский список разделов админки

use crate::layout::global_context::{AppGlobalContext, Page};
use crate::shared::icons::icon;
use leptos::prelude::*;

fn page_icon(page: Page) -> &'static str {
    match page {
        Page::Stores => "stores",
        Page::Orders => "orders",
        Page::Services => "services",
        Page::Users => "users",
        Page::Posters => "posters",
        Page::Profile => "users",
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();

    view! {
        <div class="app-sidebar__content">
            {Page::SIDEBAR
                .into_iter()
                .map(|page| {
                    view! {
                        <div
                            class="app-sidebar__item"
                            class:app-sidebar__item--active=move || ctx.active.get() == page
                            style:padding-left="12px"
                            on:click=move |_| ctx.activate(page)
                        >
                            <div class="app-sidebar__item-content">
                                {icon(page_icon(page))}
                                <span>{page.title()}</span>
                            </div>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}
