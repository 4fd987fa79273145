use crate::domain::a001_store::ui::list::StoreList;
use crate::domain::a002_order::ui::list::OrderList;
use crate::domain::a003_service::ui::list::ServiceList;
use crate::domain::a004_user::ui::list::CustomerList;
use crate::domain::a005_poster::ui::list::PosterList;
use crate::layout::global_context::{AppGlobalContext, Page};
use crate::system::pages::profile::ProfilePage;
use leptos::prelude::*;

#[component]
pub fn Center(children: Children) -> impl IntoView {
    view! {
        <div data-zone="center" class="app-content" style="flex: 1; overflow: auto;">
            {children()}
        </div>
    }
}

/// Страница активного раздела. Смена раздела размонтирует предыдущую
/// страницу, её незавершённые запросы отбрасываются.
#[component]
pub fn ActivePage() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();

    move || match ctx.active.get() {
        Page::Stores => view! { <StoreList /> }.into_any(),
        Page::Orders => view! { <OrderList /> }.into_any(),
        Page::Services => view! { <ServiceList /> }.into_any(),
        Page::Users => view! { <CustomerList /> }.into_any(),
        Page::Posters => view! { <PosterList /> }.into_any(),
        Page::Profile => view! { <ProfilePage /> }.into_any(),
    }
}
