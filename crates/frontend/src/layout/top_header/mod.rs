//! TopHeader component - application top navigation bar.
//!
//! Contains the sidebar toggle, the application title, the signed-in
//! admin (opens the profile) and the logout button.

use crate::layout::global_context::{AppGlobalContext, Page};
use crate::shared::icons::icon;
use crate::system::auth::context::{do_logout, use_auth};
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();
    let auth = use_auth();

    let toggle_sidebar = move |_| {
        ctx.toggle_left();
    };

    let logout = move |_| do_logout(auth, ctx);

    let is_sidebar_visible = move || ctx.left_open.get();

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=toggle_sidebar
                    title=move || if is_sidebar_visible() { "Hide navigation" } else { "Show navigation" }
                >
                    {icon("panel-left")}
                </button>
                <span class="top-header__title">"Laundry Admin"</span>
                <span class="top-header__section">{move || ctx.active.get().title()}</span>
            </div>

            <div class="top-header__actions">
                <button
                    class="top-header__user"
                    class:top-header__user--active=move || ctx.active.get() == Page::Profile
                    on:click=move |_| ctx.activate(Page::Profile)
                    title="Profile"
                >
                    {icon("users")}
                    <span>{move || auth.get().display_name()}</span>
                </button>

                <button class="top-header__icon-btn" on:click=logout title="Logout">
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}
