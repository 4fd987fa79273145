use std::rc::Rc;

use crate::app_shell::AppShell;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::api_utils::{api_base, ApiClient};
use crate::shared::config::AppConfig;
use crate::shared::notify::BrowserNotifier;
use crate::system::auth::context::AuthProvider;
use crate::system::auth::storage::BrowserTokenStore;
use leptos::prelude::*;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let client = ApiClient::new(api_base(&config.api), Rc::new(BrowserTokenStore));

    // Provide the AppGlobalContext store to the whole app via context.
    provide_context(AppGlobalContext::new(
        config,
        client,
        Rc::new(BrowserNotifier),
    ));

    view! {
        <AuthProvider>
            <AppShell />
        </AuthProvider>
    }
}
