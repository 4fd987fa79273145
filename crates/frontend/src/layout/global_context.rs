use std::collections::HashMap;
use std::rc::Rc;

use leptos::prelude::Effect;
use leptos::prelude::*;
use log::debug;
use web_sys::window;

use crate::shared::api_utils::ApiClient;
use crate::shared::config::AppConfig;
use crate::shared::notify::Notifier;

/// Раздел админки, выбранный в боковом меню
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    Stores,
    Orders,
    Services,
    Users,
    Posters,
    /// Открывается из шапки, в боковом меню не показывается
    Profile,
}

impl Page {
    pub const SIDEBAR: [Page; 5] = [
        Page::Stores,
        Page::Orders,
        Page::Services,
        Page::Users,
        Page::Posters,
    ];

    pub const ALL: [Page; 6] = [
        Page::Stores,
        Page::Orders,
        Page::Services,
        Page::Users,
        Page::Posters,
        Page::Profile,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Page::Stores => "stores",
            Page::Orders => "orders",
            Page::Services => "services",
            Page::Users => "users",
            Page::Posters => "posters",
            Page::Profile => "profile",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Stores => "Stores",
            Page::Orders => "Orders",
            Page::Services => "Services",
            Page::Users => "Users",
            Page::Posters => "Posters",
            Page::Profile => "Profile",
        }
    }

    pub fn from_key(key: &str) -> Option<Page> {
        Page::ALL.into_iter().find(|page| page.key() == key)
    }
}

/// Раздел из строки запроса вида `?active=orders`
pub fn page_from_query(search: &str) -> Option<Page> {
    let params: HashMap<String, String> =
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
    params.get("active").and_then(|key| Page::from_key(key))
}

pub fn query_for(page: Page) -> String {
    let query = serde_qs::to_string(&HashMap::from([("active", page.key())])).unwrap_or_default();
    format!("?{}", query)
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub active: RwSignal<Page>,
    pub left_open: RwSignal<bool>,
    config: StoredValue<AppConfig>,
    client: StoredValue<ApiClient, LocalStorage>,
    notifier: StoredValue<Rc<dyn Notifier>, LocalStorage>,
}

impl AppGlobalContext {
    pub fn new(config: AppConfig, client: ApiClient, notifier: Rc<dyn Notifier>) -> Self {
        Self {
            active: RwSignal::new(Page::default()),
            left_open: RwSignal::new(true),
            config: StoredValue::new(config),
            client: StoredValue::new_local(client),
            notifier: StoredValue::new_local(notifier),
        }
    }

    pub fn config(&self) -> StoredValue<AppConfig> {
        self.config
    }

    pub fn client(&self) -> StoredValue<ApiClient, LocalStorage> {
        self.client
    }

    pub fn notifier(&self) -> Rc<dyn Notifier> {
        self.notifier.get_value()
    }

    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        if let Some(page) = page_from_query(&search) {
            self.activate(page);
        }

        let this = *self;
        Effect::new(move |_| {
            let new_url = query_for(this.active.get());

            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();

            // Only update URL if it actually changed
            if current_search != new_url {
                if let Some(w) = window() {
                    if let Ok(history) = w.history() {
                        let _ = history.replace_state_with_url(
                            &wasm_bindgen::JsValue::NULL,
                            "",
                            Some(&new_url),
                        );
                    }
                }
            }
        });
    }

    pub fn activate(&self, page: Page) {
        debug!("activate page '{}'", page.key());
        self.active.set(page);
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}
