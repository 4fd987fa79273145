use contracts::system::auth::AdminUser;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;
use thaw::*;

use crate::layout::global_context::{AppGlobalContext, Page};
use crate::shared::api_utils::ApiError;
use crate::shared::date_utils::NO_VALUE;
use crate::system::auth::api;
use crate::system::auth::context::{do_logout, use_auth, AuthState};

const LOAD_FAILED: &str = "Failed to load profile";

/// Ответ `/admin/profile` без данных тоже ошибка
pub fn profile_result(result: Result<Option<AdminUser>, ApiError>) -> Result<AdminUser, String> {
    match result {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err("Failed to load profile data".to_string()),
        Err(e) => Err(e.user_message(LOAD_FAILED)),
    }
}

fn or_dash(value: &Option<String>) -> String {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(NO_VALUE)
        .to_string()
}

/// Поля карточки профиля в порядке показа
pub fn profile_fields(user: &AdminUser) -> Vec<(&'static str, String)> {
    let role = user
        .role
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .unwrap_or("admin")
        .to_string();
    vec![
        ("Full Name", or_dash(&user.name)),
        ("Email Address", or_dash(&user.email)),
        ("Phone Number", or_dash(&user.phone)),
        ("Role", role),
    ]
}

/// Профиль администратора, только просмотр
#[component]
pub fn ProfilePage() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();
    let auth = use_auth();
    let (profile, set_profile) = signal(Option::<AdminUser>::None);
    let (error, set_error) = signal(Option::<String>::None);
    let (loading, set_loading) = signal(true);

    let load = move || {
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            let client = ctx.client().get_value();
            let result = api::profile(&client).await;
            if matches!(&result, Err(e) if e.is_unauthorized()) {
                warn!("profile request rejected, signing out");
                do_logout(auth, ctx);
                return;
            }
            match profile_result(result) {
                Ok(user) => {
                    client.tokens().set_stored_user(Some(&user));
                    auth.set(AuthState { user: Some(user.clone()) });
                    set_profile.set(Some(user));
                }
                Err(message) => set_error.set(Some(message)),
            }
            set_loading.set(false);
        });
    };
    load();

    view! {
        <div class="page profile-page">
            <div class="profile-card">
                {move || {
                    if loading.get() {
                        view! {
                            <div class="list-state">
                                <Spinner />
                                <span>"Loading profile..."</span>
                            </div>
                        }.into_any()
                    } else if let Some(message) = error.get() {
                        view! {
                            <div class="list-state">
                                <p class="error-text">{message}</p>
                                <Button appearance=ButtonAppearance::Secondary on_click=move |_| load()>
                                    "Retry"
                                </Button>
                            </div>
                        }.into_any()
                    } else {
                        let fields = profile.get().map(|u| profile_fields(&u)).unwrap_or_default();
                        view! {
                            <div class="profile-card__fields-grid">
                                {fields
                                    .into_iter()
                                    .map(|(label, value)| view! {
                                        <div class="profile-card__field">
                                            <label class="profile-card__label">{label}</label>
                                            <input
                                                type="text"
                                                class="profile-card__input profile-card__input--readonly"
                                                value=value
                                                readonly
                                            />
                                        </div>
                                    })
                                    .collect_view()}
                            </div>
                        }.into_any()
                    }
                }}

                <div class="profile-card__actions">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| ctx.activate(Page::default())
                    >
                        "Cancel"
                    </Button>
                </div>
            </div>
        </div>
    }
}
