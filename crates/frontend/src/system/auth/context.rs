use contracts::system::auth::AdminUser;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;

use super::api;
use super::storage::TokenStore;
use crate::layout::global_context::AppGlobalContext;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<AdminUser>,
}

impl AuthState {
    /// Сессия из хранилища: есть токен - считаем, что вошли.
    /// Пользователь без сохранённого профиля показывается как "Admin".
    pub fn restore(tokens: &dyn TokenStore) -> Self {
        match tokens.access_token() {
            Some(token) if !token.is_empty() => Self {
                user: Some(tokens.stored_user().unwrap_or_default()),
            },
            _ => Self::default(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Сессия восстановлена по токену, но профиль не сохранён
    pub fn needs_profile(&self) -> bool {
        self.user
            .as_ref()
            .is_some_and(|u| u.name.is_none() && u.email.is_none())
    }

    pub fn display_name(&self) -> String {
        self.user
            .as_ref()
            .map(AdminUser::display_name)
            .unwrap_or_default()
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();
    let state = ctx.client().with_value(|client| AuthState::restore(client.tokens().as_ref()));
    let needs_profile = state.needs_profile();
    let auth = RwSignal::new(state);
    provide_context(auth);

    if needs_profile {
        spawn_local(refresh_profile(auth, ctx));
    }

    children()
}

/// Hook to access auth state
pub fn use_auth() -> RwSignal<AuthState> {
    use_context::<RwSignal<AuthState>>().expect("AuthProvider not found in component tree")
}

/// Helper: Perform login
pub async fn do_login(
    auth: RwSignal<AuthState>,
    ctx: AppGlobalContext,
    email: String,
    password: String,
) -> Result<(), String> {
    let client = ctx.client().get_value();
    let user = api::login(&client, email, password)
        .await
        .map_err(|e| e.user_message("Login failed"))?;
    auth.set(AuthState { user: Some(user) });
    Ok(())
}

/// Профиль для восстановленной сессии. Просроченный токен завершает сессию.
async fn refresh_profile(auth: RwSignal<AuthState>, ctx: AppGlobalContext) {
    let client = ctx.client().get_value();
    match api::profile(&client).await {
        Ok(Some(user)) => {
            client.tokens().set_stored_user(Some(&user));
            auth.set(AuthState { user: Some(user) });
        }
        Ok(None) => {}
        Err(e) if e.is_unauthorized() => {
            warn!("stored session rejected: {}", e);
            do_logout(auth, ctx);
        }
        Err(e) => warn!("profile refresh failed: {}", e),
    }
}

/// Helper: Perform logout
pub fn do_logout(auth: RwSignal<AuthState>, ctx: AppGlobalContext) {
    ctx.client().with_value(api::logout);
    auth.set(AuthState::default());
}
