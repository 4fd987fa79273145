//! Хранение токена и пользователя админки.
//!
//! API-клиент и контекст авторизации получают `TokenStore` извне, поэтому в
//! тестах вместо `localStorage` подставляется `MemoryTokenStore`.
use std::cell::RefCell;

use contracts::system::auth::AdminUser;
use log::warn;
use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "authToken";
const USER_KEY: &str = "authUser";

pub trait TokenStore {
    fn access_token(&self) -> Option<String>;

    /// `None` удаляет токен
    fn set_access_token(&self, token: Option<&str>);

    fn stored_user(&self) -> Option<AdminUser>;

    fn set_stored_user(&self, user: Option<&AdminUser>);

    fn clear(&self) {
        self.set_access_token(None);
        self.set_stored_user(None);
    }
}

/// Токен в `localStorage` браузера
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTokenStore;

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

fn write_item(key: &str, value: Option<&str>) {
    let Some(storage) = get_local_storage() else {
        warn!("localStorage is not available, {} not persisted", key);
        return;
    };
    let _ = match value {
        Some(value) => storage.set_item(key, value),
        None => storage.remove_item(key),
    };
}

fn read_item(key: &str) -> Option<String> {
    get_local_storage()?
        .get_item(key)
        .ok()?
        .filter(|v| !v.is_empty())
}

impl TokenStore for BrowserTokenStore {
    fn access_token(&self) -> Option<String> {
        read_item(ACCESS_TOKEN_KEY)
    }

    fn set_access_token(&self, token: Option<&str>) {
        write_item(ACCESS_TOKEN_KEY, token);
    }

    fn stored_user(&self) -> Option<AdminUser> {
        let raw = read_item(USER_KEY)?;
        decode_user(&raw)
    }

    fn set_stored_user(&self, user: Option<&AdminUser>) {
        let encoded = user.and_then(|u| serde_json::to_string(u).ok());
        write_item(USER_KEY, encoded.as_deref());
    }
}

/// Битая запись пользователя считается отсутствующей
fn decode_user(raw: &str) -> Option<AdminUser> {
    match serde_json::from_str(raw) {
        Ok(user) => Some(user),
        Err(e) => {
            warn!("stored user is not valid JSON: {}", e);
            None
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RefCell<Option<String>>,
    user: RefCell<Option<AdminUser>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        let store = Self::default();
        store.set_access_token(Some(token));
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn access_token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn set_access_token(&self, token: Option<&str>) {
        *self.token.borrow_mut() = token.map(str::to_string);
    }

    fn stored_user(&self) -> Option<AdminUser> {
        self.user.borrow().clone()
    }

    fn set_stored_user(&self, user: Option<&AdminUser>) {
        *self.user.borrow_mut() = user.cloned();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_clear() {
        let store = MemoryTokenStore::with_token("abc");
        store.set_stored_user(Some(&AdminUser {
            name: Some("Root".to_string()),
            email: Some("root@example.com".to_string()),
            ..AdminUser::default()
        }));
        assert_eq!(store.access_token().as_deref(), Some("abc"));

        store.clear();
        assert_eq!(store.access_token(), None);
        assert_eq!(store.stored_user(), None);
    }

    #[test]
    fn test_decode_user() {
        let user = decode_user(r#"{"id": 3, "name": "Ann", "email": "ann@example.com"}"#);
        assert_eq!(user.map(|u| u.display_name()), Some("Ann".to_string()));
        assert!(decode_user("{not json").is_none());
    }
}
